use crate::job_description::{field, JobDescriptionRequest};

/// Deterministic markdown job description.
pub fn render_template(request: &JobDescriptionRequest) -> String {
    let title = field(&request.title).unwrap_or("Role");
    let yoe = field(&request.years_of_experience).unwrap_or("2+");
    let company = field(&request.company).unwrap_or("Your Company");
    let employment_type = field(&request.employment_type).unwrap_or("Full-time");
    let industry = field(&request.industry).unwrap_or("General");
    let location = field(&request.location).unwrap_or("Remote");

    let skills: Vec<&str> = field(&request.must_have_skills)
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut lines = vec![
        format!("**{title}**"),
        String::new(),
        format!("**Company:** {company}"),
        format!("**Location:** {location}"),
        format!("**Employment Type:** {employment_type}"),
        format!("**Industry:** {industry}"),
        String::new(),
        "**Job Overview:**".to_string(),
        format!(
            "We are seeking a qualified {title} to join our team. The ideal candidate will have \
             {yoe} years of experience and strong expertise in the required technologies."
        ),
        String::new(),
        "**Key Responsibilities:**".to_string(),
        "- Develop and maintain high-quality software and systems".to_string(),
        "- Collaborate with cross-functional teams".to_string(),
        "- Participate in code reviews and technical discussions".to_string(),
        "- Contribute to project planning and estimation".to_string(),
        String::new(),
        "**Required Qualifications:**".to_string(),
        format!("- {yoe} years of professional experience"),
        "- Strong proficiency in core technologies".to_string(),
        "- Bachelor's degree in Computer Science or related field (or equivalent experience)"
            .to_string(),
        "- Excellent problem-solving and communication skills".to_string(),
    ];

    if !skills.is_empty() {
        lines.push(String::new());
        lines.push("**Must-have skills:**".to_string());
        lines.extend(skills.iter().map(|s| format!("- {s}")));
    }

    lines.push(String::new());
    lines.push(
        "Join our team and help us build great products in a collaborative environment!"
            .to_string(),
    );

    lines.join("\n")
}
