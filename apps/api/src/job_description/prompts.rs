// LLM prompt constants for job-description generation.

pub const JD_WRITER_SYSTEM: &str =
    "You are an expert technical recruiter who writes clear, inclusive job descriptions.";

/// Replace: {title}, {years_of_experience}, {must_have_skills}, {company},
///          {employment_type}, {industry}, {location}
pub const JD_WRITER_PROMPT_TEMPLATE: &str = r#"Title: {title}
Years of experience: {years_of_experience}
Must-have skills: {must_have_skills}
Company: {company}
Employment type: {employment_type}
Industry: {industry}
Location: {location}

Write a concise, structured job description with headings: Overview, Responsibilities,
Requirements, Preferred Qualifications, About the Company, Benefits.
Use bullet points. Keep it 250-450 words."#;
