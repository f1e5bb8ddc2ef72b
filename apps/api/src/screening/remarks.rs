//! Remark generator: turns a score and its diagnostics into a short qualitative note.
//!
//! Bands are evaluated top-down (80 / 60 / 40), so a higher score never gets a
//! less favorable band sentence than a lower one.

/// Missing skills named explicitly before switching to "several key skills".
const NAMED_MISSING_LIMIT: usize = 3;

/// Lowercase substrings that suggest the resume describes prior work.
const EXPERIENCE_INDICATORS: &[&str] = &["years", "experience", "worked"];

/// The band sentence alone.
pub fn band_remark(score: u32) -> &'static str {
    if score >= 80 {
        "Strong alignment with required terminology."
    } else if score >= 60 {
        "Good overlap with JD keywords."
    } else if score >= 40 {
        "Partial match, consider screening."
    } else {
        "Low keyword overlap with JD."
    }
}

/// Band sentence, then a missing-skill note, then an experience note when the
/// resume mentions prior work. Additions are appended, never substituted.
pub fn remark(score: u32, missing_skills: &[String], resume_text: &str) -> String {
    let mut parts = vec![band_remark(score).to_string()];

    if !missing_skills.is_empty() {
        let named = missing_skills
            .iter()
            .take(NAMED_MISSING_LIMIT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if missing_skills.len() <= NAMED_MISSING_LIMIT {
            parts.push(format!("Could benefit from experience in {named}."));
        } else {
            parts.push(format!("Missing several key skills including {named}."));
        }
    }

    let lower = resume_text.to_lowercase();
    if EXPERIENCE_INDICATORS.iter().any(|w| lower.contains(w)) {
        parts.push("Shows relevant work experience.".to_string());
    }

    parts.join(" ")
}
