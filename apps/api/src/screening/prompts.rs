// LLM prompt constants for candidate screening and outreach emails.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for LLM candidate scoring. Append `JSON_ONLY_SYSTEM`.
pub const SCORING_SYSTEM: &str = "You are an expert technical recruiter screening resumes \
    against a job description. Score every candidate independently and consistently.";

/// Candidate scoring prompt template.
/// Replace: {jd_text}, {candidates_json}, {max_missing}
pub const SCORING_PROMPT_TEMPLATE: &str = r#"Score each candidate resume against the job description below.

Return a JSON ARRAY with exactly one object per candidate, in the SAME ORDER as the input:
[
  {
    "name": "the exact candidate name from the input",
    "score": 72,
    "missing_skills": ["kubernetes", "terraform"],
    "remarks": "One or two sentences on how well the candidate fits."
  }
]

RULES:
1. `score` is an integer from 0 to 100 measuring fit with the job requirements
2. `missing_skills` lists at most {max_missing} required skills absent from the resume, lowercase
3. `name` must be copied verbatim; never merge, drop, or reorder candidates
4. Judge only what the resume text says; do not invent experience

JOB DESCRIPTION:
{jd_text}

CANDIDATES:
{candidates_json}"#;

/// System prompt for interview invitations.
pub const INTERVIEW_EMAIL_SYSTEM: &str = "You write short, friendly recruiting emails. \
    Output the email only: a `Subject:` line, a blank line, then the body.";

/// Interview invitation prompt. Replace: {candidate_name}, {jd_excerpt}, {privacy_instruction}
pub const INTERVIEW_EMAIL_PROMPT_TEMPLATE: &str = r#"Candidate: {candidate_name}

Write an interview invitation email (subject + body) for this candidate.
Ask for their availability for a 30-45 minute interview and sign off as "Recruiting Team".
{privacy_instruction}

JOB DESCRIPTION SUMMARY:
{jd_excerpt}"#;

/// System prompt for rejections.
pub const REJECTION_EMAIL_SYSTEM: &str = "You write empathetic, brief rejection emails \
    that keep the door open. Output the email only: a `Subject:` line, a blank line, then the body.";

/// Rejection prompt. Replace: {candidate_name}, {privacy_instruction}
pub const REJECTION_EMAIL_PROMPT_TEMPLATE: &str = r#"Candidate: {candidate_name}

Write a polite rejection email (subject + body). Encourage the candidate to apply
for future openings and sign off as "Recruiting Team".
{privacy_instruction}"#;
