// Cross-cutting prompt fragments shared by the screening and job-description prompts.
// Each module that calls the LLM keeps its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps scoring rationale out of anything a candidate will read.
pub const NO_PRIVATE_FEEDBACK_INSTRUCTION: &str = "\
    Do NOT mention scores, rankings, missing skills, or any evaluation detail. \
    Do NOT invent facts about the candidate.";
