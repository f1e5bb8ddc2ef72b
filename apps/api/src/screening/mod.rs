// Candidate screening: tokenize, score, rank, remark, and write outreach emails.
// The overlap path is pure and deterministic; LLM-backed pieces are optional
// and always fall back to it.

pub mod emails;
pub mod handlers;
pub mod overlap;
pub mod prompts;
pub mod ranker;
pub mod remarks;
pub mod scorer;
pub mod tokenizer;
