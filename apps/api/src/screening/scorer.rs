//! Candidate scorers: pluggable, trait-based engines that score a whole batch.
//!
//! Default: `OverlapScorer` (pure-Rust keyword overlap, deterministic).
//! Optional: `LlmCandidateScorer` (semantic via the generative-text service).
//!
//! `Ranker` always keeps an `OverlapScorer` and may additionally hold an
//! `Arc<dyn CandidateScorer>` chosen once at startup. A smart scorer that
//! declines or fails never fails the ranking; the overlap path takes over.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::candidate::{Candidate, ScoreResult};
use crate::screening::overlap::{score_resume, MissingSkillsPolicy, MAX_MISSING_SKILLS};
use crate::screening::prompts::{SCORING_PROMPT_TEMPLATE, SCORING_SYSTEM};
use crate::screening::remarks::remark;

/// Resume characters sent to the LLM per candidate.
const MAX_RESUME_CHARS_IN_PROMPT: usize = 6000;

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("scorer unavailable: {0}")]
    Unavailable(String),

    #[error("scorer timed out after {0:?}")]
    Timeout(Duration),

    #[error("scorer declined to score this batch")]
    Declined,

    #[error("scorer returned malformed results: {0}")]
    Malformed(String),
}

impl From<LlmError> for ScorerError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Parse(e) => ScorerError::Malformed(e.to_string()),
            other => ScorerError::Unavailable(other.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores every candidate of one run against a job description.
///
/// `Ok(None)` means "not this time, use the default path". Errors are treated
/// the same way by the ranker, but are logged with their reason.
#[async_trait]
pub trait CandidateScorer: Send + Sync {
    /// Short label reported on the ranked set ("keyword", "llm", ...).
    fn backend(&self) -> &'static str;

    async fn score_all(
        &self,
        job_description: &str,
        candidates: &[Candidate],
    ) -> Result<Option<Vec<ScoreResult>>, ScorerError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OverlapScorer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapScorer {
    policy: MissingSkillsPolicy,
}

impl OverlapScorer {
    pub fn new(policy: MissingSkillsPolicy) -> Self {
        Self { policy }
    }

    pub fn score_candidate(&self, job_description: &str, candidate: &Candidate) -> ScoreResult {
        let overlap = score_resume(job_description, &candidate.resume_text, self.policy);
        let remarks = remark(
            overlap.score,
            &overlap.missing_skills,
            &candidate.resume_text,
        );
        ScoreResult {
            name: candidate.name.clone(),
            score: overlap.score,
            missing_skills: overlap.missing_skills,
            remarks,
        }
    }

    /// One result per candidate, in input order.
    pub fn score_candidates(
        &self,
        job_description: &str,
        candidates: &[Candidate],
    ) -> Vec<ScoreResult> {
        candidates
            .iter()
            .map(|c| self.score_candidate(job_description, c))
            .collect()
    }
}

#[async_trait]
impl CandidateScorer for OverlapScorer {
    fn backend(&self) -> &'static str {
        "keyword"
    }

    async fn score_all(
        &self,
        job_description: &str,
        candidates: &[Candidate],
    ) -> Result<Option<Vec<ScoreResult>>, ScorerError> {
        Ok(Some(self.score_candidates(job_description, candidates)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmCandidateScorer
// ────────────────────────────────────────────────────────────────────────────

/// Semantic scorer backed by the generative-text service.
pub struct LlmCandidateScorer(pub LlmClient);

/// Shape the model is asked to return. `score` is a float so that "72.5" or
/// out-of-range values still deserialize; they are clamped afterwards.
#[derive(Debug, Deserialize)]
struct LlmScore {
    name: String,
    score: f64,
    #[serde(default)]
    missing_skills: Vec<String>,
    #[serde(default)]
    remarks: String,
}

impl From<LlmScore> for ScoreResult {
    fn from(raw: LlmScore) -> Self {
        let score = if raw.score.is_finite() {
            raw.score.clamp(0.0, 100.0).round() as u32
        } else {
            0
        };
        ScoreResult {
            name: raw.name,
            score,
            missing_skills: raw
                .missing_skills
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            remarks: raw.remarks.trim().to_string(),
        }
    }
}

#[async_trait]
impl CandidateScorer for LlmCandidateScorer {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn score_all(
        &self,
        job_description: &str,
        candidates: &[Candidate],
    ) -> Result<Option<Vec<ScoreResult>>, ScorerError> {
        let prompt = build_scoring_prompt(job_description, candidates)?;
        let system = format!("{SCORING_SYSTEM} {JSON_ONLY_SYSTEM}");

        let raw: Vec<LlmScore> = self.0.call_json(&prompt, &system).await?;

        Ok(Some(raw.into_iter().map(ScoreResult::from).collect()))
    }
}

fn build_scoring_prompt(
    job_description: &str,
    candidates: &[Candidate],
) -> Result<String, ScorerError> {
    let candidates_json = serde_json::to_string_pretty(
        &candidates
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "resume_text": c.resume_text.chars().take(MAX_RESUME_CHARS_IN_PROMPT).collect::<String>(),
                })
            })
            .collect::<Vec<_>>(),
    )
    .map_err(|e| ScorerError::Malformed(format!("failed to serialize candidates: {e}")))?;

    Ok(SCORING_PROMPT_TEMPLATE
        .replace("{max_missing}", &MAX_MISSING_SKILLS.to_string())
        .replace("{candidates_json}", &candidates_json)
        .replace("{jd_text}", job_description))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
