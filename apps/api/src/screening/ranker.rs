//! Ranker: scores every candidate of a run and sorts them into a `RankedSet`.
//!
//! The strategy is fixed at construction: an `OverlapScorer` is always present,
//! and an optional smart scorer is tried first under a timeout. Smart output is
//! all-or-nothing. If it fails, declines, times out, or does not line up
//! one-to-one with the input, the whole batch is rescored by keyword overlap.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::candidate::{Candidate, RankedSet, ScoreResult};
use crate::screening::overlap::{MissingSkillsPolicy, MAX_MISSING_SKILLS};
use crate::screening::remarks::remark;
use crate::screening::scorer::{CandidateScorer, OverlapScorer, ScorerError};

/// Maximum resumes accepted in one ranking run.
pub const MAX_CANDIDATES: usize = 10;

const DEFAULT_SMART_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Clone)]
pub struct Ranker {
    overlap: OverlapScorer,
    smart: Option<Arc<dyn CandidateScorer>>,
    smart_timeout: Duration,
}

impl Ranker {
    /// Keyword-overlap only.
    pub fn new(policy: MissingSkillsPolicy) -> Self {
        Self {
            overlap: OverlapScorer::new(policy),
            smart: None,
            smart_timeout: DEFAULT_SMART_TIMEOUT,
        }
    }

    /// Tries `scorer` first on every run, bounded by `timeout`.
    pub fn with_smart_scorer(mut self, scorer: Arc<dyn CandidateScorer>, timeout: Duration) -> Self {
        self.smart = Some(scorer);
        self.smart_timeout = timeout;
        self
    }

    /// Backend label of the preferred scorer.
    pub fn preferred_backend(&self) -> &'static str {
        match &self.smart {
            Some(smart) => smart.backend(),
            None => CandidateScorer::backend(&self.overlap),
        }
    }

    /// Scores and sorts `candidates`. Fails only on an invalid candidate count,
    /// which is checked before any scoring happens.
    pub async fn rank(
        &self,
        job_description: &str,
        candidates: &[Candidate],
    ) -> Result<RankedSet, AppError> {
        validate_candidate_count(candidates.len())?;

        let ranked = match &self.smart {
            Some(smart) => match self.try_smart(smart.as_ref(), job_description, candidates).await {
                Ok(results) => RankedSet::from_scores(smart.backend(), results),
                Err(e) => {
                    warn!(
                        backend = smart.backend(),
                        error = %e,
                        "Smart scorer unavailable, falling back to keyword overlap"
                    );
                    self.rank_by_overlap(job_description, candidates)
                }
            },
            None => self.rank_by_overlap(job_description, candidates),
        };

        info!(
            candidates = ranked.len(),
            backend = ranked.backend(),
            top_score = ranked.top().map(|r| r.score).unwrap_or(0),
            "Ranked candidates"
        );

        Ok(ranked)
    }

    fn rank_by_overlap(&self, job_description: &str, candidates: &[Candidate]) -> RankedSet {
        RankedSet::from_scores(
            CandidateScorer::backend(&self.overlap),
            self.overlap.score_candidates(job_description, candidates),
        )
    }

    async fn try_smart(
        &self,
        smart: &dyn CandidateScorer,
        job_description: &str,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoreResult>, ScorerError> {
        let results = tokio::time::timeout(
            self.smart_timeout,
            smart.score_all(job_description, candidates),
        )
        .await
        .map_err(|_| ScorerError::Timeout(self.smart_timeout))??
        .ok_or(ScorerError::Declined)?;

        accept_smart_results(candidates, results)
    }
}

/// Rejects 0 or more than `MAX_CANDIDATES` candidates.
pub fn validate_candidate_count(count: usize) -> Result<(), AppError> {
    if count == 0 {
        return Err(AppError::InvalidInput(
            "At least one resume is required.".to_string(),
        ));
    }
    if count > MAX_CANDIDATES {
        return Err(AppError::InvalidInput(format!(
            "Please upload at most {MAX_CANDIDATES} resumes (got {count})."
        )));
    }
    Ok(())
}

/// Smart results must line up one-to-one, by name and position, with the input.
/// Accepted results are brought in line with the overlap scorer's guarantees.
fn accept_smart_results(
    candidates: &[Candidate],
    results: Vec<ScoreResult>,
) -> Result<Vec<ScoreResult>, ScorerError> {
    if results.len() != candidates.len() {
        return Err(ScorerError::Malformed(format!(
            "expected {} results, got {}",
            candidates.len(),
            results.len()
        )));
    }

    candidates
        .iter()
        .zip(results)
        .map(|(candidate, mut result)| {
            if result.name != candidate.name {
                return Err(ScorerError::Malformed(format!(
                    "expected result for '{}', got '{}'",
                    candidate.name, result.name
                )));
            }
            result.score = result.score.min(100);
            result.missing_skills.truncate(MAX_MISSING_SKILLS);
            if result.remarks.trim().is_empty() {
                result.remarks = remark(
                    result.score,
                    &result.missing_skills,
                    &candidate.resume_text,
                );
            }
            Ok(result)
        })
        .collect()
}
