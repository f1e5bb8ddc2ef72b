use serde::{Deserialize, Serialize};

/// One resume submission: a display identifier (usually the uploaded filename)
/// plus the text extracted from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub resume_text: String,
}

impl Candidate {
    pub fn new(name: impl Into<String>, resume_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resume_text: resume_text.into(),
        }
    }
}

const MAX_SCORE: u32 = 100;

/// Score and diagnostics for one candidate in one ranking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub name: String,
    pub score: u32, // 0 – 100
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub remarks: String,
}

/// Candidates of one ranking run, sorted by score descending.
///
/// The ordering is established at construction and cannot be changed afterwards:
/// equal scores keep their input order. Deserialized sets go through the same
/// construction, so a `RankedSet` is always sorted no matter where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RankedSetParts")]
pub struct RankedSet {
    backend: String,
    results: Vec<ScoreResult>,
}

#[derive(Deserialize)]
struct RankedSetParts {
    #[serde(default = "default_backend")]
    backend: String,
    results: Vec<ScoreResult>,
}

fn default_backend() -> String {
    "keyword".to_string()
}

impl From<RankedSetParts> for RankedSet {
    fn from(parts: RankedSetParts) -> Self {
        RankedSet::from_scores(parts.backend, parts.results)
    }
}

impl RankedSet {
    /// Caps scores at 100, then sorts by score descending. `sort_by` is stable,
    /// which is the tie-break.
    pub fn from_scores(backend: impl Into<String>, mut results: Vec<ScoreResult>) -> Self {
        for result in &mut results {
            result.score = result.score.min(MAX_SCORE);
        }
        results.sort_by(|a, b| b.score.cmp(&a.score));
        Self {
            backend: backend.into(),
            results,
        }
    }

    /// Label of the scorer that produced the results ("keyword", "llm", ...).
    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn results(&self) -> &[ScoreResult] {
        &self.results
    }

    pub fn top(&self) -> Option<&ScoreResult> {
        self.results.first()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
