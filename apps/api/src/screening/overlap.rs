//! Skill-overlap scoring: the deterministic default scorer.
//!
//! Algorithm:
//! 1. jd = tokenize(job description), resume = tokenize(resume text)
//! 2. score = round_half_even(|jd ∩ resume| / max(|jd|, 1) × 100), capped at 100
//! 3. missing = jd − resume words (per `MissingSkillsPolicy`), lexicographic, first 8

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::screening::tokenizer::{raw_words, tokenize};

/// Upper bound on the missing-skill list reported per candidate.
pub const MAX_MISSING_SKILLS: usize = 8;

/// Which resume words count as "present" when listing missing skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSkillsPolicy {
    /// Same tokenizer as the score: a JD token counted as matched is never reported missing.
    #[default]
    Normalized,
    /// Resume split on whitespace only and lowercased. Reproduces the legacy output,
    /// where `"Python,"` in a resume still leaves `python` in the missing list.
    LegacyWhitespace,
}

impl FromStr for MissingSkillsPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normalized" => Ok(MissingSkillsPolicy::Normalized),
            "legacy_whitespace" | "legacy" => Ok(MissingSkillsPolicy::LegacyWhitespace),
            other => anyhow::bail!(
                "unknown missing-skills policy '{other}' (expected 'normalized' or 'legacy_whitespace')"
            ),
        }
    }
}

/// Score plus missing skills for one resume against one job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapScore {
    pub score: u32, // 0 – 100
    pub missing_skills: Vec<String>,
}

pub fn score_resume(
    job_description: &str,
    resume_text: &str,
    policy: MissingSkillsPolicy,
) -> OverlapScore {
    let jd_tokens = tokenize(job_description);
    let resume_tokens = tokenize(resume_text);

    let overlap = jd_tokens.intersection(&resume_tokens).count();
    let score = overlap_percentage(overlap, jd_tokens.len());

    let missing_skills = match policy {
        MissingSkillsPolicy::Normalized => first_missing(&jd_tokens, &resume_tokens),
        MissingSkillsPolicy::LegacyWhitespace => {
            first_missing(&jd_tokens, &raw_words(resume_text))
        }
    };

    OverlapScore {
        score,
        missing_skills,
    }
}

/// Empty JDs divide by 1 so the result is 0 instead of NaN.
/// Ties round to even: 12.5 → 12, 37.5 → 38.
fn overlap_percentage(overlap: usize, jd_len: usize) -> u32 {
    let denominator = jd_len.max(1) as f64;
    let pct = (overlap as f64 / denominator) * 100.0;
    pct.min(100.0).round_ties_even() as u32
}

fn first_missing(jd_tokens: &BTreeSet<String>, present: &BTreeSet<String>) -> Vec<String> {
    jd_tokens
        .difference(present)
        .take(MAX_MISSING_SKILLS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMALIZED: MissingSkillsPolicy = MissingSkillsPolicy::Normalized;
    const LEGACY: MissingSkillsPolicy = MissingSkillsPolicy::LegacyWhitespace;

    #[test]
    fn test_two_of_three_rounds_to_67() {
        let result = score_resume("Python SQL AWS", "Experienced in Python and AWS", NORMALIZED);
        assert_eq!(result.score, 67);
        assert_eq!(result.missing_skills, vec!["sql"]);
    }

    #[test]
    fn test_no_shared_tokens_scores_zero_with_missing() {
        let result = score_resume("Python SQL AWS", "Java developer", NORMALIZED);
        assert_eq!(result.score, 0);
        assert_eq!(result.missing_skills, vec!["aws", "python", "sql"]);
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let result = score_resume(
            "Rust, Tokio & Kubernetes",
            "I write rust with tokio on kubernetes daily",
            NORMALIZED,
        );
        assert_eq!(result.score, 100);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_empty_resume_lists_up_to_eight_jd_tokens() {
        let jd = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
        let result = score_resume(jd, "", NORMALIZED);
        assert_eq!(result.score, 0);
        assert_eq!(result.missing_skills.len(), MAX_MISSING_SKILLS);
        assert_eq!(
            result.missing_skills,
            vec!["alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel"]
        );
    }

    #[test]
    fn test_empty_jd_scores_zero_with_no_missing() {
        let result = score_resume("", "Python SQL AWS", NORMALIZED);
        assert_eq!(result.score, 0);
        assert!(result.missing_skills.is_empty());

        let result = score_resume("a ! b", "anything", NORMALIZED);
        assert_eq!(result.score, 0);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_half_rounds_to_even() {
        // 1 of 8 → 12.5 → 12
        let jd = "aa bb cc dd ee ff gg hh";
        assert_eq!(score_resume(jd, "aa", NORMALIZED).score, 12);
        // 3 of 8 → 37.5 → 38
        assert_eq!(score_resume(jd, "aa bb cc", NORMALIZED).score, 38);
    }

    #[test]
    fn test_legacy_policy_misses_punctuated_words() {
        let jd = "Python SQL AWS";
        let resume = "Skills: Python, SQL, AWS";

        let normalized = score_resume(jd, resume, NORMALIZED);
        assert_eq!(normalized.score, 100);
        assert!(normalized.missing_skills.is_empty());

        let legacy = score_resume(jd, resume, LEGACY);
        assert_eq!(legacy.score, 100, "policy never changes the score");
        assert_eq!(legacy.missing_skills, vec!["python", "sql"]);
    }

    #[test]
    fn test_legacy_policy_is_case_insensitive() {
        let legacy = score_resume("Python SQL", "PYTHON sql", LEGACY);
        assert!(legacy.missing_skills.is_empty());
    }

    #[test]
    fn test_score_is_deterministic() {
        let jd = "Go Rust Python Kafka Redis Postgres";
        let resume = "Rust and Kafka at scale, some Redis";
        assert_eq!(
            score_resume(jd, resume, NORMALIZED),
            score_resume(jd, resume, NORMALIZED)
        );
    }

    #[test]
    fn test_policy_parses_from_config_strings() {
        assert_eq!(
            "normalized".parse::<MissingSkillsPolicy>().unwrap(),
            NORMALIZED
        );
        assert_eq!(
            "Legacy_Whitespace".parse::<MissingSkillsPolicy>().unwrap(),
            LEGACY
        );
        assert!("fuzzy".parse::<MissingSkillsPolicy>().is_err());
    }
}
