use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::screening::overlap::MissingSkillsPolicy;

/// Application configuration loaded from environment variables.
/// Nothing is strictly required: without `ANTHROPIC_API_KEY` the service runs
/// entirely on the deterministic keyword and template paths.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: Option<String>,
    /// Install the LLM scorer as the smart scorer (needs an API key).
    pub enable_llm_scoring: bool,
    /// Write emails and job descriptions through the LLM (needs an API key).
    pub enable_llm_writing: bool,
    /// Upper bound on a single smart-scorer or LLM writing call.
    pub llm_timeout: Duration,
    pub missing_skills_policy: MissingSkillsPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            enable_llm_scoring: false,
            enable_llm_writing: false,
            llm_timeout: Duration::from_secs(20),
            missing_skills_policy: MissingSkillsPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: match optional_env("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            enable_llm_scoring: match optional_env("ENABLE_LLM_SCORING") {
                Some(v) => parse_bool(&v).context("ENABLE_LLM_SCORING")?,
                None => defaults.enable_llm_scoring,
            },
            enable_llm_writing: match optional_env("ENABLE_LLM_WRITING") {
                Some(v) => parse_bool(&v).context("ENABLE_LLM_WRITING")?,
                None => defaults.enable_llm_writing,
            },
            llm_timeout: match optional_env("SMART_SCORER_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(
                    v.parse::<u64>()
                        .context("SMART_SCORER_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.llm_timeout,
            },
            missing_skills_policy: match optional_env("MISSING_SKILLS_POLICY") {
                Some(v) => v.parse().context("MISSING_SKILLS_POLICY")?,
                None => defaults.missing_skills_policy,
            },
        })
    }
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean (true/false), got '{other}'"),
    }
}
