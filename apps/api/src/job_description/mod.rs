//! Job description generation: a markdown template, optionally replaced by an
//! LLM-written description when AI writing is enabled.

pub mod handlers;
pub mod prompts;
pub mod template;

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::job_description::prompts::{JD_WRITER_PROMPT_TEMPLATE, JD_WRITER_SYSTEM};
use crate::job_description::template::render_template;
use crate::llm_client::TextGenerator;

/// Inputs for a generated job description. Every field is optional; blanks
/// fall back to template defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobDescriptionRequest {
    pub title: Option<String>,
    pub years_of_experience: Option<String>,
    /// Comma-separated.
    pub must_have_skills: Option<String>,
    pub company: Option<String>,
    pub employment_type: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
}

/// Non-blank, trimmed field value.
pub(crate) fn field(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// LLM-written description when `llm` is given and answers in time, template otherwise.
pub async fn generate_job_description(
    request: &JobDescriptionRequest,
    llm: Option<&dyn TextGenerator>,
    timeout: Duration,
) -> String {
    let Some(llm) = llm else {
        return render_template(request);
    };

    let prompt = build_writer_prompt(request);
    match tokio::time::timeout(timeout, llm.generate_text(JD_WRITER_SYSTEM, &prompt)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(error = %e, "LLM job description failed, using template");
            render_template(request)
        }
        Err(_) => {
            warn!(?timeout, "LLM job description timed out, using template");
            render_template(request)
        }
    }
}

fn build_writer_prompt(request: &JobDescriptionRequest) -> String {
    JD_WRITER_PROMPT_TEMPLATE
        .replace("{title}", field(&request.title).unwrap_or(""))
        .replace(
            "{years_of_experience}",
            field(&request.years_of_experience).unwrap_or(""),
        )
        .replace(
            "{must_have_skills}",
            field(&request.must_have_skills).unwrap_or(""),
        )
        .replace("{company}", field(&request.company).unwrap_or(""))
        .replace(
            "{employment_type}",
            field(&request.employment_type).unwrap_or(""),
        )
        .replace("{industry}", field(&request.industry).unwrap_or(""))
        .replace("{location}", field(&request.location).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    #[tokio::test]
    async fn test_without_llm_uses_template() {
        let request = JobDescriptionRequest {
            title: Some("Data Engineer".to_string()),
            ..Default::default()
        };
        let text = generate_job_description(&request, None, Duration::from_secs(1)).await;
        assert_eq!(text, render_template(&request));
    }

    #[test]
    fn test_writer_prompt_fills_every_placeholder() {
        let request = JobDescriptionRequest {
            title: Some("Backend Engineer".to_string()),
            years_of_experience: Some("5+".to_string()),
            must_have_skills: Some("Rust, Postgres".to_string()),
            company: Some("Acme".to_string()),
            employment_type: None,
            industry: Some("  ".to_string()),
            location: Some("Berlin".to_string()),
        };
        let prompt = build_writer_prompt(&request);
        assert!(prompt.contains("Title: Backend Engineer"));
        assert!(prompt.contains("Must-have skills: Rust, Postgres"));
        assert!(prompt.contains("Location: Berlin"));
        assert!(prompt.contains("Industry: \n"));
        assert!(!prompt.contains('{'));
    }

    enum Script {
        Answer(&'static str),
        Fail,
        Hang,
    }

    struct StubWriter(Script);

    #[async_trait]
    impl TextGenerator for StubWriter {
        async fn generate_text(&self, system: &str, _prompt: &str) -> Result<String, LlmError> {
            assert_eq!(system, JD_WRITER_SYSTEM);
            match self.0 {
                Script::Answer(text) => Ok(text.to_string()),
                Script::Fail => Err(LlmError::RateLimited { retries: 3 }),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    fn request() -> JobDescriptionRequest {
        JobDescriptionRequest {
            title: Some("Platform Engineer".to_string()),
            must_have_skills: Some("Rust, Kubernetes".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generated_text_is_used() {
        let writer = StubWriter(Script::Answer("**Platform Engineer** at Acme"));
        let text =
            generate_job_description(&request(), Some(&writer), Duration::from_secs(5)).await;
        assert_eq!(text, "**Platform Engineer** at Acme");
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_template() {
        let writer = StubWriter(Script::Fail);
        let text =
            generate_job_description(&request(), Some(&writer), Duration::from_secs(5)).await;
        assert_eq!(text, render_template(&request()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back_to_template() {
        let writer = StubWriter(Script::Hang);
        let text =
            generate_job_description(&request(), Some(&writer), Duration::from_secs(5)).await;
        assert_eq!(text, render_template(&request()));
    }
}
