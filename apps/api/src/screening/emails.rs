//! Outreach emails: one interview invitation for the top-ranked candidate and a
//! rejection for everyone else, in ranked order.
//!
//! `build_emails` is the deterministic template path. `EmailComposer` can route
//! each email through the generative-text service instead, falling back to the
//! template for any email whose LLM call fails or times out.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::prompts::NO_PRIVATE_FEEDBACK_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::candidate::RankedSet;
use crate::models::email::{Email, EmailBundle};
use crate::screening::prompts::{
    INTERVIEW_EMAIL_PROMPT_TEMPLATE, INTERVIEW_EMAIL_SYSTEM, REJECTION_EMAIL_PROMPT_TEMPLATE,
    REJECTION_EMAIL_SYSTEM,
};

/// Job description characters quoted in the interview prompt.
const MAX_JD_CHARS_IN_PROMPT: usize = 2500;

/// Greeting used when a name has nothing printable left.
const FALLBACK_DISPLAY_NAME: &str = "Candidate";

/// Human-friendly name from an uploaded filename: last extension dropped,
/// underscores turned into spaces. `"jane_doe.cv.pdf"` → `"jane doe.cv"`.
/// When the stem cleans up to nothing (`".pdf"`, `"_.pdf"`) the whole name is
/// cleaned instead.
pub fn display_name(name: &str) -> String {
    let clean = |s: &str| s.replace('_', " ").trim().to_string();

    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    let shown = clean(stem);
    if !shown.is_empty() {
        return shown;
    }
    let shown = clean(name);
    if shown.is_empty() {
        FALLBACK_DISPLAY_NAME.to_string()
    } else {
        shown
    }
}

pub fn interview_email(candidate_name: &str) -> String {
    format!(
        "Subject: Interview Invitation\n\n\
         Hi {},\n\n\
         Thanks for applying. Your background appears to align well with our role.\n\
         We'd love to schedule a 30-45 minute interview this week.\n\n\
         Please share your availability.\n\n\
         Best regards,\n\
         Recruiting Team",
        display_name(candidate_name)
    )
}

pub fn rejection_email(candidate_name: &str) -> String {
    format!(
        "Subject: Application Update\n\n\
         Hi {},\n\n\
         Thank you for your interest. After careful review, we will not be moving forward at this time.\n\
         We appreciate your time and encourage you to apply for future openings.\n\n\
         Best wishes,\n\
         Recruiting Team",
        display_name(candidate_name)
    )
}

/// Template emails for a ranked set. Index 0 is invited, the rest are declined.
pub fn build_emails(ranked: &RankedSet) -> Result<EmailBundle, AppError> {
    let (top, rest) = split_top(ranked)?;

    Ok(EmailBundle {
        interview: Email {
            candidate_name: top.to_string(),
            body: interview_email(top),
        },
        rejections: rest
            .iter()
            .map(|name| Email {
                candidate_name: name.to_string(),
                body: rejection_email(name),
            })
            .collect(),
    })
}

fn split_top(ranked: &RankedSet) -> Result<(&str, Vec<&str>), AppError> {
    let (top, rest) = ranked.results().split_first().ok_or_else(|| {
        AppError::EmptyInput("No ranked candidates to build emails for.".to_string())
    })?;
    Ok((
        top.name.as_str(),
        rest.iter().map(|r| r.name.as_str()).collect(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed composition
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum EmailKind {
    Interview,
    Rejection,
}

/// Produces the email bundle, optionally through the LLM.
#[derive(Clone)]
pub struct EmailComposer {
    llm: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl EmailComposer {
    /// Template-only composer.
    pub fn templates() -> Self {
        Self {
            llm: None,
            timeout: Duration::from_secs(20),
        }
    }

    pub fn with_llm(llm: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            llm: Some(llm),
            timeout,
        }
    }

    pub fn uses_llm(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn compose(
        &self,
        ranked: &RankedSet,
        job_description: &str,
    ) -> Result<EmailBundle, AppError> {
        let llm = match &self.llm {
            Some(llm) => llm,
            None => return build_emails(ranked),
        };

        let (top, rest) = split_top(ranked)?;
        let jd_excerpt: String = job_description.chars().take(MAX_JD_CHARS_IN_PROMPT).collect();

        let recipients: Vec<(EmailKind, String)> =
            std::iter::once((EmailKind::Interview, top.to_string()))
                .chain(rest.iter().map(|n| (EmailKind::Rejection, n.to_string())))
                .collect();

        let mut tasks = JoinSet::new();
        for (index, (kind, name)) in recipients.iter().cloned().enumerate() {
            let llm = Arc::clone(llm);
            let jd_excerpt = jd_excerpt.clone();
            let timeout = self.timeout;
            tasks.spawn(async move {
                let body = write_with_llm(llm.as_ref(), kind, &name, &jd_excerpt, timeout).await;
                (index, body)
            });
        }

        let mut bodies: Vec<Option<String>> = vec![None; recipients.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(body))) => bodies[index] = Some(body),
                Ok((index, Err(e))) => warn!(
                    candidate = %recipients[index].1,
                    error = %e,
                    "LLM email generation failed, using template"
                ),
                Err(e) => warn!(error = %e, "Email generation task failed, using template"),
            }
        }

        let mut emails = recipients
            .into_iter()
            .zip(bodies)
            .map(|((kind, name), body)| {
                let body = body.unwrap_or_else(|| match kind {
                    EmailKind::Interview => interview_email(&name),
                    EmailKind::Rejection => rejection_email(&name),
                });
                Email {
                    candidate_name: name,
                    body,
                }
            });

        // recipients always starts with the interview entry
        let interview = emails
            .next()
            .ok_or_else(|| AppError::EmptyInput("No interview candidate.".to_string()))?;

        Ok(EmailBundle {
            interview,
            rejections: emails.collect(),
        })
    }
}

async fn write_with_llm(
    llm: &dyn TextGenerator,
    kind: EmailKind,
    candidate_name: &str,
    jd_excerpt: &str,
    timeout: Duration,
) -> Result<String, AppError> {
    let (system, prompt) = email_prompt(kind, candidate_name, jd_excerpt);

    tokio::time::timeout(timeout, llm.generate_text(system, &prompt))
        .await
        .map_err(|_| {
            AppError::ExternalServiceUnavailable(format!("email generation timed out after {timeout:?}"))
        })?
        .map_err(|e| AppError::ExternalServiceUnavailable(format!("email generation failed: {e}")))
}

fn email_prompt(kind: EmailKind, candidate_name: &str, jd_excerpt: &str) -> (&'static str, String) {
    let name = display_name(candidate_name);
    match kind {
        EmailKind::Interview => (
            INTERVIEW_EMAIL_SYSTEM,
            INTERVIEW_EMAIL_PROMPT_TEMPLATE
                .replace("{privacy_instruction}", NO_PRIVATE_FEEDBACK_INSTRUCTION)
                .replace("{candidate_name}", &name)
                .replace("{jd_excerpt}", jd_excerpt),
        ),
        EmailKind::Rejection => (
            REJECTION_EMAIL_SYSTEM,
            REJECTION_EMAIL_PROMPT_TEMPLATE
                .replace("{privacy_instruction}", NO_PRIVATE_FEEDBACK_INSTRUCTION)
                .replace("{candidate_name}", &name),
        ),
    }
}
