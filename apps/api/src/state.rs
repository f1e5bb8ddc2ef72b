use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::screening::emails::EmailComposer;
use crate::screening::ranker::Ranker;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no mutable data: concurrent screening runs share nothing but configuration.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scoring strategy, chosen once at startup.
    pub ranker: Ranker,
    pub emails: EmailComposer,
    /// Generative-text client for job descriptions. `None` unless AI writing is enabled.
    pub writer: Option<Arc<dyn TextGenerator>>,
}

#[cfg(test)]
impl AppState {
    /// Deterministic state: keyword ranking, template emails, no LLM.
    pub fn for_tests() -> Self {
        let config = Config::default();
        Self {
            ranker: Ranker::new(config.missing_skills_policy),
            emails: EmailComposer::templates(),
            writer: None,
            config,
        }
    }
}
