use serde::{Deserialize, Serialize};

/// A generated outreach email addressed to one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub candidate_name: String,
    pub body: String,
}

/// Interview invitation for the top-ranked candidate plus rejections for
/// everyone else, in ranked order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailBundle {
    pub interview: Email,
    pub rejections: Vec<Email>,
}
