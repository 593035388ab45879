use super::action_target::ActionTarget;
use super::draft::SubmissionDraft;
use chrono::{DateTime, Local};
use serde::Deserialize;

/// Outcome of a submission as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    Failure(String),
}

/// Wire shape of `/staff/login` and `/staff/logout` responses.
#[derive(Debug, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<ActionResponse> for SubmissionResult {
    fn from(r: ActionResponse) -> Self {
        if r.success {
            SubmissionResult::Success
        } else {
            SubmissionResult::Failure(r.error.unwrap_or_else(|| "unknown error".to_string()))
        }
    }
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success)
    }
}

/// What was accepted by the backend, handed to the page for refresh.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub target: ActionTarget,
    pub draft: SubmissionDraft,
    pub accepted_at: DateTime<Local>,
}
