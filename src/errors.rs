//! Unified application error type.
//! All modules (workflow, services, db, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Journal database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid form field: {0}")]
    InvalidField(String),

    #[error("Invalid activity kind: {0}")]
    InvalidKind(String),

    // ---------------------------
    // Geolocation enrichment
    // ---------------------------
    #[error("Geolocation is not available on this device")]
    CapabilityUnavailable,

    #[error("Unable to obtain a position fix: {0}")]
    PermissionOrTimeoutDenied(String),

    #[error("Address lookup failed: {0}")]
    EnrichmentLookupFailed(String),

    // ---------------------------
    // Submission
    // ---------------------------
    #[error("Submission rejected by server: {0}")]
    SubmissionRejected(String),

    #[error("Submission failed: {0}")]
    TransportFailure(String),

    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("No action selected: open check-in or check-out first")]
    NoActiveTarget,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl AppError {
    /// Workflow failures already shown to the user as a notice.
    pub fn is_notified(&self) -> bool {
        matches!(
            self,
            AppError::SubmissionRejected(_)
                | AppError::TransportFailure(_)
                | AppError::SubmissionInFlight
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
