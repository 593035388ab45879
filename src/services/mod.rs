//! Capability seams used by the action workflow, with their concrete
//! implementations for the command-line front end.

pub mod attachment;
pub mod backend;
pub mod geocoder;
pub mod geolocation;
pub mod notifier;
pub mod page;

use crate::errors::{AppError, AppResult};
use std::time::Duration;

/// Shared HTTP client for backend and geocoder requests.
pub fn http_client(user_agent: &str, timeout_secs: u64) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .map_err(|e| AppError::Other(format!("failed to build HTTP client: {}", e)))
}
