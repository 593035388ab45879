//! Reverse geocoding against a Nominatim-compatible service.

use crate::errors::{AppError, AppResult};
use crate::models::position::Position;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Converts coordinates into a human-readable address.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// `Ok(None)` when the service answered but had no name for the point.
    async fn reverse(&self, pos: Position) -> AppResult<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
}

pub struct NominatimClient {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimClient {
    /// `endpoint` is the full reverse URL, e.g.
    /// `https://nominatim.openstreetmap.org/reverse`.
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimClient {
    async fn reverse(&self, pos: Position) -> AppResult<Option<String>> {
        debug!(endpoint = %self.endpoint, %pos, "reverse geocoding");

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", pos.latitude.to_string()),
                ("lon", pos.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::EnrichmentLookupFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::EnrichmentLookupFailed(format!(
                "geocoder returned {}",
                status.as_u16()
            )));
        }

        let body: ReverseResponse = resp
            .json()
            .await
            .map_err(|e| AppError::EnrichmentLookupFailed(e.to_string()))?;

        Ok(body.display_name.filter(|n| !n.trim().is_empty()))
    }
}
