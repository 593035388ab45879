use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A one-shot position fix, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

fn coords_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([-+]?\d+(?:\.\d+)?)\s*[,;\s]\s*([-+]?\d+(?:\.\d+)?)\s*$")
            .expect("coordinates pattern is valid")
    })
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "{}, {} is outside the valid range",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a `"<lat>,<lng>"` or `"<lat> <lng>"` pair.
    pub fn parse(s: &str) -> AppResult<Self> {
        let caps = coords_re()
            .captures(s)
            .ok_or_else(|| AppError::InvalidCoordinates(s.trim().to_string()))?;

        let lat = caps[1]
            .parse::<f64>()
            .map_err(|_| AppError::InvalidCoordinates(s.trim().to_string()))?;
        let lng = caps[2]
            .parse::<f64>()
            .map_err(|_| AppError::InvalidCoordinates(s.trim().to_string()))?;

        Self::new(lat, lng)
    }

    /// Location text used when no address can be resolved.
    pub fn fallback_label(&self) -> String {
        format!("Lat: {}, Lng: {}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
