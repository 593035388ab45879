//! One-shot position providers.

use crate::config::GeolocationConfig;
use crate::errors::{AppError, AppResult};
use crate::models::position::Position;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Device location capability.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Whether a position can be requested at all.
    fn is_available(&self) -> bool;

    /// Request a single position fix.
    async fn current_position(&self) -> AppResult<Position>;
}

/// No location source configured.
pub struct Unavailable;

#[async_trait]
impl Geolocator for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(&self) -> AppResult<Position> {
        Err(AppError::CapabilityUnavailable)
    }
}

/// A position given on the command line or in the config file.
pub struct FixedGeolocator {
    position: Position,
}

impl FixedGeolocator {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self) -> AppResult<Position> {
        Ok(self.position)
    }
}

/// Runs an external locator (e.g. `termux-location`, `CoreLocationCLI`)
/// that prints `<lat>,<lng>` on stdout.
pub struct CommandGeolocator {
    command: String,
    timeout: Duration,
}

impl CommandGeolocator {
    pub fn new(command: String, timeout: Duration) -> Self {
        Self { command, timeout }
    }

    fn shell(&self) -> Command {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.arg("/C");
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c");
            c
        };
        cmd.arg(&self.command).kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Geolocator for CommandGeolocator {
    fn is_available(&self) -> bool {
        !self.command.trim().is_empty()
    }

    async fn current_position(&self) -> AppResult<Position> {
        debug!(command = %self.command, "requesting position fix");

        let output = tokio::time::timeout(self.timeout, self.shell().output())
            .await
            .map_err(|_| {
                AppError::PermissionOrTimeoutDenied(format!(
                    "no position within {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| AppError::PermissionOrTimeoutDenied(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::PermissionOrTimeoutDenied(if stderr.is_empty() {
                format!("locator exited with {}", output.status)
            } else {
                stderr
            }));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        Position::parse(line).map_err(|e| AppError::PermissionOrTimeoutDenied(e.to_string()))
    }
}

/// Pick the provider: explicit position first, then the configured fixed
/// position, then the configured command.
pub fn from_config(cfg: &GeolocationConfig, explicit: Option<Position>) -> Arc<dyn Geolocator> {
    if let Some(pos) = explicit {
        return Arc::new(FixedGeolocator::new(pos));
    }

    if let (Some(lat), Some(lng)) = (cfg.latitude, cfg.longitude)
        && let Ok(pos) = Position::new(lat, lng)
    {
        return Arc::new(FixedGeolocator::new(pos));
    }

    match &cfg.command {
        Some(cmd) if !cmd.trim().is_empty() => Arc::new(CommandGeolocator::new(
            cmd.clone(),
            Duration::from_secs(cfg.timeout_secs.max(1)),
        )),
        _ => Arc::new(Unavailable),
    }
}
