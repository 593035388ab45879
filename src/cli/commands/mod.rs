pub mod action;
pub mod clock;
pub mod config;
pub mod history;
pub mod init;
pub mod locate;
pub mod log;
pub mod status;

use crate::errors::AppResult;
use crate::models::position::Position;

/// `--lat`/`--lng` given together form an explicit position fix.
pub(crate) fn explicit_position(lat: Option<f64>, lng: Option<f64>) -> AppResult<Option<Position>> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Position::new(lat, lng).map(Some),
        _ => Ok(None),
    }
}
