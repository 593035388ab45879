use super::position::Position;
use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Form fields reserved by the action form; extra fields may not shadow them.
pub const RESERVED_FIELDS: [&str; 4] = ["lat", "lng", "location", "photo"];

/// The mutable set of form values being prepared for submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionDraft {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location: Option<String>,
    pub photo: Option<PathBuf>,
    extra: Vec<(String, String)>,
}

impl SubmissionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_coordinates(&mut self, pos: Position) {
        self.latitude = Some(pos.latitude);
        self.longitude = Some(pos.longitude);
    }

    pub fn coordinates(&self) -> Option<Position> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    pub fn set_location<S: Into<String>>(&mut self, text: S) {
        self.location = Some(text.into());
    }

    pub fn attach_photo<P: AsRef<Path>>(&mut self, path: P) {
        self.photo = Some(path.as_ref().to_path_buf());
    }

    /// Set an extra form field, replacing any previous value with the same name.
    pub fn set_field(&mut self, name: &str, value: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidField("field name cannot be empty".into()));
        }
        if RESERVED_FIELDS.contains(&name) {
            return Err(AppError::InvalidField(format!(
                "'{}' is set through its own option",
                name
            )));
        }

        match self.extra.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.extra.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    /// Parse a `KEY=VALUE` pair from the command line and set it.
    pub fn set_field_pair(&mut self, pair: &str) -> AppResult<()> {
        let (k, v) = pair
            .split_once('=')
            .ok_or_else(|| AppError::InvalidField(format!("expected KEY=VALUE, got '{}'", pair)))?;
        self.set_field(k, v)
    }

    pub fn extra_fields(&self) -> &[(String, String)] {
        &self.extra
    }

    /// Text fields in the order a browser would serialize the form.
    /// Unset inputs are sent as empty strings.
    pub fn text_fields(&self) -> Vec<(String, String)> {
        let mut out = vec![
            (
                "lat".to_string(),
                self.latitude.map(|v| v.to_string()).unwrap_or_default(),
            ),
            (
                "lng".to_string(),
                self.longitude.map(|v| v.to_string()).unwrap_or_default(),
            ),
            (
                "location".to_string(),
                self.location.clone().unwrap_or_default(),
            ),
        ];
        out.extend(self.extra.iter().cloned());
        out
    }
}
