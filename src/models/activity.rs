use super::action_target::ActionTarget;
use super::submission::SubmissionReceipt;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// A check-in or check-out recorded in the local journal.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: i64,
    pub kind: ActionTarget,  // ⇔ activities.kind ('login' | 'logout')
    pub date: NaiveDate,     // ⇔ activities.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,     // ⇔ activities.time (TEXT "HH:MM:SS")
    pub location: String,    // ⇔ activities.location
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo: String,       // ⇔ activities.photo (path, '' when none)
    pub created_at: String,  // ⇔ activities.created_at (TEXT, ISO8601)
}

impl Activity {
    /// Build a journal row from an accepted submission.
    pub fn from_receipt(receipt: &SubmissionReceipt) -> Self {
        let draft = &receipt.draft;
        Self {
            id: 0,
            kind: receipt.target,
            date: receipt.accepted_at.date_naive(),
            time: receipt.accepted_at.time(),
            location: draft
                .location
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "Unknown location".to_string()),
            lat: draft.latitude,
            lng: draft.longitude,
            photo: draft
                .photo
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default(),
            created_at: receipt.accepted_at.to_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// Today's view of the journal, as shown on the staff dashboard.
#[derive(Debug, Clone)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub has_login: bool,
    pub has_logout: bool,
    pub activities: Vec<Activity>,
}

impl DayStatus {
    pub fn from_activities(date: NaiveDate, activities: Vec<Activity>) -> Self {
        let has_login = activities.iter().any(|a| a.kind == ActionTarget::CheckIn);
        let has_logout = activities.iter().any(|a| a.kind == ActionTarget::CheckOut);
        Self {
            date,
            has_login,
            has_logout,
            activities,
        }
    }
}
