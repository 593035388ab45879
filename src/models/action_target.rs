use serde::Serialize;

/// The two actions a staff member can perform from the action modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionTarget {
    CheckIn,
    CheckOut,
}

impl ActionTarget {
    /// Title shown on the modal while this action is bound.
    pub fn title(&self) -> &'static str {
        match self {
            ActionTarget::CheckIn => "Check In",
            ActionTarget::CheckOut => "Check Out",
        }
    }

    /// Backend endpoint the form is posted to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ActionTarget::CheckIn => "/staff/login",
            ActionTarget::CheckOut => "/staff/logout",
        }
    }

    /// Activity kind as recorded by the backend and the local journal.
    pub fn kind_str(&self) -> &'static str {
        match self {
            ActionTarget::CheckIn => "login",
            ActionTarget::CheckOut => "logout",
        }
    }

    pub fn from_kind_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "login" | "in" | "checkin" => Some(ActionTarget::CheckIn),
            "logout" | "out" | "checkout" => Some(ActionTarget::CheckOut),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
