use crate::ui::messages;

/// A blocking, user-visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(s) | Notice::Success(s) | Notice::Warning(s) | Notice::Error(s) => s,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Prints notices with the terminal message helpers.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Info(s) => messages::info(s),
            Notice::Success(s) => messages::success(s),
            Notice::Warning(s) => messages::warning(s),
            Notice::Error(s) => messages::error(s),
        }
    }
}
