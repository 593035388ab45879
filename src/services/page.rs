use crate::errors::AppResult;
use crate::models::submission::SubmissionReceipt;

/// The view that displays attendance state and must be refreshed after an
/// accepted submission.
pub trait Page: Send + Sync {
    fn refresh(&self, receipt: &SubmissionReceipt) -> AppResult<()>;
}

/// A page with nothing to refresh.
pub struct StaticPage;

impl Page for StaticPage {
    fn refresh(&self, _receipt: &SubmissionReceipt) -> AppResult<()> {
        Ok(())
    }
}
