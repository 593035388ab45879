use crate::db::log::ttlog;
use crate::db::queries::{day_status, insert_activity};
use crate::db::Journal;
use crate::errors::AppResult;
use crate::models::activity::Activity;
use crate::models::submission::SubmissionReceipt;
use crate::services::page::Page;
use crate::ui::render;
use std::path::PathBuf;

/// Refreshes the terminal "dashboard": records the accepted action in the
/// local journal, then prints today's status.
pub struct JournalPage {
    database: PathBuf,
}

impl JournalPage {
    pub fn new<P: Into<PathBuf>>(database: P) -> Self {
        Self {
            database: database.into(),
        }
    }
}

impl Page for JournalPage {
    fn refresh(&self, receipt: &SubmissionReceipt) -> AppResult<()> {
        let journal = Journal::open(&self.database)?;
        let activity = Activity::from_receipt(receipt);
        let id = insert_activity(&journal.conn, &activity)?;

        if let Err(e) = ttlog(
            &journal.conn,
            activity.kind.kind_str(),
            &activity.location,
            &format!("{} recorded as activity #{}", activity.kind.title(), id),
        ) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        println!();
        render::print_status(&day_status(&journal.conn, activity.date)?);
        Ok(())
    }
}
