use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Journal;
use crate::db::queries::{ActivityFilter, list_activities};
use crate::errors::{AppError, AppResult};
use crate::models::action_target::ActionTarget;
use crate::ui::render;
use crate::utils::date::default_date;

/// Handle `history`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { date, all, kind } = cmd {
        let date = if *all {
            None
        } else {
            Some(default_date(date.as_deref())?)
        };

        let kind = match kind {
            Some(k) => Some(
                ActionTarget::from_kind_str(k).ok_or_else(|| AppError::InvalidKind(k.clone()))?,
            ),
            None => None,
        };

        let journal = Journal::open(&cfg.database)?;
        let activities = list_activities(
            &journal.conn,
            &ActivityFilter {
                date,
                kind,
                newest_first: true,
            },
        )?;

        render::print_activities(&activities);
    }

    Ok(())
}
