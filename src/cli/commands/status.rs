use crate::config::Config;
use crate::db::Journal;
use crate::db::queries::day_status;
use crate::errors::AppResult;
use crate::ui::render;
use crate::utils::date::today;

/// Handle `status`: today's dashboard from the local journal.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let journal = Journal::open(&cfg.database)?;
    let status = day_status(&journal.conn, today())?;
    render::print_status(&status);
    Ok(())
}
