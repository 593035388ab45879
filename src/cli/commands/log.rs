use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Journal;
use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::ui::render;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let journal = Journal::open(&cfg.database)?;
        render::print_log(&load_log(&journal.conn)?);
    }

    Ok(())
}
