use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::Journal;
use crate::db::log::ttlog;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite journal and its migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing rcheckin…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Journal    : {}", db_path.display());

    let journal = Journal::open(&db_path)?;

    if let Err(e) = ttlog(
        &journal.conn,
        "init",
        if cli.test { "test journal" } else { "journal" },
        &format!("Journal initialized at {}", db_path.display()),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("✅ Journal initialized at {}", db_path.display());
    Ok(())
}
