use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::utils::time::now_label;
use std::io::{self, Write};
use std::time::Duration;

/// Handle `clock`: print the local time, optionally refreshing every second
/// until Ctrl-C or `--count` ticks.
pub async fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Clock { watch, count } = cmd {
        if !*watch {
            println!("🕒 {}", now_label());
            return Ok(());
        }

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        let mut ticks = 0u64;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    print!("\r🕒 {}", now_label());
                    io::stdout().flush()?;
                    ticks += 1;
                    if count.is_some_and(|n| ticks >= n) {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
        println!();
    }

    Ok(())
}
