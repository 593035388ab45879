//! rcheckin main entrypoint.

use rcheckin::run;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        if !e.is_notified() {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}
