//! Simple Banking System CLI
//!
//! Interactive terminal banking backed by a local SQLite database.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --database bank.s3db
//! cargo run -- --database :memory: --log-level debug
//! ```
//!
//! The menu dialogue runs on stdin/stdout; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: The user chose exit, or input ended
//! - 1: The database could not be opened, or a storage/terminal error ended the session
//! - 2: Invalid command-line arguments

use simple_banking::cli;
use simple_banking::{BankEngine, SqliteCardStore};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // RUST_LOG, when set, takes precedence over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let store = match SqliteCardStore::open(&args.database).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to open card store: {e}");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let engine = BankEngine::new(store);

    let mut terminal = cli::Terminal::new(io::stdin().lock(), io::stdout());
    let result = terminal.run(&engine).await;
    engine.shutdown().await;

    if let Err(e) = result {
        tracing::error!("session ended: {e}");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
