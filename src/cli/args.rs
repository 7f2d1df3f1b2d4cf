use clap::Parser;
use std::path::PathBuf;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE: &str = "card.s3db";

/// Interactive banking system backed by a local SQLite database
#[derive(Parser, Debug)]
#[command(name = "simple-banking")]
#[command(about = "Interactive banking system backed by a local SQLite database", long_about = None)]
pub struct CliArgs {
    /// SQLite database holding the card table
    #[arg(
        long = "database",
        value_name = "PATH",
        env = "BANKING_DATABASE",
        default_value = DEFAULT_DATABASE,
        help = "Path to the SQLite database file, or ':memory:' for a throwaway database"
    )]
    pub database: PathBuf,

    /// Log verbosity, written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        env = "BANKING_LOG",
        default_value = "warn",
        help = "Log level: error, warn, info, debug or trace (RUST_LOG overrides)"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Filter directive for the tracing subscriber
    pub fn log_filter(&self) -> String {
        format!("simple_banking={}", self.log_level)
    }
}
