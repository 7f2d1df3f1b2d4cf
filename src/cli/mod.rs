// CLI module
// Command-line arguments and the interactive menu loop

mod args;
mod menu;

pub use args::{CliArgs, DEFAULT_DATABASE};
pub use menu::{user_message, Terminal};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, or the --help flag), clap displays an
/// error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
