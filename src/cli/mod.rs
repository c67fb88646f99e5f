// CLI module
// Command-line arguments and the interactive menu

mod args;
pub mod menu;

pub use args::CliArgs;
pub use menu::run_menu;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (unknown flag, missing value, or --help), clap displays
/// an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
