use clap::Parser;
use std::path::PathBuf;

/// Import transfers between accounts and query the totals
#[derive(Parser, Debug)]
#[command(name = "support-bank")]
#[command(about = "Import transfers between accounts and query the totals", long_about = None)]
pub struct CliArgs {
    /// Default log filter, overridden by RUST_LOG
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log filter used when RUST_LOG is not set, e.g. 'info' or 'support_bank=debug'"
    )]
    pub log_level: String,

    /// Files imported before the menu starts
    #[arg(
        long = "import",
        value_name = "FILE",
        help = "Import a .csv, .json or .xml file at startup (repeatable)"
    )]
    pub import: Vec<PathBuf>,

    /// Skip the interactive menu
    #[arg(
        long = "no-menu",
        help = "Import the --import files, print every account total and exit"
    )]
    pub no_menu: bool,
}
