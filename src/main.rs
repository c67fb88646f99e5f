//! Support Bank CLI
//!
//! Interactive front end for importing transfers and querying account totals.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --import Transactions2014.csv --import DodgyTransactions2015.csv
//! cargo run -- --no-menu --import Transactions2013.json > totals.txt
//! RUST_LOG=support_bank=debug cargo run -- --import Transactions2012.xml
//! ```
//!
//! Files named with `--import` are loaded before the menu starts. With
//! `--no-menu` the program prints every account total and exits instead of
//! starting the menu. Log lines go to stderr; the filter comes from
//! `RUST_LOG` when set, otherwise from `--log-level`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (a `--import` file failed in `--no-menu` mode, console unusable, etc.)

use support_bank::cli;
use support_bank::{ConsoleSink, DiagnosticSink, SupportBank, TracingSink};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

/// Install the global stderr subscriber
///
/// `RUST_LOG` wins over `level`; an unparsable `level` falls back to `warn`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    init_logging(&args.log_level);

    // In the menu the user sees diagnostics inline; otherwise they only go to the log
    let sink: Box<dyn DiagnosticSink> = if args.no_menu {
        Box::new(TracingSink)
    } else {
        Box::new((TracingSink, ConsoleSink::new(io::stdout())))
    };
    let mut bank = SupportBank::new(sink);

    let mut failed = false;
    for path in &args.import {
        if let Err(e) = bank.import_file(path) {
            eprintln!("Error: {}", e);
            failed = true;
        }
    }

    if args.no_menu {
        for total in bank.list_all() {
            println!("{}", total);
        }
        if failed {
            process::exit(1);
        }
        return;
    }

    if let Err(e) = cli::run_menu(&mut bank, io::stdin().lock(), io::stdout()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
