//! Core business logic module
//!
//! This module contains the transaction aggregation components:
//! - `ledger` - Account totals and outgoing histories
//! - `import` - Drives a format adapter row by row into the ledger
//! - `query` - Display views of the ledger
//! - `engine` - The facade the text UI talks to

pub mod engine;
pub mod import;
pub mod ledger;
pub mod query;

pub use engine::SupportBank;
pub use import::{import_source, ImportSummary};
pub use ledger::Ledger;
pub use query::{currency, AccountStatement, AccountTotal};
