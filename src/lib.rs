//! Support Bank Library
//! # Overview
//!
//! This library imports transfers between people from CSV, JSON and XML
//! files, keeps a running total and an outgoing history per account, and
//! writes the result back out as CSV.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Record, AccountEntry, errors)
//! - [`io`] - Format adapters normalizing each file type into one record shape
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Account totals and histories
//!   - [`core::import`] - Row-isolated import driver
//!   - [`core::query`] - Display views
//!   - [`core::engine`] - Facade used by the text UI
//! - [`strategy`] - Export strategies selected by file extension
//! - [`diagnostics`] - Events reported by the core and the sinks that consume them
//! - [`cli`] - Command-line arguments and the interactive menu
//!
//! # Accounts
//!
//! Every transfer moves an amount from one named account to another:
//!
//! - the sender's total goes down and the receiver's goes up by the same amount
//! - the transfer is recorded in the sender's history only
//! - accounts are created the first time their name appears
//!
//! The sum of all totals is therefore always zero.

// Module declarations
pub mod cli;
pub mod core;
pub mod diagnostics;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{ImportSummary, Ledger, SupportBank};
pub use diagnostics::{ConsoleSink, Diagnostic, DiagnosticSink, TracingSink};
pub use io::{FileFormat, TransactionSource};
pub use strategy::ExportStrategy;
pub use types::{AccountEntry, AccountName, BankError, Field, FieldError, HistoryEntry, Record};
