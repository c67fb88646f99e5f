//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: per-account aggregate state
//! - `record`: canonical transaction record and history entries
//! - `error`: Error types for the Support Bank

pub mod account;
pub mod error;
pub mod record;

pub use account::AccountEntry;
pub use error::{BankError, Field, FieldError};
pub use record::{AccountName, HistoryEntry, Record};
