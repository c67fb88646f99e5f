//! Transaction-related types for the Support Bank
//!
//! This module defines the canonical record produced by every input format
//! and the history entry kept against an account once a record is folded
//! into the ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Account identifier
///
/// Case-sensitive. Two names differing only in case are different accounts.
pub type AccountName = String;

/// Canonical transaction record
///
/// Every format adapter normalizes its rows into this shape. The amount is a
/// magnitude moving from `from_account` to `to_account`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Calendar date of the transfer (no time component)
    pub date: NaiveDate,

    /// Account the money leaves
    pub from_account: AccountName,

    /// Account the money arrives in
    pub to_account: AccountName,

    /// Free text, may be empty
    pub narrative: String,

    /// Exact decimal amount
    pub amount: Decimal,
}

/// One outgoing transfer as stored against the source account
///
/// The source account is implied by whose history holds the entry, so only
/// the destination is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub to_account: AccountName,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub narrative: String,
}

impl From<Record> for HistoryEntry {
    fn from(record: Record) -> Self {
        HistoryEntry {
            to_account: record.to_account,
            amount: record.amount,
            date: record.date,
            narrative: record.narrative,
        }
    }
}
