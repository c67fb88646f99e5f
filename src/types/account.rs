//! Account-related types for the Support Bank
//!
//! This module defines the per-account aggregate kept by the ledger.

use super::record::HistoryEntry;
use rust_decimal::Decimal;

/// Aggregate state of a single account
///
/// Created lazily the first time an account name appears on either side of
/// a transfer and never removed afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountEntry {
    /// Signed running balance
    ///
    /// Decremented by every outgoing amount and incremented by every incoming
    /// amount. Summed across the whole ledger this is always zero.
    pub total: Decimal,

    /// Outgoing transfers in insertion order
    ///
    /// Incoming transfers are not mirrored here; they only show up in the
    /// sender's history.
    pub history: Vec<HistoryEntry>,
}

impl AccountEntry {
    /// Create an account with a zero balance and no history
    pub fn new() -> Self {
        AccountEntry {
            total: Decimal::ZERO,
            history: Vec::new(),
        }
    }
}
