//! Ledger module
//!
//! This module provides the `Ledger`, the aggregation store that folds
//! transfers into per-account running totals and outgoing histories.
//!
//! The Ledger is responsible for:
//! - Creating accounts the first time a name appears on either side of a transfer
//! - Keeping double entry: every insert debits one account and credits another
//!   by the same amount, so all totals always sum to zero
//! - Recording the transfer in the sender's history only
//! - Providing sorted listings for queries and export

use crate::types::{AccountEntry, AccountName, BankError, HistoryEntry, Record};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory aggregation store keyed by account name
#[derive(Debug, Default)]
pub struct Ledger {
    /// Map of account names to account states
    accounts: HashMap<AccountName, AccountEntry>,
}

impl Ledger {
    /// Create a ledger with no accounts
    pub fn new() -> Self {
        Ledger {
            accounts: HashMap::new(),
        }
    }

    /// Fold one transfer into the ledger
    ///
    /// Creates either account if absent, moves `amount` from `from` to `to`
    /// and appends `{to, amount, date, narrative}` to the history of `from`.
    ///
    /// Both new totals are computed before anything is written, so an
    /// overflow leaves the ledger exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `BankError::ArithmeticOverflow` if either running total would
    /// leave the representable decimal range.
    pub fn insert(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        date: NaiveDate,
        narrative: &str,
    ) -> Result<(), BankError> {
        let entry = HistoryEntry {
            to_account: to.to_string(),
            amount,
            date,
            narrative: narrative.to_string(),
        };

        // A transfer to self nets out, so the total is left as it is.
        if from == to {
            self.get_or_create_account(from).history.push(entry);
            return Ok(());
        }

        let new_from_total = self
            .total(from)
            .unwrap_or(Decimal::ZERO)
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow(from))?;
        let new_to_total = self
            .total(to)
            .unwrap_or(Decimal::ZERO)
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow(to))?;

        let sender = self.get_or_create_account(from);
        sender.total = new_from_total;
        sender.history.push(entry);

        self.get_or_create_account(to).total = new_to_total;

        Ok(())
    }

    /// Fold a canonical record into the ledger
    pub fn insert_record(&mut self, record: &Record) -> Result<(), BankError> {
        self.insert(
            &record.from_account,
            &record.to_account,
            record.amount,
            record.date,
            &record.narrative,
        )
    }

    /// Get a read-only view of one account
    pub fn account(&self, name: &str) -> Option<&AccountEntry> {
        self.accounts.get(name)
    }

    /// Running total of one account, if it exists
    pub fn total(&self, name: &str) -> Option<Decimal> {
        self.accounts.get(name).map(|account| account.total)
    }

    /// All accounts with their totals, sorted by name
    ///
    /// Names compare by code point, so upper-case names sort before
    /// lower-case ones.
    pub fn list_all(&self) -> Vec<(&str, Decimal)> {
        let mut totals: Vec<(&str, Decimal)> = self
            .accounts
            .iter()
            .map(|(name, account)| (name.as_str(), account.total))
            .collect();
        totals.sort_by(|a, b| a.0.cmp(b.0));
        totals
    }

    /// History of one account sorted by date
    ///
    /// The sort is stable: entries sharing a date keep their insertion order.
    ///
    /// # Errors
    ///
    /// Returns `BankError::AccountNotFound` for a name the ledger has never seen.
    pub fn list_account(&self, name: &str) -> Result<Vec<&HistoryEntry>, BankError> {
        let account = self
            .accounts
            .get(name)
            .ok_or_else(|| BankError::account_not_found(name))?;

        let mut history: Vec<&HistoryEntry> = account.history.iter().collect();
        history.sort_by_key(|entry| entry.date);
        Ok(history)
    }

    /// Every stored history entry paired with the account that sent it
    ///
    /// Accounts come out in name order and each account's entries in
    /// insertion order. Every entry appears exactly once.
    pub fn transfers(&self) -> Vec<(&str, &HistoryEntry)> {
        let mut names: Vec<&AccountName> = self.accounts.keys().collect();
        names.sort();

        names
            .into_iter()
            .flat_map(|name| {
                self.accounts[name]
                    .history
                    .iter()
                    .map(move |entry| (name.as_str(), entry))
            })
            .collect()
    }

    /// Number of accounts in the ledger
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger holds no accounts at all
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn get_or_create_account(&mut self, name: &str) -> &mut AccountEntry {
        self.accounts
            .entry(name.to_string())
            .or_insert_with(AccountEntry::new)
    }
}
