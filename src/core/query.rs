//! Read-only views of the ledger for display
//!
//! Amounts are shown as pounds to two decimal places and dates as
//! `DD/MM/YYYY`.

use crate::core::ledger::Ledger;
use crate::types::{BankError, HistoryEntry};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Format an amount as currency, e.g. `£7.80` or `-£1.25`
pub fn currency(amount: Decimal) -> String {
    let pence = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if pence.is_sign_negative() && !pence.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}£{:.2}", sign, pence.abs())
}

/// One line of the all-accounts listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountTotal<'a> {
    pub name: &'a str,
    pub total: Decimal,
}

impl fmt::Display for AccountTotal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, currency(self.total))
    }
}

/// The date-sorted history of one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatement<'a> {
    pub name: &'a str,
    pub entries: Vec<&'a HistoryEntry>,
}

impl fmt::Display for AccountStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transactions for '{}'", self.name)?;
        for entry in &self.entries {
            write!(
                f,
                "\n  {} to {} on {}: '{}'",
                currency(entry.amount),
                entry.to_account,
                entry.date.format("%d/%m/%Y"),
                entry.narrative
            )?;
        }
        Ok(())
    }
}

/// Every account with its total, sorted by name
pub fn list_all(ledger: &Ledger) -> Vec<AccountTotal<'_>> {
    ledger
        .list_all()
        .into_iter()
        .map(|(name, total)| AccountTotal { name, total })
        .collect()
}

/// Date-sorted history of `name`
///
/// # Errors
///
/// `BankError::AccountNotFound` if the ledger has never seen `name`.
pub fn list_account<'a>(ledger: &'a Ledger, name: &'a str) -> Result<AccountStatement<'a>, BankError> {
    let entries = ledger.list_account(name)?;
    Ok(AccountStatement { name, entries })
}
