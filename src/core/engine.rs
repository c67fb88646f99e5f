//! Support Bank engine
//!
//! This module provides `SupportBank`, the facade the text UI talks to. It
//! owns the ledger and a diagnostic sink and exposes the four operations the
//! UI needs:
//!
//! - `list_all` - every account with its total
//! - `list_account` - one account's date-sorted history
//! - `import` - fold a transaction file into the ledger
//! - `export` - write the ledger back out
//!
//! Row-level and lookup failures are reported through the sink. Selection
//! and whole-file failures are returned to the caller.

use crate::core::import::{import_source, ImportSummary};
use crate::core::ledger::Ledger;
use crate::core::query::{self, AccountStatement, AccountTotal};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::io::TransactionSource;
use crate::strategy::ExportStrategy;
use crate::types::BankError;
use std::path::Path;

/// Ledger plus the sink its diagnostics go to
pub struct SupportBank<D: DiagnosticSink> {
    ledger: Ledger,
    sink: D,
}

impl<D: DiagnosticSink> SupportBank<D> {
    /// Create a bank with an empty ledger
    pub fn new(sink: D) -> Self {
        SupportBank {
            ledger: Ledger::new(),
            sink,
        }
    }

    /// Read-only access to the ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Every account with its total, sorted by name
    pub fn list_all(&self) -> Vec<AccountTotal<'_>> {
        query::list_all(&self.ledger)
    }

    /// Date-sorted history of one account
    ///
    /// An unknown name is reported to the sink as well as returned.
    pub fn list_account<'a>(&'a mut self, name: &'a str) -> Result<AccountStatement<'a>, BankError> {
        match query::list_account(&self.ledger, name) {
            Ok(statement) => Ok(statement),
            Err(error) => {
                self.sink.report(&Diagnostic::AccountNotFound {
                    name: name.to_string(),
                });
                Err(error)
            }
        }
    }

    /// Import one file through an already selected adapter
    pub fn import(&mut self, source: &TransactionSource) -> Result<ImportSummary, BankError> {
        import_source(source, &mut self.ledger, &mut self.sink).inspect_err(|error| {
            tracing::error!(file = %source.path().display(), %error, "Import failed");
        })
    }

    /// Select the adapter for `path` and import it
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<ImportSummary, BankError> {
        let source = TransactionSource::select(path)?;
        self.import(&source)
    }

    /// Write the ledger out through an already selected strategy
    ///
    /// Returns the number of rows written.
    pub fn export(&mut self, strategy: &ExportStrategy) -> Result<usize, BankError> {
        let rows = strategy.export(&self.ledger).inspect_err(|error| {
            tracing::error!(file = %strategy.path().display(), %error, "Export failed");
        })?;

        self.sink.report(&Diagnostic::ExportFinished {
            file: strategy.path().display().to_string(),
            rows,
        });
        Ok(rows)
    }

    /// Select the strategy for `path` and export to it
    pub fn export_file(&mut self, path: impl AsRef<Path>) -> Result<usize, BankError> {
        let strategy = ExportStrategy::select(path)?;
        self.export(&strategy)
    }
}
