//! Diagnostic events and the sinks that consume them
//!
//! The core never writes to the console itself. Anything worth telling the
//! user or the log is described as a [`Diagnostic`] and handed to a
//! [`DiagnosticSink`]:
//!
//! - [`TracingSink`] turns events into structured `tracing` log lines
//! - [`ConsoleSink`] prints a human-readable line to any writer
//! - a `Vec<Diagnostic>` collects events (useful in tests)
//! - a pair `(A, B)` fans every event out to both sinks
//!
//! Sinks cannot fail. A console that refuses writes is ignored so that
//! reporting never aborts an import or a query.

use crate::types::Field;
use std::fmt;
use std::io::Write;

/// Something the core wants reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An import is about to read `file`
    ImportStarted { file: String },

    /// One row was left out of an import
    ///
    /// `row` is the displayed row number: zero-based index plus two, so the
    /// first data row under a header is row 2.
    RowSkipped {
        file: String,
        row: usize,
        field: Field,
        reason: String,
    },

    /// An import ran to the end of its rows
    ImportFinished {
        file: String,
        imported_rows: usize,
        total_rows: usize,
    },

    /// A lookup named an account the ledger has never seen
    AccountNotFound { name: String },

    /// An export wrote `rows` history entries to `file`
    ExportFinished { file: String, rows: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ImportStarted { file } => {
                write!(f, "Importing transactions from '{}'", file)
            }
            Diagnostic::RowSkipped {
                file, row, reason, ..
            } => write!(f, "Skipped row {} of '{}': {}", row, file, reason),
            Diagnostic::ImportFinished {
                file,
                imported_rows,
                total_rows,
            } => write!(
                f,
                "Imported {} of {} rows from '{}'",
                imported_rows, total_rows, file
            ),
            Diagnostic::AccountNotFound { name } => write!(f, "Name '{}' not found", name),
            Diagnostic::ExportFinished { file, rows } => {
                write!(f, "Exported {} rows to '{}'", rows, file)
            }
        }
    }
}

/// Consumer of diagnostic events
pub trait DiagnosticSink {
    fn report(&mut self, event: &Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn report(&mut self, event: &Diagnostic) {
        (**self).report(event);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Box<T> {
    fn report(&mut self, event: &Diagnostic) {
        (**self).report(event);
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, event: &Diagnostic) {
        self.push(event.clone());
    }
}

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn report(&mut self, event: &Diagnostic) {
        self.0.report(event);
        self.1.report(event);
    }
}

/// Writes every event as a structured `tracing` event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, event: &Diagnostic) {
        match event {
            Diagnostic::ImportStarted { file } => {
                tracing::info!(file = %file, "Import started");
            }
            Diagnostic::RowSkipped {
                file,
                row,
                field,
                reason,
            } => {
                tracing::warn!(file = %file, row, field = %field, reason = %reason, "Row skipped");
            }
            Diagnostic::ImportFinished {
                file,
                imported_rows,
                total_rows,
            } => {
                tracing::info!(file = %file, imported_rows, total_rows, "Import finished");
            }
            Diagnostic::AccountNotFound { name } => {
                tracing::warn!(name = %name, "Account not found");
            }
            Diagnostic::ExportFinished { file, rows } => {
                tracing::info!(file = %file, rows, "Export finished");
            }
        }
    }
}

/// Prints one line per event to a writer
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        ConsoleSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticSink for ConsoleSink<W> {
    fn report(&mut self, event: &Diagnostic) {
        // A broken console must not take the import down with it.
        let _ = writeln!(self.out, "{}", event);
    }
}
