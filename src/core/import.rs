//! Import driver
//!
//! Runs one format adapter over its rows and feeds every complete row into
//! the ledger.
//!
//! # Row Isolation
//!
//! The five fields of a row are extracted in a fixed order: from, to,
//! amount, date, narrative. The first field that fails ends that row: the
//! failure is reported with the file, the displayed row number and the field,
//! and the driver moves on. A bad row never stops the import.
//!
//! Only a failure to read the file as a whole aborts, and that happens before
//! any row reaches the ledger.

use crate::core::ledger::Ledger;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::io::{RowSource, TransactionSource};
use crate::types::{BankError, Field, FieldError, Record};

/// Offset between a zero-based row index and the row number shown to users
///
/// One for counting from one, one for the header line.
pub const DISPLAY_ROW_OFFSET: usize = 2;

/// Outcome of a completed import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Rows that reached the ledger
    pub imported_rows: usize,
    /// Rows read from the file
    pub total_rows: usize,
}

impl ImportSummary {
    pub fn skipped_rows(&self) -> usize {
        self.total_rows - self.imported_rows
    }
}

/// Extract a canonical record from one row
///
/// Stops at the first field that fails.
pub fn extract_record<S: RowSource>(source: &S, row: &S::Row) -> Result<Record, FieldError> {
    let from_account = source.extract_from(row)?;
    let to_account = source.extract_to(row)?;
    let amount = source.extract_amount(row)?;
    let date = source.extract_date(row)?;
    let narrative = source.extract_narrative(row)?;

    Ok(Record {
        date,
        from_account,
        to_account,
        narrative,
        amount,
    })
}

/// Import every row of `source` into `ledger`
///
/// # Returns
///
/// * `Ok(ImportSummary)` once every row has been tried
/// * `Err(BankError)` if the file could not be read at all; the ledger is untouched
pub fn import<S, D>(
    source: &S,
    ledger: &mut Ledger,
    sink: &mut D,
) -> Result<ImportSummary, BankError>
where
    S: RowSource,
    D: DiagnosticSink + ?Sized,
{
    let file = source.path().display().to_string();
    sink.report(&Diagnostic::ImportStarted { file: file.clone() });

    let rows = source.read_rows()?;
    let mut summary = ImportSummary {
        imported_rows: 0,
        total_rows: rows.len(),
    };

    for (index, row) in rows.iter().enumerate() {
        let outcome = extract_record(source, row)
            .map_err(|e| (e.field(), e.to_string()))
            .and_then(|record| {
                // Overflow is the only way the ledger refuses a record.
                ledger
                    .insert_record(&record)
                    .map_err(|e| (Field::Amount, e.to_string()))
            });

        match outcome {
            Ok(()) => summary.imported_rows += 1,
            Err((field, reason)) => sink.report(&Diagnostic::RowSkipped {
                file: file.clone(),
                row: index + DISPLAY_ROW_OFFSET,
                field,
                reason,
            }),
        }
    }

    sink.report(&Diagnostic::ImportFinished {
        file,
        imported_rows: summary.imported_rows,
        total_rows: summary.total_rows,
    });

    Ok(summary)
}

/// Import through whichever adapter the selector chose
pub fn import_source<D>(
    source: &TransactionSource,
    ledger: &mut Ledger,
    sink: &mut D,
) -> Result<ImportSummary, BankError>
where
    D: DiagnosticSink + ?Sized,
{
    match source {
        TransactionSource::Csv(csv) => import(csv, ledger, sink),
        TransactionSource::Json(json) => import(json, ledger, sink),
        TransactionSource::Xml(xml) => import(xml, ledger, sink),
    }
}
