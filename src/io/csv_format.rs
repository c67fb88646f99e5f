//! CSV format handling for transaction import and export
//!
//! This module centralizes all CSV format concerns, providing:
//! - `CsvSource`, the delimited-text input adapter
//! - Column resolution from the header row
//! - Serialization of ledger transfers back to CSV
//!
//! # Input Layout
//!
//! Files written by the bank's legacy tools have the header
//! `Date,From,To,Narrative,Amount`, dates as `DD/MM/YYYY` and the columns in
//! that fixed order. Files written by [`write_transfers_csv`] have the header
//! `fromAccount,toAccount,amount,date,narrative` and `YYYY-MM-DD` dates. When
//! the header names all five fields the columns are located by name,
//! otherwise the legacy order is assumed.

use crate::io::{parse_account, parse_amount, parse_date, RowSource};
use crate::types::{BankError, Field, FieldError, HistoryEntry};
use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header written by the exporter
pub const EXPORT_HEADER: [&str; 5] = ["fromAccount", "toAccount", "amount", "date", "narrative"];

/// Date formats accepted in CSV input, legacy first
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Zero-based positions of the five fields within a CSV record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub date: usize,
    pub from: usize,
    pub to: usize,
    pub narrative: usize,
    pub amount: usize,
}

impl Columns {
    /// Fixed legacy order: date, from, to, narrative, amount
    pub const LEGACY: Columns = Columns {
        date: 0,
        from: 1,
        to: 2,
        narrative: 3,
        amount: 4,
    };

    /// Locate the fields by header name, falling back to [`Columns::LEGACY`]
    ///
    /// Header names are compared case-insensitively after trimming. `from`
    /// and `fromAccount` (likewise `to` and `toAccount`) are equivalent.
    pub fn from_header(header: &StringRecord) -> Self {
        let find = |names: &[&str]| {
            header.iter().position(|column| {
                let column = column.trim();
                names.iter().any(|name| column.eq_ignore_ascii_case(name))
            })
        };

        let located = (|| {
            Some(Columns {
                date: find(&["date"])?,
                from: find(&["from", "fromAccount"])?,
                to: find(&["to", "toAccount"])?,
                narrative: find(&["narrative"])?,
                amount: find(&["amount"])?,
            })
        })();

        located.unwrap_or(Columns::LEGACY)
    }
}

/// One data row of a CSV file together with its column layout
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    record: StringRecord,
    columns: Columns,
}

impl CsvRow {
    pub fn new(record: StringRecord, columns: Columns) -> Self {
        CsvRow { record, columns }
    }
}

/// Delimited-text input adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSource { path: path.into() }
    }
}

impl RowSource for CsvSource {
    type Row = CsvRow;

    fn path(&self) -> &Path {
        &self.path
    }

    /// Read all data rows, skipping the header line
    ///
    /// Records are read as bytes and decoded lossily so that one badly
    /// encoded row cannot abort the whole file. Rows may have any number of
    /// fields; a short row surfaces later as a missing field.
    fn read_rows(&self) -> Result<Vec<CsvRow>, BankError> {
        let file = File::open(&self.path).map_err(|e| BankError::open_failed(&self.path, e))?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = reader
            .byte_headers()
            .map_err(|e| BankError::parse_error(&self.path, e))?;
        let columns = Columns::from_header(&StringRecord::from_byte_record_lossy(header.clone()));

        let mut rows = Vec::new();
        let mut record = ByteRecord::new();
        while reader
            .read_byte_record(&mut record)
            .map_err(|e| BankError::parse_error(&self.path, e))?
        {
            rows.push(CsvRow::new(
                StringRecord::from_byte_record_lossy(record.clone()),
                columns,
            ));
        }

        Ok(rows)
    }

    fn extract_from(&self, row: &CsvRow) -> Result<String, FieldError> {
        parse_account(Field::From, row.record.get(row.columns.from))
    }

    fn extract_to(&self, row: &CsvRow) -> Result<String, FieldError> {
        parse_account(Field::To, row.record.get(row.columns.to))
    }

    fn extract_amount(&self, row: &CsvRow) -> Result<Decimal, FieldError> {
        parse_amount(row.record.get(row.columns.amount))
    }

    fn extract_date(&self, row: &CsvRow) -> Result<NaiveDate, FieldError> {
        parse_date(row.record.get(row.columns.date), &DATE_FORMATS)
    }

    fn extract_narrative(&self, row: &CsvRow) -> Result<String, FieldError> {
        row.record
            .get(row.columns.narrative)
            .map(str::to_string)
            .ok_or_else(|| FieldError::missing(Field::Narrative))
    }
}

/// One exported CSV row
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "fromAccount")]
    from_account: &'a str,
    #[serde(rename = "toAccount")]
    to_account: &'a str,
    amount: String,
    date: String,
    narrative: &'a str,
}

/// Write transfers as CSV
///
/// Writes the header `fromAccount,toAccount,amount,date,narrative` followed by
/// one row per transfer. Amounts are plain decimal text and dates are
/// `YYYY-MM-DD`.
///
/// # Returns
///
/// * `Ok(n)` with the number of data rows written
/// * `Err(String)` if a write error occurred
pub fn write_transfers_csv<'a, I>(transfers: I, output: &mut dyn Write) -> Result<usize, String>
where
    I: IntoIterator<Item = (&'a str, &'a HistoryEntry)>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut rows = 0;
    for (from, entry) in transfers {
        writer
            .serialize(ExportRow {
                from_account: from,
                to_account: &entry.to_account,
                amount: entry.amount.to_string(),
                date: entry.date.format("%Y-%m-%d").to_string(),
                narrative: &entry.narrative,
            })
            .map_err(|e| format!("Failed to write transfer record: {}", e))?;
        rows += 1;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    fn legacy_row(fields: &[&str]) -> CsvRow {
        CsvRow::new(record(fields), Columns::LEGACY)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::legacy(&["Date", "From", "To", "Narrative", "Amount"], Columns::LEGACY)]
    #[case::export(
        &["fromAccount", "toAccount", "amount", "date", "narrative"],
        Columns { date: 3, from: 0, to: 1, narrative: 4, amount: 2 }
    )]
    #[case::padded_mixed_case(
        &[" AMOUNT ", "Narrative", "to", "FROM", "date"],
        Columns { date: 4, from: 3, to: 2, narrative: 1, amount: 0 }
    )]
    #[case::unknown_header(&["a", "b", "c", "d", "e"], Columns::LEGACY)]
    #[case::incomplete_header(&["fromAccount", "toAccount", "amount"], Columns::LEGACY)]
    fn test_columns_from_header(#[case] header: &[&str], #[case] expected: Columns) {
        assert_eq!(Columns::from_header(&record(header)), expected);
    }

    #[test]
    fn test_extract_legacy_row() {
        let source = CsvSource::new("t.csv");
        let row = legacy_row(&["01/01/2014", "Jon A", "Sarah T", "Pokemon Training", "7.8"]);

        assert_eq!(source.extract_from(&row), Ok("Jon A".to_string()));
        assert_eq!(source.extract_to(&row), Ok("Sarah T".to_string()));
        assert_eq!(source.extract_amount(&row), Ok(Decimal::from_str("7.8").unwrap()));
        assert_eq!(source.extract_date(&row), Ok(date(2014, 1, 1)));
        assert_eq!(
            source.extract_narrative(&row),
            Ok("Pokemon Training".to_string())
        );
    }

    #[rstest]
    #[case::bad_amount(
        &["01/01/2014", "Jon A", "Sarah T", "x", "tea"],
        Field::Amount
    )]
    #[case::bad_date(&["2014/13/01", "Jon A", "Sarah T", "x", "1"], Field::Date)]
    #[case::impossible_date(&["31/02/2014", "Jon A", "Sarah T", "x", "1"], Field::Date)]
    #[case::empty_from(&["01/01/2014", "", "Sarah T", "x", "1"], Field::From)]
    fn test_extract_reports_field(#[case] fields: &[&str], #[case] field: Field) {
        let source = CsvSource::new("t.csv");
        let row = legacy_row(fields);

        let error = match field {
            Field::Amount => source.extract_amount(&row).unwrap_err(),
            Field::Date => source.extract_date(&row).unwrap_err(),
            Field::From => source.extract_from(&row).unwrap_err(),
            _ => unreachable!(),
        };
        assert_eq!(error.field(), field);
    }

    #[test]
    fn test_short_row_has_missing_fields() {
        let source = CsvSource::new("t.csv");
        let row = legacy_row(&["01/01/2014", "Jon A", "Sarah T"]);

        assert_eq!(
            source.extract_narrative(&row),
            Err(FieldError::missing(Field::Narrative))
        );
        assert_eq!(
            source.extract_amount(&row),
            Err(FieldError::missing(Field::Amount))
        );
    }

    #[test]
    fn test_read_rows_skips_header() {
        let file = create_temp_csv(
            "Date,From,To,Narrative,Amount\n\
             01/01/2014,Jon A,Sarah T,Pokemon Training,7.8\n\
             01/01/2014,Stephen S,Tim L,Cinema,6\n",
        );
        let source = CsvSource::new(file.path());

        let rows = source.read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(source.extract_from(&rows[1]), Ok("Stephen S".to_string()));
    }

    #[test]
    fn test_read_rows_header_only() {
        let file = create_temp_csv("Date,From,To,Narrative,Amount\n");
        let source = CsvSource::new(file.path());
        assert!(source.read_rows().unwrap().is_empty());
    }

    #[test]
    fn test_read_rows_keeps_quoted_commas() {
        let file = create_temp_csv(
            "Date,From,To,Narrative,Amount\n\
             02/01/2014,Jon A,Ben B,\"Lunch, with friends\",4.20\n",
        );
        let source = CsvSource::new(file.path());

        let rows = source.read_rows().unwrap();
        assert_eq!(
            source.extract_narrative(&rows[0]),
            Ok("Lunch, with friends".to_string())
        );
    }

    #[test]
    fn test_read_rows_missing_file() {
        let source = CsvSource::new("nonexistent.csv");
        assert_eq!(
            source.read_rows(),
            Err(BankError::FileNotFound {
                path: "nonexistent.csv".to_string()
            })
        );
    }

    #[test]
    fn test_read_rows_export_layout() {
        let file = create_temp_csv(
            "fromAccount,toAccount,amount,date,narrative\n\
             Jon A,Sarah T,7.8,2014-01-01,Pokemon Training\n",
        );
        let source = CsvSource::new(file.path());

        let rows = source.read_rows().unwrap();
        assert_eq!(source.extract_date(&rows[0]), Ok(date(2014, 1, 1)));
        assert_eq!(source.extract_to(&rows[0]), Ok("Sarah T".to_string()));
        assert_eq!(
            source.extract_amount(&rows[0]),
            Ok(Decimal::from_str("7.8").unwrap())
        );
    }

    #[test]
    fn test_write_transfers_csv() {
        let first = HistoryEntry {
            to_account: "Sarah T".to_string(),
            amount: Decimal::from_str("7.80").unwrap(),
            date: date(2014, 1, 1),
            narrative: "Pokemon Training".to_string(),
        };
        let second = HistoryEntry {
            to_account: "Jon A".to_string(),
            amount: Decimal::from_str("0.5").unwrap(),
            date: date(2014, 12, 31),
            narrative: "Sweets, lots".to_string(),
        };

        let mut output = Vec::new();
        let rows =
            write_transfers_csv(vec![("Jon A", &first), ("Ben B", &second)], &mut output).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "fromAccount,toAccount,amount,date,narrative\n\
             Jon A,Sarah T,7.80,2014-01-01,Pokemon Training\n\
             Ben B,Jon A,0.5,2014-12-31,\"Sweets, lots\"\n"
        );
    }

    #[test]
    fn test_write_transfers_csv_empty() {
        let mut output = Vec::new();
        let rows = write_transfers_csv(Vec::new(), &mut output).unwrap();

        assert_eq!(rows, 0);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "fromAccount,toAccount,amount,date,narrative\n"
        );
    }
}
