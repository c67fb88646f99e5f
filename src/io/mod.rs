//! I/O module
//!
//! Reads transaction files into loosely-typed rows and extracts the canonical
//! fields from each row.
//!
//! # Components
//!
//! - `csv_format` - delimited text, `DD/MM/YYYY` dates
//! - `json_format` - array of objects, `YYYY-MM-DD` dates
//! - `xml_format` - one element per transaction, spreadsheet serial dates
//!
//! Every adapter implements [`RowSource`]. [`TransactionSource`] picks the
//! adapter for a file name by its extension.

pub mod csv_format;
pub mod json_format;
pub mod xml_format;

pub use csv_format::CsvSource;
pub use json_format::JsonSource;
pub use xml_format::XmlSource;

use crate::types::{BankError, Field, FieldError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;

/// A file of transaction rows in one particular format
///
/// Reading is all-or-nothing: `read_rows` fails for a file that cannot be
/// opened or whose overall structure is broken. Extraction is per field, so
/// a single bad value can be attributed to the field it came from.
pub trait RowSource {
    /// One loosely-typed row as read from the file
    type Row;

    /// Path of the file this source reads
    fn path(&self) -> &Path;

    /// Read every row of the file
    fn read_rows(&self) -> Result<Vec<Self::Row>, BankError>;

    fn extract_from(&self, row: &Self::Row) -> Result<String, FieldError>;

    fn extract_to(&self, row: &Self::Row) -> Result<String, FieldError>;

    fn extract_amount(&self, row: &Self::Row) -> Result<Decimal, FieldError>;

    fn extract_date(&self, row: &Self::Row) -> Result<NaiveDate, FieldError>;

    fn extract_narrative(&self, row: &Self::Row) -> Result<String, FieldError>;
}

/// Input adapter chosen by file extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSource {
    Csv(CsvSource),
    Json(JsonSource),
    Xml(XmlSource),
}

impl TransactionSource {
    /// Select the adapter for `path`
    ///
    /// Returns `None` for an unsupported extension. No file is opened here.
    pub fn for_file(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match FileFormat::from_path(path)? {
            FileFormat::Csv => Some(TransactionSource::Csv(CsvSource::new(path))),
            FileFormat::Json => Some(TransactionSource::Json(JsonSource::new(path))),
            FileFormat::Xml => Some(TransactionSource::Xml(XmlSource::new(path))),
        }
    }

    /// Like [`TransactionSource::for_file`], reporting an unsupported extension as an error
    pub fn select(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        Self::for_file(path).ok_or_else(|| BankError::unsupported_file_type(path))
    }

    pub fn path(&self) -> &Path {
        match self {
            TransactionSource::Csv(source) => source.path(),
            TransactionSource::Json(source) => source.path(),
            TransactionSource::Xml(source) => source.path(),
        }
    }

    pub fn format(&self) -> FileFormat {
        match self {
            TransactionSource::Csv(_) => FileFormat::Csv,
            TransactionSource::Json(_) => FileFormat::Json,
            TransactionSource::Xml(_) => FileFormat::Xml,
        }
    }
}

/// File formats known to the importer and exporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Xml,
}

impl FileFormat {
    /// Match the extension of `path`, ignoring ASCII case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(FileFormat::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(FileFormat::Json)
        } else if ext.eq_ignore_ascii_case("xml") {
            Some(FileFormat::Xml)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Json => "JSON",
            FileFormat::Xml => "XML",
        }
    }
}

/// Account names must be non-empty; they are otherwise kept verbatim
pub(crate) fn parse_account(field: Field, value: Option<&str>) -> Result<String, FieldError> {
    match value {
        None => Err(FieldError::missing(field)),
        Some(name) if name.trim().is_empty() => Err(FieldError::empty(field)),
        Some(name) => Ok(name.to_string()),
    }
}

/// Parse amount text as an exact decimal
///
/// Accepts plain decimals and scientific notation (`1.5e2`), the latter
/// because numeric JSON literals may use it. Plain text that cannot be held
/// without rounding is rejected rather than silently changed.
pub(crate) fn parse_amount(value: Option<&str>) -> Result<Decimal, FieldError> {
    let raw = value.ok_or_else(|| FieldError::missing(Field::Amount))?;
    let text = raw.trim();
    if text.is_empty() {
        return Err(FieldError::empty(Field::Amount));
    }

    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str_exact(text)
    };
    parsed.map_err(|e| FieldError::invalid(Field::Amount, raw, e))
}

/// Parse date text against each format in turn
pub(crate) fn parse_date(value: Option<&str>, formats: &[&str]) -> Result<NaiveDate, FieldError> {
    let raw = value.ok_or_else(|| FieldError::missing(Field::Date))?;
    let text = raw.trim();
    if text.is_empty() {
        return Err(FieldError::empty(Field::Date));
    }

    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| {
            FieldError::invalid(Field::Date, raw, format!("expected {}", formats.join(" or ")))
        })
}
