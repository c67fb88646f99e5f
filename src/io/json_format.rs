//! JSON input adapter
//!
//! A JSON transaction file is an array of objects:
//!
//! ```json
//! [
//!   {
//!     "date": "2013-01-05",
//!     "fromAccount": "Jon A",
//!     "toAccount": "Sarah T",
//!     "narrative": "Pokemon Training",
//!     "amount": 7.8
//!   }
//! ]
//! ```
//!
//! Numeric amounts are read from their literal text (serde_json is built with
//! `arbitrary_precision`), so `7.8` becomes exactly `7.8` rather than the
//! nearest binary float.

use crate::io::{parse_account, parse_amount, parse_date, RowSource};
use crate::types::{BankError, Field, FieldError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::{Path, PathBuf};

const KEY_DATE: &str = "date";
const KEY_FROM: &str = "fromAccount";
const KEY_TO: &str = "toAccount";
const KEY_NARRATIVE: &str = "narrative";
const KEY_AMOUNT: &str = "amount";

const DATE_FORMATS: [&str; 1] = ["%Y-%m-%d"];

/// JSON input adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonSource { path: path.into() }
    }
}

/// Text of a string field; any other JSON type is a malformed value
fn string_field(row: &Value, key: &str, field: Field) -> Result<Option<String>, FieldError> {
    match row.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(FieldError::invalid(field, &other.to_string(), "expected a string")),
    }
}

impl RowSource for JsonSource {
    type Row = Value;

    fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file as a top-level array
    ///
    /// Elements are kept as loose values; an element that is not an object
    /// simply has every field missing.
    fn read_rows(&self) -> Result<Vec<Value>, BankError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| BankError::open_failed(&self.path, e))?;

        serde_json::from_str::<Vec<Value>>(&content).map_err(|e| BankError::parse_error(&self.path, e))
    }

    fn extract_from(&self, row: &Value) -> Result<String, FieldError> {
        let name = string_field(row, KEY_FROM, Field::From)?;
        parse_account(Field::From, name.as_deref())
    }

    fn extract_to(&self, row: &Value) -> Result<String, FieldError> {
        let name = string_field(row, KEY_TO, Field::To)?;
        parse_account(Field::To, name.as_deref())
    }

    fn extract_amount(&self, row: &Value) -> Result<Decimal, FieldError> {
        match row.get(KEY_AMOUNT) {
            // With arbitrary_precision the Display form is the literal as written.
            Some(Value::Number(number)) => parse_amount(Some(&number.to_string())),
            Some(Value::String(text)) => parse_amount(Some(text)),
            None | Some(Value::Null) => Err(FieldError::missing(Field::Amount)),
            Some(other) => Err(FieldError::invalid(
                Field::Amount,
                &other.to_string(),
                "expected a number",
            )),
        }
    }

    fn extract_date(&self, row: &Value) -> Result<NaiveDate, FieldError> {
        let text = string_field(row, KEY_DATE, Field::Date)?;
        parse_date(text.as_deref(), &DATE_FORMATS)
    }

    fn extract_narrative(&self, row: &Value) -> Result<String, FieldError> {
        // Present but null counts as an empty narrative.
        if row.get(KEY_NARRATIVE).is_none() {
            return Err(FieldError::missing(Field::Narrative));
        }
        Ok(string_field(row, KEY_NARRATIVE, Field::Narrative)?.unwrap_or_default())
    }
}
