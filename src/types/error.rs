//! Error types for the Support Bank
//!
//! This module defines the errors that can occur while importing, querying
//! and exporting transactions.
//!
//! # Error Categories
//!
//! - **Selection Errors**: file extension not recognized by a selector
//! - **File Errors**: file missing, unreadable, or corrupt as a whole
//! - **Row-Field Errors** ([`FieldError`]): one field of one row is missing
//!   or malformed; the row is skipped and the import continues
//! - **Lookup Errors**: query for an account that does not exist
//! - **Arithmetic Errors**: decimal overflow while updating a balance

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Main error type for the Support Bank
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// No adapter or exporter is registered for the file's extension
    ///
    /// Raised at selection time, before any file is touched.
    #[error("Unsupported file type: {file}")]
    UnsupportedFileType {
        /// The file name that was rejected
        file: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The file could be opened but its structure is unusable
    ///
    /// The whole import is abandoned before any row reaches the ledger.
    #[error("Failed to parse {file}: {message}")]
    ParseError {
        /// File being parsed
        file: String,
        /// Description of the parsing error
        message: String,
    },

    /// Lookup for an account name that has never been seen
    #[error("Name '{name}' not found")]
    AccountNotFound {
        /// The requested account name
        name: String,
    },

    /// Decimal overflow while updating a running total
    ///
    /// The ledger is left untouched when this is returned.
    #[error("Arithmetic overflow updating account '{account}'")]
    ArithmeticOverflow {
        /// Account whose total would overflow
        account: String,
    },

    /// Exporter exists for the format but does not produce output yet
    #[error("Export to {format} is not implemented")]
    ExportNotImplemented {
        /// Name of the output format
        format: String,
    },
}

// Conversion from io::Error to BankError
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

impl BankError {
    /// Create an UnsupportedFileType error
    pub fn unsupported_file_type(file: &Path) -> Self {
        BankError::UnsupportedFileType {
            file: file.display().to_string(),
        }
    }

    /// Map a failure to open `path` onto FileNotFound or IoError
    pub fn open_failed(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => BankError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => BankError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            },
        }
    }

    /// Create a ParseError error
    pub fn parse_error(file: &Path, message: impl fmt::Display) -> Self {
        BankError::ParseError {
            file: file.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(name: &str) -> Self {
        BankError::AccountNotFound {
            name: name.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(account: &str) -> Self {
        BankError::ArithmeticOverflow {
            account: account.to_string(),
        }
    }

    /// Create an ExportNotImplemented error
    pub fn export_not_implemented(format: &str) -> Self {
        BankError::ExportNotImplemented {
            format: format.to_string(),
        }
    }
}

/// The five canonical fields extracted from every input row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    From,
    To,
    Amount,
    Date,
    Narrative,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::From => "from",
            Field::To => "to",
            Field::Amount => "amount",
            Field::Date => "date",
            Field::Narrative => "narrative",
        };
        f.write_str(name)
    }
}

/// Failure to extract a single field from a single row
///
/// Returned by the format adapters. The import driver reports it and skips
/// the row; it never aborts an import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} field is missing")]
    Missing { field: Field },

    #[error("{field} field is empty")]
    Empty { field: Field },

    #[error("invalid {field} '{value}': {reason}")]
    Invalid {
        field: Field,
        value: String,
        reason: String,
    },
}

impl FieldError {
    pub fn missing(field: Field) -> Self {
        FieldError::Missing { field }
    }

    pub fn empty(field: Field) -> Self {
        FieldError::Empty { field }
    }

    pub fn invalid(field: Field, value: &str, reason: impl fmt::Display) -> Self {
        FieldError::Invalid {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// The field this error is attributed to
    pub fn field(&self) -> Field {
        match self {
            FieldError::Missing { field }
            | FieldError::Empty { field }
            | FieldError::Invalid { field, .. } => *field,
        }
    }
}
