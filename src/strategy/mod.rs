//! Export strategy module
//!
//! Serializes the ledger back into flat transfer rows. The strategy is picked
//! by the target file's extension, mirroring the import side:
//!
//! - `.csv`: implemented, see [`delimited`]
//! - `.json`, `.xml`: named strategies that do not produce output yet and
//!   always return `BankError::ExportNotImplemented`
//!
//! Any other extension selects nothing.

use crate::core::ledger::Ledger;
use crate::io::FileFormat;
use crate::types::BankError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod delimited;

/// Output serializer for one file format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStrategy {
    format: FileFormat,
    path: PathBuf,
}

impl ExportStrategy {
    /// Select the strategy for `path`
    ///
    /// Returns `None` for an unsupported extension. No file is created here.
    pub fn for_file(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        FileFormat::from_path(path).map(|format| ExportStrategy {
            format,
            path: path.to_path_buf(),
        })
    }

    /// Like [`ExportStrategy::for_file`], reporting an unsupported extension as an error
    pub fn select(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        Self::for_file(path).ok_or_else(|| BankError::unsupported_file_type(path))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize every history entry in `ledger` to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(n)` with the number of rows written
    /// * `Err(BankError::ExportNotImplemented)` for JSON and XML
    /// * `Err(BankError::IoError)` if writing failed
    pub fn write_to(&self, ledger: &Ledger, output: &mut dyn Write) -> Result<usize, BankError> {
        match self.format {
            FileFormat::Csv => delimited::export(ledger, output),
            FileFormat::Json | FileFormat::Xml => {
                Err(BankError::export_not_implemented(self.format.name()))
            }
        }
    }

    /// Serialize `ledger` to the strategy's file
    ///
    /// Unimplemented formats fail before the file is created, so they never
    /// leave an empty file behind.
    pub fn export(&self, ledger: &Ledger) -> Result<usize, BankError> {
        if self.format != FileFormat::Csv {
            return Err(BankError::export_not_implemented(self.format.name()));
        }

        let file = File::create(&self.path).map_err(|e| BankError::open_failed(&self.path, e))?;
        let mut output = BufWriter::new(file);
        let rows = self.write_to(ledger, &mut output)?;
        output.flush()?;
        Ok(rows)
    }
}
