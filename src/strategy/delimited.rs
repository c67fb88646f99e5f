//! CSV export strategy
//!
//! Inverts the aggregation: each history entry becomes one row again, with
//! the owning account as `fromAccount`. Accounts are written in name order
//! and each account's entries in the order they were imported, so exporting
//! the same ledger twice gives identical files.

use crate::core::ledger::Ledger;
use crate::io::csv_format::write_transfers_csv;
use crate::types::BankError;
use std::io::Write;

/// Write every transfer in `ledger` to `output` as CSV
///
/// Returns the number of data rows written.
pub fn export(ledger: &Ledger, output: &mut dyn Write) -> Result<usize, BankError> {
    write_transfers_csv(ledger.transfers(), output).map_err(|message| BankError::IoError { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::import::import;
    use crate::diagnostics::Diagnostic;
    use crate::io::{CsvSource, RowSource};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_export_each_entry_once() {
        let mut ledger = Ledger::new();
        ledger.insert("B", "A", dec("1.5"), date(2014, 1, 2), "second").unwrap();
        ledger.insert("A", "B", dec("2"), date(2014, 1, 1), "first").unwrap();
        ledger.insert("B", "C", dec("0.25"), date(2014, 1, 3), "third").unwrap();

        let mut output = Vec::new();
        let rows = export(&ledger, &mut output).unwrap();

        assert_eq!(rows, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "fromAccount,toAccount,amount,date,narrative\n\
             A,B,2,2014-01-01,first\n\
             B,A,1.5,2014-01-02,second\n\
             B,C,0.25,2014-01-03,third\n"
        );
    }

    #[test]
    fn test_export_empty_ledger_writes_header_only() {
        let mut output = Vec::new();
        assert_eq!(export(&Ledger::new(), &mut output).unwrap(), 0);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "fromAccount,toAccount,amount,date,narrative\n"
        );
    }

    #[test]
    fn test_exported_file_reimports_to_same_state() {
        let mut ledger = Ledger::new();
        ledger.insert("Jon A", "Sarah T", dec("7.80"), date(2014, 1, 1), "Pokemon, again").unwrap();
        ledger.insert("Sarah T", "Jon A", dec("0.01"), date(2014, 6, 30), "").unwrap();
        ledger.insert("Jon A", "Ben B", dec("12"), date(2014, 1, 1), "Lunch").unwrap();

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        export(&ledger, file.as_file_mut()).unwrap();

        let source = CsvSource::new(file.path());
        let mut reimported = Ledger::new();
        let mut events: Vec<Diagnostic> = Vec::new();
        let summary = import(&source, &mut reimported, &mut events).unwrap();

        assert_eq!(summary.imported_rows, 3);
        assert_eq!(source.read_rows().unwrap().len(), 3);
        assert_eq!(reimported.list_all(), ledger.list_all());
        for (name, _) in ledger.list_all() {
            assert_eq!(reimported.account(name), ledger.account(name));
        }
    }
}
