//! Interactive text menu
//!
//! A numbered menu read line by line from any `BufRead` and answered on any
//! `Write`, so the same loop serves a terminal and the tests. Failed imports,
//! exports and lookups are reported and the session carries on. End of input
//! ends the session.

use crate::core::SupportBank;
use crate::diagnostics::DiagnosticSink;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\
1) List all
2) List account
3) Import file
4) Export file
5) Exit";

/// One entry of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListAll,
    ListAccount,
    Import,
    Export,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::ListAll),
            "2" => Ok(MenuChoice::ListAccount),
            "3" => Ok(MenuChoice::Import),
            "4" => Ok(MenuChoice::Export),
            "5" => Ok(MenuChoice::Exit),
            other => Err(format!("'{}' is not an option, enter a number from 1 to 5", other)),
        }
    }
}

/// Read one line without its line ending, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    read_line(input)
}

/// Run the menu until the user exits or input ends
///
/// # Errors
///
/// Only failures to read `input` or write `output` are returned. Everything
/// the bank reports is shown to the user instead.
pub fn run_menu<R, W, D>(bank: &mut SupportBank<D>, mut input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    D: DiagnosticSink,
{
    loop {
        writeln!(output, "{}", MENU)?;
        let Some(line) = prompt(&mut input, &mut output, "Choose an option: ")? else {
            return Ok(());
        };

        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(message) => {
                writeln!(output, "{}", message)?;
                continue;
            }
        };

        match choice {
            MenuChoice::ListAll => {
                let totals = bank.list_all();
                if totals.is_empty() {
                    writeln!(output, "No accounts yet")?;
                }
                for total in totals {
                    writeln!(output, "{}", total)?;
                }
            }
            MenuChoice::ListAccount => {
                let Some(name) = prompt(&mut input, &mut output, "Account name: ")? else {
                    return Ok(());
                };
                match bank.list_account(&name) {
                    Ok(statement) => writeln!(output, "{}", statement)?,
                    Err(error) => writeln!(output, "Error: {}", error)?,
                }
            }
            MenuChoice::Import => {
                let Some(file) = prompt(&mut input, &mut output, "File to import: ")? else {
                    return Ok(());
                };
                match bank.import_file(file.trim()) {
                    Ok(summary) => writeln!(
                        output,
                        "Imported {} of {} rows",
                        summary.imported_rows, summary.total_rows
                    )?,
                    Err(error) => writeln!(output, "Error: {}", error)?,
                }
            }
            MenuChoice::Export => {
                let Some(file) = prompt(&mut input, &mut output, "File to export to: ")? else {
                    return Ok(());
                };
                match bank.export_file(file.trim()) {
                    Ok(rows) => writeln!(output, "Exported {} rows to '{}'", rows, file.trim())?,
                    Err(error) => writeln!(output, "Error: {}", error)?,
                }
            }
            MenuChoice::Exit => return Ok(()),
        }
    }
}
