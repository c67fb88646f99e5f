//! XML input adapter
//!
//! Each child of the root element is one transaction. Fields are found by
//! position, not by tag name:
//!
//! ```xml
//! <TransactionList>
//!   <SupportTransaction Date="40955">
//!     <Description>Breakfast</Description>   <!-- child 0: narrative -->
//!     <Value>6.75</Value>                    <!-- child 1: amount -->
//!     <Parties>                              <!-- child 2 -->
//!       <From>Tim L</From>                   <!-- child 2.0: from -->
//!       <To>Ben B</To>                       <!-- child 2.1: to -->
//!     </Parties>
//!   </SupportTransaction>
//! </TransactionList>
//! ```
//!
//! The `Date` attribute is a spreadsheet serial day number. See
//! [`serial_to_date`].

use crate::io::{parse_account, parse_amount, RowSource};
use crate::types::{BankError, Field, FieldError};
use chrono::{Days, NaiveDate};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

const DATE_ATTRIBUTE: &str = "Date";

const NARRATIVE_INDEX: usize = 0;
const AMOUNT_INDEX: usize = 1;
const PARTIES_INDEX: usize = 2;
const FROM_INDEX: usize = 0;
const TO_INDEX: usize = 1;

/// Convert a serial day number to a calendar date
///
/// Counts from 1900-01-01 with a correction of two days: one because serial
/// 1 is the epoch itself, one for the phantom 29 February 1900 spreadsheets
/// inherited. Serial 2 is therefore 1900-01-01 and serial 40955 is
/// 2012-02-16. Dates before March 1900 come out one day early; that is the
/// established behaviour and existing files rely on it.
pub fn serial_to_date(serial: i64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    let offset = serial.checked_sub(2)?;
    if offset >= 0 {
        epoch.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        epoch.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

/// A parsed XML element: name, attributes, text and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, String> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| e.to_string())?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| e.to_string())?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Element {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn child(&self, index: usize) -> Option<&Element> {
        self.children.get(index)
    }
}

/// Parse a whole document and return its root element
pub fn parse_document(content: &str) -> Result<Element, String> {
    let mut reader = Reader::from_str(content);

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    // Attach a finished element to its parent, or make it the root.
    let mut close = |element: Element, open: &mut Vec<Element>| -> Result<(), String> {
        match open.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => root = Some(element),
            None => return Err("multiple root elements".to_string()),
        }
        Ok(())
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => open.push(Element::from_start(&start)?),
            Ok(Event::Empty(start)) => close(Element::from_start(&start)?, &mut open)?,
            Ok(Event::End(_)) => {
                let element = open.pop().ok_or("unexpected closing tag")?;
                close(element, &mut open)?;
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().map_err(|e| e.to_string())?;
                // Indentation between elements is not content; padding inside text is.
                if text.trim().is_empty() {
                    continue;
                }
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            }
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(format!("unclosed element <{}>", unclosed.name));
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

/// XML input adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSource {
    path: PathBuf,
}

impl XmlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        XmlSource { path: path.into() }
    }
}

/// Text of the account element at `index` under the parties element
fn party(row: &Element, index: usize, field: Field) -> Result<String, FieldError> {
    let name = row
        .child(PARTIES_INDEX)
        .and_then(|parties| parties.child(index))
        .map(|element| element.text.as_str());
    parse_account(field, name)
}

impl RowSource for XmlSource {
    type Row = Element;

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<Element>, BankError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| BankError::open_failed(&self.path, e))?;

        let root = parse_document(&content).map_err(|e| BankError::parse_error(&self.path, e))?;
        Ok(root.children)
    }

    fn extract_from(&self, row: &Element) -> Result<String, FieldError> {
        party(row, FROM_INDEX, Field::From)
    }

    fn extract_to(&self, row: &Element) -> Result<String, FieldError> {
        party(row, TO_INDEX, Field::To)
    }

    fn extract_amount(&self, row: &Element) -> Result<Decimal, FieldError> {
        parse_amount(row.child(AMOUNT_INDEX).map(|element| element.text.as_str()))
    }

    fn extract_date(&self, row: &Element) -> Result<NaiveDate, FieldError> {
        let raw = row
            .attribute(DATE_ATTRIBUTE)
            .ok_or_else(|| FieldError::missing(Field::Date))?;

        let serial: i64 = raw
            .trim()
            .parse()
            .map_err(|e| FieldError::invalid(Field::Date, raw, e))?;

        serial_to_date(serial)
            .ok_or_else(|| FieldError::invalid(Field::Date, raw, "serial day out of range"))
    }

    fn extract_narrative(&self, row: &Element) -> Result<String, FieldError> {
        row.child(NARRATIVE_INDEX)
            .map(|element| element.text.clone())
            .ok_or_else(|| FieldError::missing(Field::Narrative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<TransactionList>
  <SupportTransaction Date="40955">
    <Description>Breakfast</Description>
    <Value>6.75</Value>
    <Parties>
      <From>Tim L</From>
      <To>Ben B</To>
    </Parties>
  </SupportTransaction>
  <SupportTransaction Date="40956">
    <Description>Fish &amp; Chips</Description>
    <Value>12.10</Value>
    <Parties>
      <From>Ben B</From>
      <To>Sarah T</To>
    </Parties>
  </SupportTransaction>
</TransactionList>
"#;

    fn create_temp_xml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::epoch(2, date(1900, 1, 1))]
    #[case::day_before_epoch(1, date(1899, 12, 31))]
    #[case::zero(0, date(1899, 12, 30))]
    #[case::phantom_leap_day(60, date(1900, 2, 28))]
    #[case::first_march(61, date(1900, 3, 1))]
    #[case::y2k(36526, date(2000, 1, 1))]
    #[case::fixture(40955, date(2012, 2, 16))]
    fn test_serial_to_date(#[case] serial: i64, #[case] expected: NaiveDate) {
        assert_eq!(serial_to_date(serial), Some(expected));
    }

    #[test]
    fn test_serial_to_date_out_of_range() {
        assert_eq!(serial_to_date(i64::MAX), None);
        assert_eq!(serial_to_date(i64::MIN), None);
    }

    #[test]
    fn test_parse_document_builds_tree() {
        let root = parse_document(SAMPLE).unwrap();

        assert_eq!(root.name, "TransactionList");
        assert_eq!(root.children.len(), 2);
        let first = root.child(0).unwrap();
        assert_eq!(first.attribute("Date"), Some("40955"));
        assert_eq!(first.child(2).unwrap().child(1).unwrap().text, "Ben B");
        assert_eq!(root.child(1).unwrap().child(0).unwrap().text, "Fish & Chips");
    }

    #[rstest]
    #[case::unclosed("<List><Row>")]
    #[case::mismatched("<List><Row></List>")]
    #[case::empty("")]
    #[case::two_roots("<A/><B/>")]
    fn test_parse_document_rejects(#[case] content: &str) {
        assert!(parse_document(content).is_err());
    }

    #[test]
    fn test_read_rows_and_extract() {
        let file = create_temp_xml(SAMPLE);
        let source = XmlSource::new(file.path());

        let rows = source.read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(source.extract_narrative(&rows[0]), Ok("Breakfast".to_string()));
        assert_eq!(
            source.extract_amount(&rows[0]),
            Ok(Decimal::from_str("6.75").unwrap())
        );
        assert_eq!(source.extract_from(&rows[0]), Ok("Tim L".to_string()));
        assert_eq!(source.extract_to(&rows[0]), Ok("Ben B".to_string()));
        assert_eq!(source.extract_date(&rows[0]), Ok(date(2012, 2, 16)));
    }

    #[test]
    fn test_fields_found_by_position_not_name() {
        let root = parse_document(
            r#"<L><T Date="40955"><X>note</X><Y>1.00</Y><Z><P>A</P><Q>B</Q></Z></T></L>"#,
        )
        .unwrap();
        let source = XmlSource::new("t.xml");
        let row = &root.children[0];

        assert_eq!(source.extract_narrative(row), Ok("note".to_string()));
        assert_eq!(source.extract_from(row), Ok("A".to_string()));
        assert_eq!(source.extract_to(row), Ok("B".to_string()));
    }

    #[test]
    fn test_text_padding_is_kept() {
        let root = parse_document(
            "<L>\n  <T Date=\"40955\">\n    <Description>  Fish and chips  </Description>\n    \
             <Value> 4.50 </Value>\n    <Parties>\n      <From> Tim L </From>\n      \
             <To>Ben B</To>\n    </Parties>\n  </T>\n</L>",
        )
        .unwrap();
        let source = XmlSource::new("t.xml");
        let row = &root.children[0];

        assert_eq!(root.text, "");
        assert_eq!(row.children.len(), 3);
        assert_eq!(source.extract_from(row), Ok(" Tim L ".to_string()));
        assert_eq!(source.extract_to(row), Ok("Ben B".to_string()));
        assert_eq!(
            source.extract_narrative(row),
            Ok("  Fish and chips  ".to_string())
        );
        assert_eq!(
            source.extract_amount(row),
            Ok(Decimal::from_str("4.50").unwrap())
        );
    }

    #[test]
    fn test_missing_pieces_are_field_errors() {
        let root = parse_document(r#"<L><T><Description>x</Description></T></L>"#).unwrap();
        let source = XmlSource::new("t.xml");
        let row = &root.children[0];

        assert_eq!(source.extract_date(row), Err(FieldError::missing(Field::Date)));
        assert_eq!(
            source.extract_amount(row),
            Err(FieldError::missing(Field::Amount))
        );
        assert_eq!(source.extract_from(row), Err(FieldError::missing(Field::From)));
    }

    #[test]
    fn test_non_numeric_serial_is_invalid() {
        let root = parse_document(r#"<L><T Date="16/02/2012"/></L>"#).unwrap();
        let source = XmlSource::new("t.xml");
        let error = source.extract_date(&root.children[0]).unwrap_err();
        assert!(matches!(
            error,
            FieldError::Invalid {
                field: Field::Date,
                ..
            }
        ));
    }

    #[test]
    fn test_read_rows_corrupt_file() {
        let file = create_temp_xml("<TransactionList><SupportTransaction>");
        let source = XmlSource::new(file.path());
        assert!(matches!(
            source.read_rows(),
            Err(BankError::ParseError { .. })
        ));
    }
}
