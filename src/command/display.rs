//! Console formatting of records.

use crate::record::Record;

const ID_WIDTH: usize = 10;
const NAME_WIDTH: usize = 15;
const PROGRAMME_WIDTH: usize = 25;

/// Column header line.
pub fn header() -> String {
    format!(
        "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:<PROGRAMME_WIDTH$} {}",
        "ID", "Name", "Programme", "Mark"
    )
}

/// One record as a table row.
pub fn row(record: &Record) -> String {
    format!(
        "{:<ID_WIDTH$} {:<NAME_WIDTH$} {:<PROGRAMME_WIDTH$} {:.1}",
        record.id.0, record.name, record.programme, record.mark
    )
}

/// A titled table of records, or a notice if there are none.
pub fn table<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut records = records.into_iter().peekable();
    if records.peek().is_none() {
        return "There are no records in the table.".to_string();
    }

    let mut out = header();
    for record in records {
        out.push('\n');
        out.push_str(&row(record));
    }
    out
}
