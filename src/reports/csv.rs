use super::common::{self, CountStyle};
use crate::Result;
use crate::resolver::AccountMetrics;
use crate::table::COLUMNS;
use core::fmt::Write;
use std::borrow::Cow;

/// Render records as delimited text: a fixed-order header row of column
/// labels followed by one row per record.
///
/// Counts are plain integers and the engagement rate keeps two fractional
/// digits, so values survive re-import losslessly. Rows come out in
/// whatever order the caller passes; this function never re-sorts.
pub fn generate<W: Write>(records: &[AccountMetrics], writer: &mut W) -> Result<()> {
    for (i, def) in COLUMNS.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "{}", escape_csv(def.label))?;
    }
    writeln!(writer)?;

    for record in records {
        let fields = common::row_fields(record, CountStyle::Plain);
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                write!(writer, ",")?;
            }
            write!(writer, "{}", escape_csv(field))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Escape a value for RFC compliant CSV output.
///
/// Wraps the value in double quotes if it contains commas, newlines, or double quotes.
/// Internal double quotes are doubled per the RFC.
fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}
