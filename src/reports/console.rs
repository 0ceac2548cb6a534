use super::common::{self, CountStyle};
use crate::Result;
use crate::batch::{FailureScope, FetchFailure};
use crate::resolver::AccountMetrics;
use crate::table::COLUMNS;
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(records: &[AccountMetrics], failures: &[FetchFailure], use_colors: bool, writer: &mut W) -> Result<()> {
    if records.is_empty() && failures.is_empty() {
        writeln!(writer, "No accounts analyzed.")?;
        return Ok(());
    }

    // Labels shown down the left of each account block, aligned to the
    // longest one.
    let max_label_len = COLUMNS.iter().map(|def| def.label.len()).max().unwrap_or(0);

    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }

        let heading = format!("{} (@{})", record.display_name, record.handle);
        if use_colors {
            writeln!(writer, "{}", heading.bold())?;
        } else {
            writeln!(writer, "{heading}")?;
        }

        // Name and handle are already in the heading.
        for def in COLUMNS.iter().skip(2) {
            let value = common::field_text(record, def.column, CountStyle::Compact);
            let shown = if value.is_empty() { "n/a" } else { value.as_str() };
            writeln!(writer, "  {:<width$} : {shown}", def.label, width = max_label_len)?;
        }
    }

    if !failures.is_empty() {
        if !records.is_empty() {
            writeln!(writer)?;
        }

        let heading = format!("{} handle(s) could not be resolved", failures.len());
        if use_colors {
            writeln!(writer, "{}", heading.red().bold())?;
        } else {
            writeln!(writer, "{heading}")?;
        }

        for failure in failures {
            match &failure.scope {
                FailureScope::Handle(handle) => writeln!(writer, "  @{handle}: {}", failure.message)?,
                FailureScope::Request => writeln!(writer, "  request: {}", failure.message)?,
            }
        }
    }

    Ok(())
}
