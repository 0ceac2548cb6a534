//! Multi-format report generation for resolved account metrics.
//!
//! Four generators share one record-to-field mapper (`common`), each
//! accessed through a `generate` function:
//! - **Console**: terminal output with optional ANSI colors
//! - **CSV**: delimited text with plain integers and RFC escaping
//! - **Excel**: native .xlsx workbook with compact screen-style numbers
//! - **JSON**: machine-readable records plus failures
//!
//! Generators render rows in whatever order the caller passes; sorting is
//! the sort engine's job and happens before a generator runs.

mod common;
mod console;
mod csv;
mod excel;
mod json;

pub use common::{CountStyle, export_file_name, field_text, format_count, format_rate, row_fields};
pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use excel::generate as generate_xlsx;
pub use json::generate as generate_json;
