//! Common formatting shared across report generators.

use crate::resolver::AccountMetrics;
use crate::table::{COLUMNS, Column};

/// Number notation for count columns (followers, views, likes).
///
/// The two exports share one record-to-field mapper and differ only in
/// this strategy: the delimited-text export uses `Plain` so values survive
/// re-import losslessly, while the spreadsheet and the console use the
/// screen-style `Compact` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStyle {
    /// Plain integer digits, no grouping (`1234567`).
    Plain,

    /// Abbreviated screen notation (`1.2M`, `3.4K`).
    Compact,
}

/// Format a count under the given notation strategy.
#[must_use]
pub fn format_count(value: u64, style: CountStyle) -> String {
    match style {
        CountStyle::Plain => value.to_string(),
        CountStyle::Compact => compact_count(value),
    }
}

/// Engagement rates always render with exactly two fractional digits.
#[must_use]
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2}")
}

/// Render one record's value for one column as display text.
///
/// Absent values render as the empty string; the handle column carries the
/// `@` prefix.
#[must_use]
pub fn field_text(record: &AccountMetrics, column: Column, style: CountStyle) -> String {
    match column {
        Column::Name => record.display_name.clone(),
        Column::Handle => format!("@{}", record.handle),
        Column::Followers => record.followers.map_or_else(String::new, |v| format_count(v, style)),
        Column::AverageViews => record.average_views.map_or_else(String::new, |v| format_count(v, style)),
        Column::AverageLikes => record.average_likes.map_or_else(String::new, |v| format_count(v, style)),
        Column::EngagementRate => record.engagement_rate.map_or_else(String::new, format_rate),
        Column::Category => record.category.clone().unwrap_or_default(),
        Column::Location => record.location.clone().unwrap_or_default(),
    }
}

/// Render one record as a full row, in fixed column order.
#[must_use]
pub fn row_fields(record: &AccountMetrics, style: CountStyle) -> Vec<String> {
    COLUMNS.iter().map(|def| field_text(record, def.column, style)).collect()
}

/// File name for an export artifact, carrying a timestamp suffix so
/// repeated exports never clobber each other.
#[must_use]
pub fn export_file_name(extension: &str, now: chrono::DateTime<chrono::Local>) -> String {
    format!("account-metrics-{}.{extension}", now.format("%Y%m%d-%H%M%S"))
}

#[expect(clippy::cast_precision_loss, reason = "follower-scale counts fit f64 comfortably")]
fn compact_count(value: u64) -> String {
    if value >= 1_000_000_000 {
        format!("{}B", trim_trailing_zero(value as f64 / 1_000_000_000.0))
    } else if value >= 1_000_000 {
        format!("{}M", trim_trailing_zero(value as f64 / 1_000_000.0))
    } else if value >= 1_000 {
        format!("{}K", trim_trailing_zero(value as f64 / 1_000.0))
    } else {
        value.to_string()
    }
}

/// One decimal of precision, dropping a trailing `.0`.
fn trim_trailing_zero(value: f64) -> String {
    let formatted = format!("{value:.1}");
    match formatted.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => formatted,
    }
}
