//! Column definitions and the sort engine for the metrics table.
//!
//! Columns are described by a static table ([`COLUMNS`]) carrying a
//! per-column extractor, so the comparator and the export formatters never
//! branch on individual columns: adding a column means adding one table
//! entry.

use crate::resolver::AccountMetrics;
use clap::ValueEnum;
use core::cmp::Ordering;
use std::borrow::Cow;
use strum::{Display, EnumIter};

/// A sortable/exportable column of the metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, ValueEnum)]
pub enum Column {
    Name,
    Handle,
    Followers,
    AverageViews,
    AverageLikes,
    EngagementRate,
    Category,
    Location,
}

/// One record's raw value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    Number(f64),
    Text(&'a str),
    Missing,
}

/// Static description of a column: display labels, numeric-ness, and the
/// extractor used by both the comparator and the exporters.
#[derive(Debug)]
pub struct ColumnDef {
    pub column: Column,

    /// Label used for screen display and the delimited-text export.
    pub label: &'static str,

    /// Friendlier label used for the spreadsheet export.
    pub sheet_label: &'static str,

    /// Numeric columns default to descending sort and plain/compact
    /// number formatting; all others are lexicographic.
    pub numeric: bool,

    pub extract: for<'a> fn(&'a AccountMetrics) -> CellValue<'a>,
}

#[expect(clippy::cast_precision_loss, reason = "follower-scale counts fit f64 comfortably")]
fn count_cell(value: Option<u64>) -> CellValue<'static> {
    value.map_or(CellValue::Missing, |v| CellValue::Number(v as f64))
}

fn text_cell(value: Option<&str>) -> CellValue<'_> {
    value.map_or(CellValue::Missing, CellValue::Text)
}

/// The metrics table's columns, in fixed display/export order.
pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        column: Column::Name,
        label: "Name",
        sheet_label: "Display Name",
        numeric: false,
        extract: |r| CellValue::Text(&r.display_name),
    },
    ColumnDef {
        column: Column::Handle,
        label: "Handle",
        sheet_label: "Handle",
        numeric: false,
        extract: |r| CellValue::Text(&r.handle),
    },
    ColumnDef {
        column: Column::Followers,
        label: "Followers",
        sheet_label: "Followers",
        numeric: true,
        extract: |r| count_cell(r.followers),
    },
    ColumnDef {
        column: Column::AverageViews,
        label: "Avg. Views",
        sheet_label: "Average Views per Post",
        numeric: true,
        extract: |r| count_cell(r.average_views),
    },
    ColumnDef {
        column: Column::AverageLikes,
        label: "Avg. Likes",
        sheet_label: "Average Likes per Post",
        numeric: true,
        extract: |r| count_cell(r.average_likes),
    },
    ColumnDef {
        column: Column::EngagementRate,
        label: "Engagement Rate",
        sheet_label: "Engagement Rate (%)",
        numeric: true,
        extract: |r| r.engagement_rate.map_or(CellValue::Missing, CellValue::Number),
    },
    ColumnDef {
        column: Column::Category,
        label: "Category",
        sheet_label: "Category",
        numeric: false,
        extract: |r| text_cell(r.category.as_deref()),
    },
    ColumnDef {
        column: Column::Location,
        label: "Location",
        sheet_label: "Location",
        numeric: false,
        extract: |r| text_cell(r.location.as_deref()),
    },
];

impl Column {
    /// Look up this column's static definition.
    #[must_use]
    pub fn def(self) -> &'static ColumnDef {
        COLUMNS
            .iter()
            .find(|def| def.column == self)
            .unwrap_or(&COLUMNS[0])
    }

    /// Direction a column starts in when it becomes the active sort key.
    #[must_use]
    pub fn default_order(self) -> SortOrder {
        if self.def().numeric { SortOrder::Descending } else { SortOrder::Ascending }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    #[value(name = "asc", alias = "ascending")]
    Ascending,

    #[value(name = "desc", alias = "descending")]
    Descending,
}

/// The active sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: Column::Followers,
            order: SortOrder::Descending,
        }
    }
}

impl SortSpec {
    /// Apply a column activation: re-selecting the active column flips the
    /// direction, selecting a new column makes it active with its
    /// column-type-dependent default direction.
    pub fn toggle(&mut self, column: Column) {
        if self.column == column {
            self.order = match self.order {
                SortOrder::Ascending => SortOrder::Descending,
                SortOrder::Descending => SortOrder::Ascending,
            };
        } else {
            self.column = column;
            self.order = column.default_order();
        }
    }
}

/// Produce a new ordering of `records` under `spec`.
///
/// Pure: the input slice is left untouched. The underlying sort is stable,
/// so equal keys keep their relative order and the result is deterministic
/// for identical input and spec.
#[must_use]
pub fn sort_records(records: &[AccountMetrics], spec: SortSpec) -> Vec<AccountMetrics> {
    let def = spec.column.def();
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare_cells(&(def.extract)(a), &(def.extract)(b), spec.order));
    sorted
}

/// Null-aware heterogeneous comparison.
///
/// Absent values always sit at the weak end of ascending order: last when
/// ascending, first when descending. Two numbers compare numerically; any
/// other pairing compares case-insensitively on string forms.
fn compare_cells(a: &CellValue<'_>, b: &CellValue<'_>, order: SortOrder) -> Ordering {
    let flip = |ordering: Ordering| match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    };

    match (a, b) {
        (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
        (CellValue::Missing, _) => match order {
            SortOrder::Ascending => Ordering::Greater,
            SortOrder::Descending => Ordering::Less,
        },
        (_, CellValue::Missing) => match order {
            SortOrder::Ascending => Ordering::Less,
            SortOrder::Descending => Ordering::Greater,
        },
        (CellValue::Number(x), CellValue::Number(y)) => flip(x.partial_cmp(y).unwrap_or(Ordering::Equal)),
        _ => flip(string_form(a).to_lowercase().cmp(&string_form(b).to_lowercase())),
    }
}

fn string_form<'a>(value: &'a CellValue<'_>) -> Cow<'a, str> {
    match value {
        CellValue::Number(n) => Cow::Owned(n.to_string()),
        CellValue::Text(s) => Cow::Borrowed(s),
        CellValue::Missing => Cow::Borrowed(""),
    }
}
