use super::common::{self, CountStyle};
use crate::Result;
use crate::resolver::AccountMetrics;
use crate::table::{COLUMNS, Column};
use rust_xlsxwriter::{DocProperties, Format, Workbook};
use std::io::Write;

/// Render records as a single-sheet workbook.
///
/// Row mapping matches the delimited-text export, but headers use the
/// friendlier sheet labels and counts use the screen-style compact
/// notation. The engagement rate is written as a real number with a
/// two-decimal cell format.
#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
pub fn generate<W: Write>(records: &[AccountMetrics], writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("socialrank");
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet().set_name("Account Metrics")?;

    let bold_format = Format::new().set_bold();
    let rate_format = Format::new().set_num_format("0.00");

    // Header row with the friendly labels, frozen in place.
    for (col_idx, def) in COLUMNS.iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Column count is far below Excel's u16 column limit")]
        worksheet.write_string_with_format(0, col_idx as u16, def.sheet_label, &bold_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, record) in records.iter().enumerate() {
        #[expect(clippy::cast_possible_truncation, reason = "Row count is bounded by one batch of handles")]
        let row = (row_idx + 1) as u32;

        for (col_idx, def) in COLUMNS.iter().enumerate() {
            #[expect(clippy::cast_possible_truncation, reason = "Column count is far below Excel's u16 column limit")]
            let col = col_idx as u16;

            if def.column == Column::EngagementRate {
                if let Some(rate) = record.engagement_rate {
                    worksheet.write_number_with_format(row, col, rate, &rate_format)?;
                }
                continue;
            }

            let text = common::field_text(record, def.column, CountStyle::Compact);
            if !text.is_empty() {
                worksheet.write_string(row, col, text)?;
            }
        }
    }

    worksheet.autofit();

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn records() -> Vec<AccountMetrics> {
        vec![
            AccountMetrics {
                display_name: "NASA".to_string(),
                handle: "nasa".to_string(),
                followers: Some(96_400_000),
                average_views: Some(1_200_000),
                average_likes: Some(380_000),
                engagement_rate: Some(3.456),
                category: Some("Science".to_string()),
                location: Some("Washington, DC".to_string()),
            },
            AccountMetrics {
                display_name: "Ghost".to_string(),
                handle: "ghost".to_string(),
                followers: None,
                average_views: None,
                average_likes: None,
                engagement_rate: None,
                category: None,
                location: None,
            },
        ]
    }

    #[test]
    fn test_generate_produces_valid_workbook() {
        let mut output = Cursor::new(Vec::new());
        generate(&records(), &mut output).unwrap();

        // Full snapshot testing of binary workbooks isn't practical; verify
        // it is a substantial ZIP archive.
        let bytes = output.into_inner();
        assert!(bytes.len() > 1000, "workbook output should be substantial");
        assert_eq!(&bytes[0..2], b"PK", "workbook should be a valid ZIP archive");
    }

    #[test]
    fn test_generate_empty_records_still_writes_header() {
        let mut output = Cursor::new(Vec::new());
        generate(&[], &mut output).unwrap();
        assert!(!output.into_inner().is_empty());
    }
}
