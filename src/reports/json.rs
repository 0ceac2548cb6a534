use crate::Result;
use crate::batch::FetchFailure;
use crate::resolver::AccountMetrics;
use core::fmt::Write;
use serde_json::json;

/// Render records and failures as a machine-readable JSON document.
pub fn generate<W: Write>(records: &[AccountMetrics], failures: &[FetchFailure], writer: &mut W) -> Result<()> {
    let output = json!({
        "accounts": records,
        "failures": failures,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_round_trips_records() {
        let records = vec![AccountMetrics {
            display_name: "NASA".to_string(),
            handle: "nasa".to_string(),
            followers: Some(1_000_000),
            average_views: None,
            average_likes: None,
            engagement_rate: Some(3.456),
            category: None,
            location: None,
        }];
        let failures = vec![FetchFailure::for_handle("doesnotexist", "account not found")];

        let mut output = String::new();
        generate(&records, &failures, &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["accounts"][0]["handle"], "nasa");
        assert_eq!(parsed["accounts"][0]["followers"], 1_000_000_u64);
        assert_eq!(parsed["failures"][0]["handle"], "doesnotexist");
        assert_eq!(parsed["failures"][0]["message"], "account not found");
    }

    #[test]
    fn test_generate_empty_dataset() {
        let mut output = String::new();
        generate(&[], &[], &mut output).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["accounts"].as_array().unwrap().len(), 0);
        assert_eq!(parsed["failures"].as_array().unwrap().len(), 0);
    }
}
