use super::common::{CommonArgs, init_logging};
use crate::Result;
use crate::batch;
use crate::handles::{canonical_handle, parse_handles};
use crate::table::{Column, SortOrder, SortSpec, sort_records};
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Handles to analyze, with or without a leading `@`
    #[arg(value_name = "HANDLE")]
    pub handles: Vec<String>,

    /// Free-form handle list (whitespace and/or comma separated), e.g. a
    /// pasted text blob
    #[arg(long, value_name = "TEXT")]
    pub input: Option<String>,

    /// Column to sort the report by
    #[arg(long, value_name = "COLUMN", default_value = "followers", help_heading = "Report Output")]
    pub sort: Column,

    /// Sort direction; defaults to descending for numeric columns and
    /// ascending otherwise
    #[arg(long, value_name = "ORDER", help_heading = "Report Output")]
    pub order: Option<SortOrder>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn analyze(args: &AnalyzeArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let mut handles: Vec<String> = args.handles.iter().map(String::as_str).filter_map(canonical_handle).collect();
    if let Some(text) = &args.input {
        handles.extend(parse_handles(text));
    }

    let provider = args.common.provider.build_provider()?;
    let outcome = batch::resolve_batch(&provider, &handles).await.into_app_err("resolving batch")?;

    let spec = SortSpec {
        column: args.sort,
        order: args.order.unwrap_or_else(|| args.sort.default_order()),
    };
    let sorted = sort_records(&outcome.records, spec);

    args.common.write_reports(&sorted, &outcome.failures)
}
