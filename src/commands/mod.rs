//! Command-line orchestration.

mod analyze;
mod common;
mod serve;

pub use analyze::{AnalyzeArgs, analyze};
pub use common::{ColorMode, CommonArgs, LogLevel, ProviderArgs, init_logging};
pub use serve::{ServeArgs, serve};
