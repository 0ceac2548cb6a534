//! Shared CLI plumbing: provider wiring, logging, and report output.

use crate::Result;
use crate::batch::FetchFailure;
use crate::config::Config;
use crate::reports;
use crate::resolver::{AccountMetrics, HttpMetricsProvider};
use camino::Utf8PathBuf;
use chrono::Local;
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use std::fs;
use std::io::Cursor;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}

/// Arguments wiring up the metrics provider. Flag beats environment beats
/// config file beats the built-in default.
#[derive(Args, Debug)]
pub struct ProviderArgs {
    /// Path to configuration file (default is `socialrank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Base URL of the metrics provider API
    #[arg(long, value_name = "URL", env = "SOCIALRANK_PROVIDER_URL")]
    pub provider_url: Option<String>,

    /// Bearer token for the metrics provider API
    #[arg(long, value_name = "TOKEN", env = "SOCIALRANK_PROVIDER_TOKEN")]
    pub provider_token: Option<String>,
}

impl ProviderArgs {
    /// Resolve configuration and build the HTTP provider.
    pub fn build_provider(&self) -> Result<HttpMetricsProvider> {
        let config = Config::load(self.config.as_deref())?;
        let url = self.provider_url.clone().unwrap_or(config.provider_url);
        let token = self.provider_token.clone().or(config.provider_token);
        Ok(HttpMetricsProvider::new(url, token))
    }
}

/// Common arguments shared by report-producing commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Write a CSV report; without PATH a timestamped file name is used
    #[arg(long, value_name = "PATH", num_args = 0..=1, help_heading = "Report Output")]
    pub csv: Option<Option<Utf8PathBuf>>,

    /// Write an Excel report; without PATH a timestamped file name is used
    #[arg(long, value_name = "PATH", num_args = 0..=1, help_heading = "Report Output")]
    pub excel: Option<Option<Utf8PathBuf>>,

    /// Write a JSON report; without PATH a timestamped file name is used
    #[arg(long, value_name = "PATH", num_args = 0..=1, help_heading = "Report Output")]
    pub json: Option<Option<Utf8PathBuf>>,

    /// Show the console report even when file reports are written
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

impl CommonArgs {
    /// Write the requested reports. The console report is shown when asked
    /// for explicitly, or when no file report was requested.
    pub fn write_reports(&self, records: &[AccountMetrics], failures: &[FetchFailure]) -> Result<()> {
        let now = Local::now();
        let mut wrote_file = false;

        if let Some(path) = &self.csv {
            let path = resolve_report_path(path.as_ref(), "csv", now);
            let mut contents = String::new();
            reports::generate_csv(records, &mut contents)?;
            fs::write(&path, contents).into_app_err_with(|| format!("unable to write CSV report `{path}`"))?;
            log::info!("wrote CSV report to `{path}`");
            wrote_file = true;
        }

        if let Some(path) = &self.excel {
            let path = resolve_report_path(path.as_ref(), "xlsx", now);
            let mut buffer = Cursor::new(Vec::new());
            reports::generate_xlsx(records, &mut buffer)?;
            fs::write(&path, buffer.into_inner()).into_app_err_with(|| format!("unable to write Excel report `{path}`"))?;
            log::info!("wrote Excel report to `{path}`");
            wrote_file = true;
        }

        if let Some(path) = &self.json {
            let path = resolve_report_path(path.as_ref(), "json", now);
            let mut contents = String::new();
            reports::generate_json(records, failures, &mut contents)?;
            fs::write(&path, contents).into_app_err_with(|| format!("unable to write JSON report `{path}`"))?;
            log::info!("wrote JSON report to `{path}`");
            wrote_file = true;
        }

        if self.console || !wrote_file {
            let use_colors = match self.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => {
                    use std::io::{IsTerminal, stdout};
                    stdout().is_terminal()
                }
            };

            let mut output = String::new();
            reports::generate_console(records, failures, use_colors, &mut output)?;
            print!("{output}");
        }

        Ok(())
    }
}

fn resolve_report_path(explicit: Option<&Utf8PathBuf>, extension: &str, now: chrono::DateTime<Local>) -> Utf8PathBuf {
    explicit.map_or_else(|| Utf8PathBuf::from(reports::export_file_name(extension, now)), Clone::clone)
}
