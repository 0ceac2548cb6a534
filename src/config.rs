//! Configuration for the metrics provider endpoint.
//!
//! Settings come from `socialrank.toml` in the working directory (or an
//! explicit `--config` path) and can be overridden per-run by flags or
//! environment variables; the CLI layer applies that precedence.

use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Base URL of the hosted metrics provider used when nothing else is
/// configured.
pub const DEFAULT_PROVIDER_URL: &str = "https://metrics.socialrank.dev";

const CONFIG_FILE_NAME: &str = "socialrank.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Base URL of the metrics provider API.
    pub provider_url: String,

    /// Bearer token for the provider, if it requires one.
    pub provider_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            provider_token: None,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `socialrank.toml` in the
    /// working directory when no path is given. A missing implicit file is
    /// not an error; a missing explicit one is.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let path = match path {
            Some(explicit) => explicit.to_owned(),
            None => {
                let implicit = Utf8PathBuf::from(CONFIG_FILE_NAME);
                if !implicit.exists() {
                    return Ok(Self::default());
                }
                implicit
            }
        };

        let contents = fs::read_to_string(&path).into_app_err_with(|| format!("unable to read config file `{path}`"))?;
        Self::from_toml(&contents).into_app_err_with(|| format!("unable to parse config file `{path}`"))
    }

    fn from_toml(contents: &str) -> core::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
