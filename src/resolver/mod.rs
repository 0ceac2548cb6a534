//! The boundary to the external metrics provider.
//!
//! A [`MetricsResolver`] turns one canonical handle into an
//! [`AccountMetrics`] record or a classified [`ResolveError`]. The batch
//! aggregator only depends on the trait, so tests can substitute stub
//! resolvers and the HTTP provider stays swappable.

mod provider;

pub use provider::HttpMetricsProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public metrics for one resolved account.
///
/// `None` means the provider did not report the value; it is distinct from
/// zero. Records are immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetrics {
    pub display_name: String,

    /// Canonical handle, without the leading `@`.
    pub handle: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_views: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_likes: Option<u64>,

    /// Engagement rate as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub type ResolveResult = core::result::Result<AccountMetrics, ResolveError>;

/// A classified resolution failure for a single handle.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A business error signaled by the provider ("account not found",
    /// "rate limited", ...). The message is shown to the user as-is.
    #[error("{0}")]
    Provider(String),

    /// The provider answered with an unexpected HTTP status.
    #[error("metrics API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed provider response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Resolves one canonical handle to its public metrics.
#[async_trait]
pub trait MetricsResolver: Send + Sync {
    async fn resolve(&self, handle: &str) -> ResolveResult;
}
