//! HTTP client for the metrics provider API.

use super::{AccountMetrics, MetricsResolver, ResolveError, ResolveResult};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

/// JSON payload returned by the provider for one account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderPayload {
    display_name: Option<String>,
    followers: Option<u64>,
    average_views: Option<u64>,
    average_likes: Option<u64>,
    engagement_rate: Option<f64>,
    category: Option<String>,
    location: Option<String>,
}

/// Resolver backed by a remote metrics API.
///
/// One GET per handle; no retries and no extra timeout on top of the
/// client's. Throttling, if any, is the provider's concern.
#[derive(Debug, Clone)]
pub struct HttpMetricsProvider {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpMetricsProvider {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    fn account_url(&self, handle: &str) -> String {
        format!("{}/v1/accounts/{handle}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MetricsResolver for HttpMetricsProvider {
    async fn resolve(&self, handle: &str) -> ResolveResult {
        let mut request = self.client.get(self.account_url(handle));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            s if s.is_success() => {
                let payload: ProviderPayload = response.json().await.map_err(|e| ResolveError::Parse(e.to_string()))?;
                Ok(AccountMetrics {
                    display_name: payload.display_name.unwrap_or_else(|| handle.to_string()),
                    handle: handle.to_string(),
                    followers: payload.followers,
                    average_views: payload.average_views,
                    average_likes: payload.average_likes,
                    engagement_rate: payload.engagement_rate,
                    category: payload.category,
                    location: payload.location,
                })
            }
            StatusCode::NOT_FOUND => Err(ResolveError::Provider("account not found".to_string())),
            StatusCode::FORBIDDEN => Err(ResolveError::Provider("account is private".to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(ResolveError::Provider("rate limited".to_string())),
            s => {
                let message = response.text().await.unwrap_or_default();
                Err(ResolveError::Api {
                    status: s.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_url_joins_cleanly() {
        let provider = HttpMetricsProvider::new("https://example.com/", None);
        assert_eq!(provider.account_url("nasa"), "https://example.com/v1/accounts/nasa");

        let provider = HttpMetricsProvider::new("https://example.com", None);
        assert_eq!(provider.account_url("nasa"), "https://example.com/v1/accounts/nasa");
    }
}
