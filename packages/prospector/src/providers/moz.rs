//! Moz-style URL metrics provider.
//!
//! Covers domain authority, page authority, and spam score.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};
use crate::security::SecretString;
use crate::traits::provider::SeoProvider;
use crate::types::domain::DomainName;
use crate::types::metrics::SeoObservation;

const DEFAULT_ENDPOINT: &str = "https://lsapi.seomoz.com/v2";

/// Moz URL-metrics response (the fields we read).
#[derive(Debug, Deserialize)]
struct MozMetrics {
    /// Domain authority.
    #[serde(default)]
    pda: f64,

    /// Page authority of the root page.
    #[serde(default)]
    upa: f64,

    /// Spam score.
    #[serde(default)]
    spam_score: f64,
}

/// SEO provider backed by the Moz links API.
pub struct MozProvider {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
}

impl MozProvider {
    /// Create a provider with the given credential.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint (for testing against a stub server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl SeoProvider for MozProvider {
    async fn fetch_seo(&self, domain: &DomainName) -> ProviderResult<SeoObservation> {
        let url = format!("{}/url_metrics/{}", self.endpoint, domain);

        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Basic {}", self.api_key.expose()),
            )
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        match status.as_u16() {
            429 => return Err(ProviderError::RateLimited { provider: "moz".into() }),
            402 | 403 => return Err(ProviderError::QuotaExhausted { provider: "moz".into() }),
            s if !status.is_success() => {
                return Err(ProviderError::Http(
                    format!("moz returned HTTP {s}").into(),
                ))
            }
            _ => {}
        }

        let metrics: MozMetrics = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(SeoObservation {
            domain_authority: Some(metrics.pda.max(0.0) as u32),
            page_authority: Some(metrics.upa.max(0.0) as u32),
            spam_score: Some(metrics.spam_score.max(0.0) as u32),
            ..Default::default()
        })
    }

    fn name(&self) -> &str {
        "moz"
    }
}

/// Map a reqwest failure into the provider taxonomy.
///
/// Client-internal timeouts surface as `Http`; the designated `Timeout`
/// variant belongs to the orchestrator's own per-call deadline.
pub(crate) fn map_transport_error(error: reqwest::Error) -> ProviderError {
    ProviderError::Http(Box::new(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape_decodes() {
        let body = r#"{"pda": 45.0, "upa": 38.5, "spam_score": 5.0, "unrelated": true}"#;
        let metrics: MozMetrics = serde_json::from_str(body).unwrap();

        assert_eq!(metrics.pda, 45.0);
        assert_eq!(metrics.upa, 38.5);
        assert_eq!(metrics.spam_score, 5.0);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let metrics: MozMetrics = serde_json::from_str("{}").unwrap();
        assert_eq!(metrics.pda, 0.0);
    }
}
