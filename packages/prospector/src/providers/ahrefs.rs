//! Ahrefs-style domain overview provider.
//!
//! Covers backlinks, referring domains, and organic traffic.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{ProviderError, ProviderResult};
use crate::providers::moz::map_transport_error;
use crate::security::SecretString;
use crate::traits::provider::SeoProvider;
use crate::types::domain::DomainName;
use crate::types::metrics::SeoObservation;

const DEFAULT_ENDPOINT: &str = "https://apiv2.ahrefs.com";

/// Ahrefs domain-overview response (the fields we read).
#[derive(Debug, Deserialize)]
struct AhrefsMetrics {
    #[serde(default)]
    backlinks: u64,

    #[serde(default)]
    referring_domains: u64,

    #[serde(default)]
    organic_traffic: u64,
}

/// SEO provider backed by the Ahrefs API.
pub struct AhrefsProvider {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
}

impl AhrefsProvider {
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
impl SeoProvider for AhrefsProvider {
    async fn fetch_seo(&self, domain: &DomainName) -> ProviderResult<SeoObservation> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("token", self.api_key.expose()),
                ("from", "domain_overview"),
                ("target", domain.as_str()),
                ("mode", "domain"),
                ("output", "json"),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        match status.as_u16() {
            429 => {
                return Err(ProviderError::RateLimited {
                    provider: "ahrefs".into(),
                })
            }
            402 | 403 => {
                return Err(ProviderError::QuotaExhausted {
                    provider: "ahrefs".into(),
                })
            }
            s if !status.is_success() => {
                return Err(ProviderError::Http(
                    format!("ahrefs returned HTTP {s}").into(),
                ))
            }
            _ => {}
        }

        let metrics: AhrefsMetrics = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(SeoObservation {
            backlinks: Some(metrics.backlinks),
            referring_domains: Some(metrics.referring_domains),
            organic_traffic: Some(metrics.organic_traffic),
            ..Default::default()
        })
    }

    fn name(&self) -> &str {
        "ahrefs"
    }
}
