//! Wayback Machine archive source.
//!
//! Looks up snapshots through the CDX index, fetches the most recent
//! one, and strips the HTML down to plain text for analysis.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::providers::moz::map_transport_error;
use crate::traits::provider::ArchiveSource;
use crate::types::domain::DomainName;

const DEFAULT_CDX_ENDPOINT: &str = "http://web.archive.org/cdx/search/cdx";
const DEFAULT_SNAPSHOT_ENDPOINT: &str = "http://web.archive.org/web";

/// Archive source backed by the Wayback Machine.
pub struct WaybackSource {
    client: reqwest::Client,
    cdx_endpoint: String,
    snapshot_endpoint: String,
    user_agent: String,
    snapshot_limit: usize,
}

impl Default for WaybackSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WaybackSource {
    /// Create a source against the public Wayback endpoints.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            cdx_endpoint: DEFAULT_CDX_ENDPOINT.to_string(),
            snapshot_endpoint: DEFAULT_SNAPSHOT_ENDPOINT.to_string(),
            user_agent: "ProspectorBot/1.0".to_string(),
            snapshot_limit: 5,
        }
    }

    /// Override both endpoints (for testing against a stub server).
    pub fn with_endpoints(
        mut self,
        cdx: impl Into<String>,
        snapshot: impl Into<String>,
    ) -> Self {
        self.cdx_endpoint = cdx.into();
        self.snapshot_endpoint = snapshot.into();
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Find the most recent snapshot reference for a domain.
    ///
    /// CDX rows are `[urlkey, timestamp, original, mimetype, statuscode,
    /// digest, length]`, with a header row first.
    async fn latest_snapshot(&self, domain: &DomainName) -> ProviderResult<Option<(String, String)>> {
        let limit = self.snapshot_limit.to_string();
        let response = self
            .client
            .get(&self.cdx_endpoint)
            .header("User-Agent", &self.user_agent)
            .query(&[
                ("url", domain.as_str()),
                ("output", "json"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimited {
                provider: "wayback".into(),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::Http(
                format!("wayback CDX returned HTTP {status}").into(),
            ));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let rows: Vec<Vec<String>> =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        // First row is the header; anything after is a snapshot.
        let snapshot = rows.into_iter().skip(1).last();
        Ok(snapshot.and_then(|row| {
            let timestamp = row.get(1)?.clone();
            let original = row.get(2)?.clone();
            Some((timestamp, original))
        }))
    }
}

#[async_trait]
impl ArchiveSource for WaybackSource {
    async fn fetch_history(&self, domain: &DomainName) -> ProviderResult<Option<String>> {
        let Some((timestamp, original)) = self.latest_snapshot(domain).await? else {
            debug!(domain = %domain, "no archive snapshot");
            return Ok(None);
        };

        let url = format!("{}/{}/{}", self.snapshot_endpoint, timestamp, original);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(ProviderError::Http(
                format!("wayback snapshot returned HTTP {}", response.status()).into(),
            ));
        }

        let html = response.text().await.map_err(map_transport_error)?;
        let text = html_to_text(&html);

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    fn name(&self) -> &str {
        "wayback"
    }
}

/// Strip HTML down to readable text.
fn html_to_text(html: &str) -> String {
    let mut text = html.to_string();

    // Remove scripts and styles wholesale.
    let script_pattern = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
    text = script_pattern.replace_all(&text, " ").to_string();
    text = style_pattern.replace_all(&text, " ").to_string();

    // Block-level closers become sentence boundaries so readability
    // still sees sentence structure.
    let block_pattern = regex::Regex::new(r"</(p|div|h[1-6]|li|tr)>").unwrap();
    text = block_pattern.replace_all(&text, ". ").to_string();

    // Remove remaining tags.
    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, " ").to_string();

    // Decode the common entities.
    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    // Collapse whitespace.
    let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();
    whitespace_pattern.replace_all(&text, " ").trim().to_string()
}
