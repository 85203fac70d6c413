//! Configuration passed explicitly into the pipeline and provider factory.
//!
//! There is no ambient configuration lookup anywhere in stage logic;
//! everything arrives through these structs at construction time.

use std::time::Duration;

use crate::security::SecretString;

/// Runtime knobs for a batch run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum domains processed concurrently within one stage pass.
    pub concurrency: usize,

    /// Per-call timeout for provider and archive requests. A timeout is
    /// treated as provider-unavailable, not as a pipeline failure.
    pub provider_timeout: Duration,

    /// Sustained rate toward external services, shared by all workers.
    pub requests_per_second: u32,

    /// Repository write retries before a domain is marked failed.
    pub write_retries: u32,

    /// Initial backoff between write retries, doubled per attempt.
    pub retry_backoff: Duration,

    /// Maximum candidates accepted from a discovery source per run.
    pub max_candidates: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            provider_timeout: Duration::from_secs(30),
            requests_per_second: 2,
            write_retries: 3,
            retry_backoff: Duration::from_millis(100),
            max_candidates: 100,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set stage concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the per-call provider timeout.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Set the shared outbound request rate.
    pub fn with_requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Set the repository retry budget.
    pub fn with_write_retries(mut self, retries: u32) -> Self {
        self.write_retries = retries;
        self
    }

    /// Set the initial retry backoff.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the discovery candidate cap.
    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }
}

/// Named SEO providers with enable flags and optional credentials.
///
/// A provider with no credential is simply omitted from the stack by
/// the factory, which is equivalent to it always being unavailable.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// Moz-style authority/spam endpoint credential.
    pub moz_api_key: Option<SecretString>,

    /// Ahrefs-style backlink/traffic endpoint credential.
    pub ahrefs_api_key: Option<SecretString>,

    /// Disable the Moz provider even when a credential is present.
    pub disable_moz: bool,

    /// Disable the Ahrefs provider even when a credential is present.
    pub disable_ahrefs: bool,
}

impl ProviderSettings {
    /// Settings with no credentials: the stack will be synthetic-only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Moz credential.
    pub fn with_moz_key(mut self, key: impl Into<String>) -> Self {
        self.moz_api_key = Some(SecretString::new(key));
        self
    }

    /// Set the Ahrefs credential.
    pub fn with_ahrefs_key(mut self, key: impl Into<String>) -> Self {
        self.ahrefs_api_key = Some(SecretString::new(key));
        self
    }

    /// Disable the Moz provider.
    pub fn without_moz(mut self) -> Self {
        self.disable_moz = true;
        self
    }

    /// Disable the Ahrefs provider.
    pub fn without_ahrefs(mut self) -> Self {
        self.disable_ahrefs = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::new()
            .with_concurrency(8)
            .with_provider_timeout(Duration::from_secs(5))
            .with_write_retries(1);

        assert_eq!(config.concurrency, 8);
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert_eq!(config.write_retries, 1);
    }

    #[test]
    fn test_provider_settings_debug_redacts_keys() {
        let settings = ProviderSettings::new().with_moz_key("moz-secret-key");
        let debug = format!("{:?}", settings);

        assert!(!debug.contains("moz-secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
