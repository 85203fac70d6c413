//! SEO metric providers: real vendors, the synthetic fallback variant,
//! rate limiting, and the credential-driven factory.

pub mod ahrefs;
pub mod moz;
pub mod rate_limited;
pub mod synthetic;

pub use ahrefs::AhrefsProvider;
pub use moz::MozProvider;
pub use rate_limited::{shared_limiter, RateLimited, SharedRateLimiter};
pub use synthetic::{fallback_content, SyntheticSeoProvider};

use tracing::info;

use crate::traits::provider::SeoProvider;
use crate::types::config::ProviderSettings;

/// Build the provider stack from configured credentials.
///
/// Providers are returned in merge priority order. A provider whose
/// credential is absent (or which is disabled) is simply omitted, which
/// is equivalent to it always being unavailable; with no credentials at
/// all the SEO stage runs entirely on the synthetic fallback.
pub fn provider_stack(settings: &ProviderSettings) -> Vec<Box<dyn SeoProvider>> {
    let mut stack: Vec<Box<dyn SeoProvider>> = Vec::new();

    match &settings.moz_api_key {
        Some(key) if !settings.disable_moz => {
            stack.push(Box::new(MozProvider::new(key.clone())));
        }
        _ => info!(provider = "moz", "no credential, provider omitted"),
    }

    match &settings.ahrefs_api_key {
        Some(key) if !settings.disable_ahrefs => {
            stack.push(Box::new(AhrefsProvider::new(key.clone())));
        }
        _ => info!(provider = "ahrefs", "no credential, provider omitted"),
    }

    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_yield_empty_stack() {
        let stack = provider_stack(&ProviderSettings::new());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_credentials_enable_providers() {
        let settings = ProviderSettings::new()
            .with_moz_key("moz-key")
            .with_ahrefs_key("ahrefs-key");

        let stack = provider_stack(&settings);
        let names: Vec<&str> = stack.iter().map(|p| p.name()).collect();

        assert_eq!(names, vec!["moz", "ahrefs"]);
    }

    #[test]
    fn test_disabled_provider_omitted_despite_credential() {
        let settings = ProviderSettings::new()
            .with_moz_key("moz-key")
            .with_ahrefs_key("ahrefs-key")
            .without_moz();

        let stack = provider_stack(&settings);
        let names: Vec<&str> = stack.iter().map(|p| p.name()).collect();

        assert_eq!(names, vec!["ahrefs"]);
    }
}
