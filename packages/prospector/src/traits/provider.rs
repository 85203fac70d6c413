//! Metric provider and archive collaborator traits.
//!
//! One `SeoProvider` interface covers both real HTTP-backed vendors and
//! the synthetic fallback variant; stage code never knows which it got.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::domain::DomainName;
use crate::types::metrics::SeoObservation;

/// A source of SEO readings for a domain.
///
/// Implementations return whatever subset of metrics they cover; the
/// SEO stage merges observations across the configured stack. Any error
/// means "unavailable" and triggers fallback substitution by the
/// caller. Providers never reject a well-formed domain; validation is a
/// discovery-time concern.
#[async_trait]
pub trait SeoProvider: Send + Sync {
    /// Fetch SEO readings for a domain.
    async fn fetch_seo(&self, domain: &DomainName) -> ProviderResult<SeoObservation>;

    /// Provider name for logging/debugging.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<P: SeoProvider + ?Sized> SeoProvider for Box<P> {
    async fn fetch_seo(&self, domain: &DomainName) -> ProviderResult<SeoObservation> {
        (**self).fetch_seo(domain).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Retrieves historical page text for a domain.
///
/// Returns `Ok(None)` when no snapshot exists; many expired domains
/// have none, and the content stage treats absence as an expected
/// outcome, not an error. Errors mean the archive itself was
/// unavailable and likewise trigger name-derived fallback metrics.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Fetch the most useful historical text snapshot, if any.
    async fn fetch_history(&self, domain: &DomainName) -> ProviderResult<Option<String>>;

    /// Source name for logging/debugging.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<A: ArchiveSource + ?Sized> ArchiveSource for Box<A> {
    async fn fetch_history(&self, domain: &DomainName) -> ProviderResult<Option<String>> {
        (**self).fetch_history(domain).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
