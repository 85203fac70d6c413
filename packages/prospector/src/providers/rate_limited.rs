//! Rate-limited wrapper for outbound collaborator calls.
//!
//! Wraps providers and the archive source with a shared `governor`
//! limiter so one quota paces every concurrent worker.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::ProviderResult;
use crate::traits::provider::{ArchiveSource, SeoProvider};
use crate::types::domain::DomainName;
use crate::types::metrics::SeoObservation;

/// The direct (not keyed) in-memory limiter shared across workers.
pub type SharedRateLimiter = Arc<
    RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
>;

/// Build a shared limiter for the given sustained rate.
///
/// A rate of zero is coerced to one request per second rather than
/// rejected; a stalled pipeline is worse than a slow one.
pub fn shared_limiter(requests_per_second: u32) -> SharedRateLimiter {
    let rate = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
    Arc::new(RateLimiter::direct(Quota::per_second(rate)))
}

/// Wraps any provider or archive source with the shared limiter.
pub struct RateLimited<T> {
    inner: T,
    limiter: SharedRateLimiter,
}

impl<T> RateLimited<T> {
    /// Wrap `inner`, pacing its calls through `limiter`.
    pub fn new(inner: T, limiter: SharedRateLimiter) -> Self {
        Self { inner, limiter }
    }
}

#[async_trait]
impl<P: SeoProvider> SeoProvider for RateLimited<P> {
    async fn fetch_seo(&self, domain: &DomainName) -> ProviderResult<SeoObservation> {
        self.limiter.until_ready().await;
        self.inner.fetch_seo(domain).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[async_trait]
impl<A: ArchiveSource> ArchiveSource for RateLimited<A> {
    async fn fetch_history(&self, domain: &DomainName) -> ProviderResult<Option<String>> {
        self.limiter.until_ready().await;
        self.inner.fetch_history(domain).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::synthetic::SyntheticSeoProvider;
    use std::time::Instant;

    #[tokio::test]
    async fn test_rate_limiting_spaces_calls() {
        let limiter = shared_limiter(2);
        let provider = RateLimited::new(SyntheticSeoProvider::new(), limiter);
        let domain = DomainName::parse("oldblog.net").unwrap();

        let start = Instant::now();
        for _ in 0..3 {
            provider.fetch_seo(&domain).await.unwrap();
        }
        let elapsed = start.elapsed();

        // First call is immediate, the next two wait on the 2/sec quota.
        assert!(
            elapsed.as_millis() >= 500,
            "rate limiting not applied: {elapsed:?}"
        );
    }

    #[tokio::test]
    async fn test_limiter_shared_between_wrappers() {
        let limiter = shared_limiter(2);
        let first = RateLimited::new(SyntheticSeoProvider::new(), limiter.clone());
        let second = RateLimited::new(SyntheticSeoProvider::new(), limiter);
        let domain = DomainName::parse("oldblog.net").unwrap();

        let start = Instant::now();
        first.fetch_seo(&domain).await.unwrap();
        second.fetch_seo(&domain).await.unwrap();
        first.fetch_seo(&domain).await.unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed.as_millis() >= 500,
            "limiter not shared: {elapsed:?}"
        );
    }

    #[test]
    fn test_zero_rate_coerced() {
        // Must not panic.
        let _limiter = shared_limiter(0);
    }

    #[tokio::test]
    async fn test_name_passthrough() {
        let provider = RateLimited::new(SyntheticSeoProvider::new(), shared_limiter(10));
        assert_eq!(provider.name(), "synthetic");
    }
}
