//! Discovery source trait plus the static sample source.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::domain::DomainCandidate;

/// Produces a finite batch of candidate domain names.
///
/// The pipeline only consumes the sequence and deduplicates; how a
/// source finds candidates (listing scrape, auction feed, zone files)
/// is its own concern. A source failure is absorbed by the caller as an
/// empty batch, never a pipeline failure.
#[async_trait]
pub trait DiscoverySource: Send + Sync {
    /// Discover up to `limit` candidates.
    async fn discover(&self, limit: usize) -> ProviderResult<Vec<DomainCandidate>>;

    /// Source name for logging/debugging.
    fn name(&self) -> &str;
}

/// A discovery source backed by a fixed candidate list.
///
/// Useful for development and tests, and as the seed feed when no live
/// listing source is configured.
pub struct StaticSource {
    name: String,
    candidates: Vec<DomainCandidate>,
}

impl StaticSource {
    /// Create a source from explicit candidates.
    pub fn new(
        name: impl Into<String>,
        candidates: impl IntoIterator<Item = DomainCandidate>,
    ) -> Self {
        Self {
            name: name.into(),
            candidates: candidates.into_iter().collect(),
        }
    }

    /// Sample expired-listing feed.
    pub fn expired_samples() -> Self {
        let names = [
            "techblog2023.com",
            "healthtips.net",
            "financeguide.org",
            "travelblog.co",
            "educationhub.info",
            "newstoday.net",
            "sportsfan.com",
            "foodrecipes.org",
            "musicworld.net",
            "artgallery.com",
            "carreview.net",
            "homedesign.org",
            "fashiontrends.com",
            "techreview.net",
            "businesstips.org",
            "gamingworld.com",
            "photoblog.net",
            "moviereview.org",
            "sciencenews.com",
            "historybook.net",
        ];
        Self::new(
            "expired_samples",
            names
                .iter()
                .map(|n| DomainCandidate::new(*n, "expired_listings")),
        )
    }

    /// Sample auction feed.
    pub fn auction_samples() -> Self {
        let names = [
            "premiumdomain.com",
            "valuablesite.net",
            "brandname.org",
            "keywordrich.com",
            "shortdomain.co",
            "memorabledomain.net",
            "industryname.org",
            "brandableword.com",
            "exactmatch.net",
            "categorykeyword.org",
        ];
        Self::new(
            "auction_samples",
            names.iter().map(|n| DomainCandidate::new(*n, "auction")),
        )
    }
}

#[async_trait]
impl DiscoverySource for StaticSource {
    async fn discover(&self, limit: usize) -> ProviderResult<Vec<DomainCandidate>> {
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_respects_limit() {
        let source = StaticSource::expired_samples();

        let all = source.discover(100).await.unwrap();
        assert_eq!(all.len(), 20);

        let few = source.discover(3).await.unwrap();
        assert_eq!(few.len(), 3);
        assert_eq!(few[0].source, "expired_listings");
    }

    #[tokio::test]
    async fn test_custom_static_source() {
        let source = StaticSource::new(
            "fixture",
            [DomainCandidate::new("oldblog.net", "fixture")],
        );

        assert_eq!(source.name(), "fixture");
        let candidates = source.discover(10).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "oldblog.net");
    }
}
