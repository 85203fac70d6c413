//! Testing utilities including mock implementations.
//!
//! Useful for testing applications that drive the pipeline without real
//! provider or archive calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::time::Duration;

use crate::error::{ProviderError, ProviderResult, RepoResult, RepositoryError};
use crate::stores::memory::MemoryRepository;
use crate::traits::provider::{ArchiveSource, SeoProvider};
use crate::traits::repository::DomainRepository;
use crate::types::domain::{DomainName, DomainRecord, DomainStatus};
use crate::types::metrics::SeoObservation;

fn mock_unavailable(what: &str) -> ProviderError {
    ProviderError::Http(Box::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!("mock {what} unavailable"),
    )))
}

/// A mock SEO provider with scripted observations and failures.
#[derive(Default)]
pub struct MockSeoProvider {
    name: String,
    observations: RwLock<HashMap<String, SeoObservation>>,
    fail_domains: RwLock<HashSet<String>>,
    always_fail: bool,
    delay: Option<Duration>,
    calls: RwLock<Vec<String>>,
}

impl MockSeoProvider {
    /// Create a mock named `mock`.
    pub fn new() -> Self {
        Self::named("mock")
    }

    /// Create a mock with an explicit name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Script an observation for a domain.
    pub fn with_observation(self, domain: impl Into<String>, obs: SeoObservation) -> Self {
        self.observations.write().unwrap().insert(domain.into(), obs);
        self
    }

    /// Make every call fail as unavailable.
    pub fn unavailable(mut self) -> Self {
        self.always_fail = true;
        self
    }

    /// Make calls for one domain fail as unavailable.
    pub fn fail_domain(self, domain: impl Into<String>) -> Self {
        self.fail_domains.write().unwrap().insert(domain.into());
        self
    }

    /// Delay every call, for exercising timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Domains this mock was asked about, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SeoProvider for MockSeoProvider {
    async fn fetch_seo(&self, domain: &DomainName) -> ProviderResult<SeoObservation> {
        self.calls.write().unwrap().push(domain.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.always_fail || self.fail_domains.read().unwrap().contains(domain.as_str()) {
            return Err(mock_unavailable("provider"));
        }

        self.observations
            .read()
            .unwrap()
            .get(domain.as_str())
            .cloned()
            .ok_or_else(|| mock_unavailable("provider"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A mock archive source with scripted historical content.
///
/// Unscripted domains return `Ok(None)`: absence of history is the
/// common case for expired domains, not an error.
#[derive(Default)]
pub struct MockArchiveSource {
    pages: RwLock<HashMap<String, String>>,
    fail_domains: RwLock<HashSet<String>>,
    always_fail: bool,
    calls: RwLock<Vec<String>>,
}

impl MockArchiveSource {
    /// Create an empty mock (every domain has no history).
    pub fn new() -> Self {
        Self::default()
    }

    /// Script historical text for a domain.
    pub fn with_history(self, domain: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(domain.into(), text.into());
        self
    }

    /// Make every call fail as unavailable.
    pub fn unavailable(mut self) -> Self {
        self.always_fail = true;
        self
    }

    /// Make calls for one domain fail as unavailable.
    pub fn fail_domain(self, domain: impl Into<String>) -> Self {
        self.fail_domains.write().unwrap().insert(domain.into());
        self
    }

    /// Domains this mock was asked about, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ArchiveSource for MockArchiveSource {
    async fn fetch_history(&self, domain: &DomainName) -> ProviderResult<Option<String>> {
        self.calls.write().unwrap().push(domain.to_string());

        if self.always_fail || self.fail_domains.read().unwrap().contains(domain.as_str()) {
            return Err(mock_unavailable("archive"));
        }

        Ok(self.pages.read().unwrap().get(domain.as_str()).cloned())
    }

    fn name(&self) -> &str {
        "mock-archive"
    }
}

/// A repository wrapper with scripted write failures, for exercising
/// the retry and failed-status paths.
pub struct FailingRepository {
    inner: MemoryRepository,
    always_fail: RwLock<HashSet<String>>,
    budgets: RwLock<HashMap<String, usize>>,
}

impl FailingRepository {
    /// Wrap a memory repository.
    pub fn new(inner: MemoryRepository) -> Self {
        Self {
            inner,
            always_fail: RwLock::new(HashSet::new()),
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Every upsert for this domain fails.
    pub fn fail_upserts_for(self, domain: impl Into<String>) -> Self {
        self.always_fail.write().unwrap().insert(domain.into());
        self
    }

    /// The next `count` upserts for this domain fail, then writes heal.
    pub fn fail_next_upserts(&self, domain: impl Into<String>, count: usize) {
        self.budgets.write().unwrap().insert(domain.into(), count);
    }

    /// Clear all scripted failures for a domain.
    pub fn heal(&self, domain: &str) {
        self.always_fail.write().unwrap().remove(domain);
        self.budgets.write().unwrap().remove(domain);
    }

    fn should_fail(&self, domain: &str) -> bool {
        if self.always_fail.read().unwrap().contains(domain) {
            return true;
        }
        let mut budgets = self.budgets.write().unwrap();
        if let Some(remaining) = budgets.get_mut(domain) {
            if *remaining > 0 {
                *remaining -= 1;
                return true;
            }
        }
        false
    }
}

#[async_trait]
impl DomainRepository for FailingRepository {
    async fn get(&self, name: &DomainName) -> RepoResult<Option<DomainRecord>> {
        self.inner.get(name).await
    }

    async fn upsert(&self, record: &DomainRecord) -> RepoResult<()> {
        if self.should_fail(record.name.as_str()) {
            return Err(RepositoryError::Backend(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                "scripted write failure",
            ))));
        }
        self.inner.upsert(record).await
    }

    async fn list_by_status(&self, status: DomainStatus) -> RepoResult<Vec<DomainRecord>> {
        self.inner.list_by_status(status).await
    }

    async fn count(&self) -> RepoResult<usize> {
        self.inner.count().await
    }
}
