//! In-memory repository implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::RepoResult;
use crate::traits::repository::DomainRepository;
use crate::types::domain::{DomainName, DomainRecord, DomainStatus};

/// In-memory store of domain records, keyed by normalized name.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
pub struct MemoryRepository {
    records: RwLock<HashMap<String, DomainRecord>>,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all records.
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}

#[async_trait]
impl DomainRepository for MemoryRepository {
    async fn get(&self, name: &DomainName) -> RepoResult<Option<DomainRecord>> {
        Ok(self.records.read().unwrap().get(name.as_str()).cloned())
    }

    async fn upsert(&self, record: &DomainRecord) -> RepoResult<()> {
        self.records
            .write()
            .unwrap()
            .insert(record.name.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn list_by_status(&self, status: DomainStatus) -> RepoResult<Vec<DomainRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect())
    }

    async fn count(&self) -> RepoResult<usize> {
        Ok(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> DomainRecord {
        DomainRecord::discovered(DomainName::parse(name).unwrap(), "test")
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = MemoryRepository::new();
        repo.upsert(&record("oldblog.net")).await.unwrap();

        let found = repo
            .get(&DomainName::parse("oldblog.net").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let repo = MemoryRepository::new();
        repo.upsert(&record("oldblog.net")).await.unwrap();

        // Normalization happens at parse time, so any spelling resolves.
        let found = repo
            .get(&DomainName::parse("OLDBLOG.NET.").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_record() {
        let repo = MemoryRepository::new();
        let mut rec = record("oldblog.net");
        repo.upsert(&rec).await.unwrap();

        rec.advance(DomainStatus::SeoAnalyzed).unwrap();
        repo.upsert(&rec).await.unwrap();

        assert_eq!(repo.len(), 1);
        let stored = repo.get(&rec.name).await.unwrap().unwrap();
        assert_eq!(stored.status, DomainStatus::SeoAnalyzed);
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let repo = MemoryRepository::new();
        let discovered = record("oldblog.net");
        let mut analyzed = record("techblog2023.com");
        analyzed.advance(DomainStatus::SeoAnalyzed).unwrap();

        repo.upsert(&discovered).await.unwrap();
        repo.upsert(&analyzed).await.unwrap();

        let listed = repo
            .list_by_status(DomainStatus::Discovered)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name.as_str(), "oldblog.net");

        assert!(repo
            .list_by_status(DomainStatus::Scored)
            .await
            .unwrap()
            .is_empty());
    }
}
