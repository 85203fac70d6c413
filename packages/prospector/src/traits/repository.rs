//! Storage trait for domain records.

use async_trait::async_trait;

use crate::error::RepoResult;
use crate::types::domain::{DomainName, DomainRecord, DomainStatus};

/// Durable store of domain records, keyed by normalized name.
///
/// Lookups are case-insensitive because `DomainName` normalizes at
/// parse time. `upsert` replaces the whole record, so a stage's metrics
/// and its status transition persist together or not at all.
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Get a record by domain name.
    async fn get(&self, name: &DomainName) -> RepoResult<Option<DomainRecord>>;

    /// Insert or replace a record.
    async fn upsert(&self, record: &DomainRecord) -> RepoResult<()>;

    /// All records currently in the given status.
    async fn list_by_status(&self, status: DomainStatus) -> RepoResult<Vec<DomainRecord>>;

    /// Total number of records.
    async fn count(&self) -> RepoResult<usize>;
}
