//! Discovery ingestion: validate, normalize, deduplicate, insert.

use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::traits::repository::DomainRepository;
use crate::types::domain::{DomainCandidate, DomainName, DomainRecord};

/// Outcome counts for one discovery ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverySummary {
    /// New records inserted.
    pub accepted: usize,

    /// Candidates that already existed (no-op merge) or repeated within
    /// the batch.
    pub merged: usize,

    /// Candidates rejected as malformed.
    pub rejected: usize,
}

/// Ingest a batch of candidates into the repository.
///
/// Names are validated and normalized before insertion; a name that
/// normalizes to an existing record is merged as a no-op, so
/// `Example.com.`, `example.com`, and `EXAMPLE.COM` yield one record.
/// Repository failures here surface to the operator: nothing has
/// entered the pipeline yet, so there is no record to mark failed.
pub async fn ingest_candidates<R>(
    repo: &R,
    candidates: Vec<DomainCandidate>,
) -> Result<DiscoverySummary>
where
    R: DomainRepository + ?Sized,
{
    let mut summary = DiscoverySummary::default();
    let mut seen: HashSet<String> = HashSet::new();

    for candidate in candidates {
        let name = match DomainName::parse(&candidate.name) {
            Ok(name) => name,
            Err(_) => {
                debug!(candidate = %candidate.name, "rejected malformed candidate");
                summary.rejected += 1;
                continue;
            }
        };

        if !seen.insert(name.as_str().to_string()) {
            summary.merged += 1;
            continue;
        }

        if repo.get(&name).await?.is_some() {
            summary.merged += 1;
            continue;
        }

        let record = DomainRecord::discovered(name, candidate.source);
        repo.upsert(&record).await?;
        summary.accepted += 1;
    }

    info!(
        accepted = summary.accepted,
        merged = summary.merged,
        rejected = summary.rejected,
        "discovery ingestion complete"
    );

    Ok(summary)
}
