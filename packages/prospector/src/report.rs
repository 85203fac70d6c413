//! Read-only ranking queries for reporting and export collaborators.

use std::cmp::Ordering;

use crate::error::{PipelineError, Result};
use crate::traits::repository::DomainRepository;
use crate::types::domain::{DomainRecord, DomainStatus};

/// Filter for ranking queries.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Restrict to one niche (case-insensitive).
    pub niche: Option<String>,

    /// Status to list; defaults to `scored`.
    pub status: Option<DomainStatus>,
}

impl ReportFilter {
    /// Filter matching all scored domains.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a niche.
    pub fn for_niche(mut self, niche: impl Into<String>) -> Self {
        self.niche = Some(niche.into());
        self
    }

    /// List a specific status instead of `scored`.
    pub fn for_status(mut self, status: DomainStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Domains ordered by composite score descending.
///
/// Ties break by higher backlink count, then alphabetical domain name,
/// so listings are deterministic.
pub async fn top_domains<R>(repo: &R, filter: &ReportFilter) -> Result<Vec<DomainRecord>>
where
    R: DomainRepository + ?Sized,
{
    let status = filter.status.unwrap_or(DomainStatus::Scored);
    let mut records = repo
        .list_by_status(status)
        .await
        .map_err(PipelineError::Repository)?;

    if let Some(niche) = &filter.niche {
        records.retain(|r| {
            r.content
                .as_ref()
                .map(|c| c.niche.eq_ignore_ascii_case(niche))
                .unwrap_or(false)
        });
    }

    records.sort_by(ranking);
    Ok(records)
}

/// Deterministic ranking order for result listings.
pub fn ranking(a: &DomainRecord, b: &DomainRecord) -> Ordering {
    let composite = |r: &DomainRecord| r.score.as_ref().map(|s| s.composite).unwrap_or(0.0);
    let backlinks = |r: &DomainRecord| r.seo.as_ref().map(|s| s.backlinks).unwrap_or(0);

    composite(b)
        .partial_cmp(&composite(a))
        .unwrap_or(Ordering::Equal)
        .then_with(|| backlinks(b).cmp(&backlinks(a)))
        .then_with(|| a.name.cmp(&b.name))
}
