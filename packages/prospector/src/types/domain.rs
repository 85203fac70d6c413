//! Domain identity, record, and status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{PipelineError, Result};
use crate::types::metrics::{ContentMetrics, SeoMetrics};
use crate::types::score::ScoreRecord;

/// A validated, normalized domain name.
///
/// Normalization happens at parse time: scheme and path stripped,
/// leading `www.` removed, trailing dot/slash removed, lowercased.
/// Two spellings of the same domain therefore compare equal, which is
/// what makes repository lookups case-insensitive for free.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainName(String);

impl DomainName {
    /// Parse and normalize a candidate name.
    ///
    /// Returns `PipelineError::Validation` for anything that is not a
    /// well-formed registrable domain. Malformed names are rejected here,
    /// before any provider sees them.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = normalize(raw);

        let pattern = regex::Regex::new(r"^([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}$")
            .expect("domain pattern is valid");

        if normalized.is_empty() || !pattern.is_match(&normalized) {
            return Err(PipelineError::Validation {
                name: raw.to_string(),
            });
        }

        Ok(Self(normalized))
    }

    /// The normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leftmost label (e.g. `oldblog` for `oldblog.net`), used by
    /// name-based heuristics such as brandability.
    pub fn label(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw candidate into canonical form.
fn normalize(raw: &str) -> String {
    let mut name = raw.trim().to_ascii_lowercase();

    // Candidates scraped from listings sometimes arrive as URLs.
    if name.contains("://") {
        if let Ok(parsed) = url::Url::parse(&name) {
            if let Some(host) = parsed.host_str() {
                name = host.to_string();
            }
        }
    }

    let name = name
        .trim_end_matches('/')
        .trim_end_matches('.')
        .trim_start_matches("www.");

    name.to_string()
}

/// Where a domain is in the enrichment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// Inserted by discovery, not yet enriched.
    Discovered,
    /// SEO metrics attached.
    SeoAnalyzed,
    /// Content metrics attached.
    ContentAnalyzed,
    /// Composite score computed. Terminal for the automatic pipeline.
    Scored,
    /// A stage exhausted its retry budget on a non-recoverable error.
    /// Terminal for the automatic pipeline; external re-processing may
    /// reset to `Discovered`.
    Failed,
}

impl DomainStatus {
    /// The explicit transition table. Anything not listed here is
    /// rejected; stages never skip ahead or move backward.
    pub fn can_transition(self, next: DomainStatus) -> bool {
        use DomainStatus::*;
        matches!(
            (self, next),
            (Discovered, SeoAnalyzed)
                | (SeoAnalyzed, ContentAnalyzed)
                | (ContentAnalyzed, Scored)
                | (Discovered, Failed)
                | (SeoAnalyzed, Failed)
                | (ContentAnalyzed, Failed)
                // Administrative re-open of a failed record.
                | (Failed, Discovered)
        )
    }

    /// Whether the automatic pipeline is done with this record.
    pub fn is_terminal(self) -> bool {
        matches!(self, DomainStatus::Scored | DomainStatus::Failed)
    }

    /// Stable string form, matching the serialized representation.
    pub fn as_str(self) -> &'static str {
        match self {
            DomainStatus::Discovered => "discovered",
            DomainStatus::SeoAnalyzed => "seo_analyzed",
            DomainStatus::ContentAnalyzed => "content_analyzed",
            DomainStatus::Scored => "scored",
            DomainStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for DomainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate produced by a discovery source, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCandidate {
    /// Raw name as the source reported it.
    pub name: String,

    /// Source tag (e.g. `expired_listings`, `auction`).
    pub source: String,
}

impl DomainCandidate {
    /// Create a new candidate.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// A domain record and its per-stage metric sub-records.
///
/// Metrics are embedded in the record so one repository upsert persists
/// a stage's metrics and status transition together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Stable record id.
    pub id: Uuid,

    /// Normalized domain name; unique key in the repository.
    pub name: DomainName,

    /// When discovery first saw this domain.
    pub discovered_at: DateTime<Utc>,

    /// Discovery source tag.
    pub source: String,

    /// Current pipeline status.
    pub status: DomainStatus,

    /// SEO metrics, present from `seo_analyzed` on.
    pub seo: Option<SeoMetrics>,

    /// Content metrics, present from `content_analyzed` on.
    pub content: Option<ContentMetrics>,

    /// Composite score, present at `scored`.
    pub score: Option<ScoreRecord>,
}

impl DomainRecord {
    /// Create a freshly discovered record.
    pub fn discovered(name: DomainName, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            discovered_at: Utc::now(),
            source: source.into(),
            status: DomainStatus::Discovered,
            seo: None,
            content: None,
            score: None,
        }
    }

    /// Advance to the next status, rejecting transitions not in the table.
    pub fn advance(&mut self, next: DomainStatus) -> Result<()> {
        if !self.status.can_transition(next) {
            return Err(PipelineError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
