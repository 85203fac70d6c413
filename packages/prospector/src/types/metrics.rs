//! SEO and content metric sub-records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence tag carried by every metric record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// At least one live provider contributed a reading.
    Real,
    /// All readings are locally generated synthetic estimates.
    Fallback,
}

impl DataSource {
    /// Whether this record is a lower-confidence synthetic estimate.
    pub fn is_fallback(self) -> bool {
        matches!(self, DataSource::Fallback)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataSource::Real => "real",
            DataSource::Fallback => "fallback",
        })
    }
}

/// A partial set of SEO readings from one provider.
///
/// Different vendors cover different metrics, so every field is
/// optional. The SEO stage merges observations per metric, first
/// successful reading wins, and fills the rest synthetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoObservation {
    /// Domain authority, 0-100.
    pub domain_authority: Option<u32>,

    /// Page authority of the root page, 0-100.
    pub page_authority: Option<u32>,

    /// Total inbound links.
    pub backlinks: Option<u64>,

    /// Distinct linking domains.
    pub referring_domains: Option<u64>,

    /// Estimated monthly organic visits.
    pub organic_traffic: Option<u64>,

    /// Spam likelihood, 0-100, higher is worse.
    pub spam_score: Option<u32>,
}

impl SeoObservation {
    /// Fill any metric this observation is missing from `other`.
    ///
    /// Existing readings are kept, so merging providers in priority
    /// order yields first-successful-wins semantics per metric.
    pub fn merge_missing_from(&mut self, other: &SeoObservation) {
        self.domain_authority = self.domain_authority.or(other.domain_authority);
        self.page_authority = self.page_authority.or(other.page_authority);
        self.backlinks = self.backlinks.or(other.backlinks);
        self.referring_domains = self.referring_domains.or(other.referring_domains);
        self.organic_traffic = self.organic_traffic.or(other.organic_traffic);
        self.spam_score = self.spam_score.or(other.spam_score);
    }

    /// Whether every metric has a reading.
    pub fn is_complete(&self) -> bool {
        self.domain_authority.is_some()
            && self.page_authority.is_some()
            && self.backlinks.is_some()
            && self.referring_domains.is_some()
            && self.organic_traffic.is_some()
            && self.spam_score.is_some()
    }

    /// Whether at least one metric has a reading.
    pub fn has_any(&self) -> bool {
        self.domain_authority.is_some()
            || self.page_authority.is_some()
            || self.backlinks.is_some()
            || self.referring_domains.is_some()
            || self.organic_traffic.is_some()
            || self.spam_score.is_some()
    }
}

/// SEO metrics attached to a domain at `seo_analyzed`.
///
/// Bounded scores are clamped to their documented ranges at
/// construction, regardless of what a provider returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoMetrics {
    /// Domain authority, 0-100.
    pub domain_authority: u8,

    /// Page authority, 0-100.
    pub page_authority: u8,

    /// Total inbound links.
    pub backlinks: u64,

    /// Distinct linking domains.
    pub referring_domains: u64,

    /// Estimated monthly organic visits.
    pub organic_traffic: u64,

    /// Spam likelihood, 0-100, higher is worse.
    pub spam_score: u8,

    /// Real provider data or synthetic fallback.
    pub source: DataSource,

    /// When the stage produced this record.
    pub analyzed_at: DateTime<Utc>,
}

impl SeoMetrics {
    /// Build metrics from a (complete or partial) observation, clamping
    /// bounded scores and defaulting missing counts to zero.
    pub fn from_observation(obs: &SeoObservation, source: DataSource) -> Self {
        Self {
            domain_authority: clamp_score(obs.domain_authority),
            page_authority: clamp_score(obs.page_authority),
            backlinks: obs.backlinks.unwrap_or(0),
            referring_domains: obs.referring_domains.unwrap_or(0),
            organic_traffic: obs.organic_traffic.unwrap_or(0),
            spam_score: clamp_score(obs.spam_score),
            source,
            analyzed_at: Utc::now(),
        }
    }
}

fn clamp_score(value: Option<u32>) -> u8 {
    value.unwrap_or(0).min(100) as u8
}

/// Content metrics attached to a domain at `content_analyzed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetrics {
    /// Detected niche, or `unknown` when no content was available.
    pub niche: String,

    /// Content quality, 0-100.
    pub quality: u8,

    /// Sentiment polarity, -1.0..1.0.
    pub sentiment: f64,

    /// Most frequent content keywords, bounded to the top 20.
    pub keywords: Vec<String>,

    /// Readability, 0-100, higher is easier to read.
    pub readability: u8,

    /// Brandability of the name itself, 0-100.
    pub brandability: u8,

    /// Real historical content or name-derived fallback.
    pub source: DataSource,

    /// When the stage produced this record.
    pub analyzed_at: DateTime<Utc>,
}
