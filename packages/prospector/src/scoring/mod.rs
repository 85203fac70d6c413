//! The weighted scoring engine.
//!
//! A pure function from enriched metrics to a composite 0-100 score.
//! Weight validation happens once at construction; scoring itself never
//! fails for in-range inputs, and out-of-range inputs were already
//! clamped when the metric records were built.

pub mod normalize;

use chrono::Utc;

use crate::error::Result;
use crate::types::metrics::{ContentMetrics, SeoMetrics};
use crate::types::score::{ScoreRecord, ScoreWeights};

/// Computes composite scores under a validated weight vector.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: ScoreWeights,
}

impl ScoringEngine {
    /// Create an engine, rejecting weight vectors that do not sum to 1.0.
    pub fn new(weights: ScoreWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Engine with the default weight vector.
    pub fn with_defaults() -> Self {
        Self {
            weights: ScoreWeights::default(),
        }
    }

    /// The weight vector in use.
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score a fully enriched domain.
    ///
    /// `composite = clamp(100 * (seo + content + brand - spam), 0, 100)`
    /// where each term is the weighted, normalized sub-score. The
    /// composite carries two-decimal precision; components are kept at
    /// full precision for auditing.
    pub fn score(&self, seo: &SeoMetrics, content: &ContentMetrics) -> ScoreRecord {
        let w = self.weights;

        let seo_component = w.seo * normalize::seo_blend(seo);
        let content_component = w.content * normalize::unit_score(content.quality as f64);
        let brandability_component =
            w.brandability * normalize::unit_score(content.brandability as f64);
        let spam_penalty = w.spam * normalize::spam_penalty(seo.spam_score as f64);

        let raw = 100.0 * (seo_component + content_component + brandability_component - spam_penalty);
        let composite = round2(raw.clamp(0.0, 100.0));

        ScoreRecord {
            composite,
            seo_component,
            content_component,
            brandability_component,
            spam_penalty,
            weights: w,
            scored_at: Utc::now(),
        }
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
