//! Score records and the configurable weight vector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Tolerance when checking that weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight vector for the composite score.
///
/// The spam weight is applied as a penalty (subtracted), but it still
/// participates in the sum-to-1.0 constraint so vectors stay comparable
/// across configurations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the blended SEO sub-score.
    pub seo: f64,

    /// Weight of content quality.
    pub content: f64,

    /// Weight of name brandability.
    pub brandability: f64,

    /// Weight of the spam penalty.
    pub spam: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            seo: 0.40,
            content: 0.30,
            brandability: 0.20,
            spam: 0.10,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.seo + self.content + self.brandability + self.spam
    }

    /// Validate that all weights are non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<()> {
        let sum = self.sum();
        let non_negative =
            self.seo >= 0.0 && self.content >= 0.0 && self.brandability >= 0.0 && self.spam >= 0.0;

        if !non_negative || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(PipelineError::InvalidWeights { sum });
        }
        Ok(())
    }
}

/// Composite score plus its weighted component breakdown.
///
/// The weight vector used is recorded alongside the components so a
/// stored score stays auditable after the configuration changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Composite value score, 0-100, two-decimal precision.
    pub composite: f64,

    /// Weighted SEO contribution.
    pub seo_component: f64,

    /// Weighted content-quality contribution.
    pub content_component: f64,

    /// Weighted brandability contribution.
    pub brandability_component: f64,

    /// Weighted spam penalty (subtracted from the composite).
    pub spam_penalty: f64,

    /// Weight vector the engine used.
    pub weights: ScoreWeights,

    /// When the score was computed.
    pub scored_at: DateTime<Utc>,
}
