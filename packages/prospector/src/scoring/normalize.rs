//! Normalization curves mapping raw metrics into 0.0..1.0 sub-scores.
//!
//! Each curve is a pure function keyed by metric shape; the engine
//! composes them. All curves are monotonic in their input, and raw
//! values are clamped before normalization rather than rejected.

use crate::types::metrics::SeoMetrics;

/// Saturation scale for backlink counts: log10, full marks at 10^5.
pub const BACKLINK_SATURATION: f64 = 5.0;

/// Saturation scale for referring domains: full marks at 10^4.
pub const REFERRING_SATURATION: f64 = 4.0;

/// Saturation scale for organic traffic: full marks at 10^6.
pub const TRAFFIC_SATURATION: f64 = 6.0;

/// Internal blend weights for the SEO sub-score.
const DA_WEIGHT: f64 = 0.35;
const PA_WEIGHT: f64 = 0.10;
const BACKLINK_WEIGHT: f64 = 0.30;
const REFERRING_WEIGHT: f64 = 0.15;
const TRAFFIC_WEIGHT: f64 = 0.10;

/// Linear curve for 0-100 bounded scores (authority, quality,
/// brandability).
pub fn unit_score(raw: f64) -> f64 {
    raw.clamp(0.0, 100.0) / 100.0
}

/// Saturating log10 curve for unbounded counts.
///
/// `min(1, log10(n + 1) / scale)`: doubling a small count matters, very
/// large counts cannot dominate.
pub fn saturating_log(count: u64, scale: f64) -> f64 {
    ((count.saturating_add(1) as f64).log10() / scale).min(1.0)
}

/// Linear penalty curve for spam scores.
///
/// Higher raw spam yields a larger penalty sub-score; the engine
/// subtracts the weighted result. Linear rather than log so a 50-spam
/// domain is penalized exactly ten times a 5-spam domain.
pub fn spam_penalty(raw: f64) -> f64 {
    unit_score(raw)
}

/// Blend the individual SEO curves into one 0.0..1.0 sub-score.
pub fn seo_blend(seo: &SeoMetrics) -> f64 {
    DA_WEIGHT * unit_score(seo.domain_authority as f64)
        + PA_WEIGHT * unit_score(seo.page_authority as f64)
        + BACKLINK_WEIGHT * saturating_log(seo.backlinks, BACKLINK_SATURATION)
        + REFERRING_WEIGHT * saturating_log(seo.referring_domains, REFERRING_SATURATION)
        + TRAFFIC_WEIGHT * saturating_log(seo.organic_traffic, TRAFFIC_SATURATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metrics::{DataSource, SeoMetrics, SeoObservation};

    fn metrics(da: u32, backlinks: u64) -> SeoMetrics {
        SeoMetrics::from_observation(
            &SeoObservation {
                domain_authority: Some(da),
                backlinks: Some(backlinks),
                ..Default::default()
            },
            DataSource::Real,
        )
    }

    #[test]
    fn test_unit_score_clamps() {
        assert_eq!(unit_score(-5.0), 0.0);
        assert_eq!(unit_score(0.0), 0.0);
        assert_eq!(unit_score(45.0), 0.45);
        assert_eq!(unit_score(150.0), 1.0);
    }

    #[test]
    fn test_saturating_log_monotonic_and_capped() {
        assert_eq!(saturating_log(0, BACKLINK_SATURATION), 0.0);

        let small = saturating_log(100, BACKLINK_SATURATION);
        let large = saturating_log(10_000, BACKLINK_SATURATION);
        assert!(small < large);

        // 10^8 backlinks saturate at 1.0.
        assert_eq!(saturating_log(100_000_000, BACKLINK_SATURATION), 1.0);
    }

    #[test]
    fn test_spam_penalty_linear() {
        assert_eq!(spam_penalty(50.0), 10.0 * spam_penalty(5.0));
    }

    #[test]
    fn test_seo_blend_in_unit_range() {
        let weak = metrics(0, 0);
        let strong = SeoMetrics::from_observation(
            &SeoObservation {
                domain_authority: Some(100),
                page_authority: Some(100),
                backlinks: Some(u64::MAX / 2),
                referring_domains: Some(1_000_000),
                organic_traffic: Some(100_000_000),
                spam_score: Some(0),
            },
            DataSource::Real,
        );

        assert_eq!(seo_blend(&weak), 0.0);
        let top = seo_blend(&strong);
        assert!(top > 0.99 && top <= 1.0, "got {top}");
    }

    #[test]
    fn test_seo_blend_monotonic_in_authority() {
        assert!(seo_blend(&metrics(80, 500)) > seo_blend(&metrics(20, 500)));
    }
}
