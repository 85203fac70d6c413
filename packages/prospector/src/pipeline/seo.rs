//! SEO enrichment stage.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};
use crate::providers::synthetic::SyntheticSeoProvider;
use crate::traits::provider::SeoProvider;
use crate::types::domain::{DomainRecord, DomainStatus};
use crate::types::metrics::{DataSource, SeoMetrics, SeoObservation};

/// Enrich a discovered record with SEO metrics and advance it to
/// `seo_analyzed`.
///
/// Providers are consulted in priority order under a per-call timeout;
/// per metric, the first successful reading wins. Metrics no provider
/// covered are filled from the synthetic distribution. The record is
/// tagged `fallback` only when every provider was unavailable. Invoking
/// this on a record that is not `discovered` is an orchestration error,
/// not a silent skip.
pub async fn enrich_seo(
    record: &mut DomainRecord,
    providers: &[Arc<dyn SeoProvider>],
    call_timeout: Duration,
) -> Result<()> {
    if record.status != DomainStatus::Discovered {
        return Err(PipelineError::InvalidTransition {
            from: record.status,
            to: DomainStatus::SeoAnalyzed,
        });
    }

    let mut observation = SeoObservation::default();
    let mut any_real = false;

    for provider in providers {
        match tokio::time::timeout(call_timeout, provider.fetch_seo(&record.name)).await {
            Ok(Ok(partial)) => {
                if partial.has_any() {
                    any_real = true;
                }
                observation.merge_missing_from(&partial);
            }
            Ok(Err(e)) => {
                warn!(
                    domain = %record.name,
                    provider = provider.name(),
                    error = %e,
                    "SEO provider unavailable"
                );
            }
            Err(_) => {
                warn!(
                    domain = %record.name,
                    provider = provider.name(),
                    timeout_secs = call_timeout.as_secs(),
                    "SEO provider timed out"
                );
            }
        }

        if observation.is_complete() {
            break;
        }
    }

    if !observation.is_complete() {
        observation.merge_missing_from(&SyntheticSeoProvider::observation(&record.name));
    }

    let source = if any_real {
        DataSource::Real
    } else {
        DataSource::Fallback
    };
    if source.is_fallback() {
        debug!(domain = %record.name, "all SEO providers unavailable, using fallback metrics");
    }

    record.seo = Some(SeoMetrics::from_observation(&observation, source));
    record.advance(DomainStatus::SeoAnalyzed)
}
