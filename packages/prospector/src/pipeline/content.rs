//! Content enrichment stage.

use std::time::Duration;
use tracing::{debug, warn};

use crate::analysis::{brandability, keywords, niche, quality, readability, sentiment};
use crate::error::{PipelineError, Result};
use crate::providers::synthetic::fallback_content;
use crate::traits::provider::ArchiveSource;
use crate::types::domain::{DomainRecord, DomainStatus};
use crate::types::metrics::{ContentMetrics, DataSource};

/// Enrich a record with content metrics and advance it to
/// `content_analyzed`.
///
/// Historical text comes from the archive collaborator. Absence of
/// content is expected for expired domains and never fails the stage:
/// retrieval errors, timeouts, and empty snapshots all degrade to
/// name-derived fallback metrics.
pub async fn enrich_content(
    record: &mut DomainRecord,
    archive: &dyn ArchiveSource,
    call_timeout: Duration,
) -> Result<()> {
    if record.status != DomainStatus::SeoAnalyzed {
        return Err(PipelineError::InvalidTransition {
            from: record.status,
            to: DomainStatus::ContentAnalyzed,
        });
    }

    let history = match tokio::time::timeout(call_timeout, archive.fetch_history(&record.name)).await
    {
        Ok(Ok(Some(text))) if !text.trim().is_empty() => Some(text),
        Ok(Ok(_)) => {
            debug!(domain = %record.name, "no historical content");
            None
        }
        Ok(Err(e)) => {
            warn!(
                domain = %record.name,
                source = archive.name(),
                error = %e,
                "archive source unavailable"
            );
            None
        }
        Err(_) => {
            warn!(
                domain = %record.name,
                source = archive.name(),
                timeout_secs = call_timeout.as_secs(),
                "archive source timed out"
            );
            None
        }
    };

    let metrics = match history {
        Some(text) => analyze(record, &text),
        None => fallback_content(&record.name),
    };

    record.content = Some(metrics);
    record.advance(DomainStatus::ContentAnalyzed)
}

/// Run the analysis heuristics over retrieved historical text.
fn analyze(record: &DomainRecord, text: &str) -> ContentMetrics {
    ContentMetrics {
        niche: niche::classify(text),
        quality: quality::assess(text),
        sentiment: sentiment::polarity(text),
        keywords: keywords::extract(text, keywords::TOP_KEYWORDS),
        readability: readability::flesch(text),
        brandability: brandability::score(record.name.label()),
        source: DataSource::Real,
        analyzed_at: chrono::Utc::now(),
    }
}
