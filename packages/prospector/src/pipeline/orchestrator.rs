//! Batch orchestration across the enrichment stages.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{PipelineError, RepoResult, Result};
use crate::pipeline::content::enrich_content;
use crate::pipeline::discover::{ingest_candidates, DiscoverySummary};
use crate::pipeline::seo::enrich_seo;
use crate::providers::rate_limited::{shared_limiter, RateLimited};
use crate::scoring::ScoringEngine;
use crate::traits::discovery::DiscoverySource;
use crate::traits::provider::{ArchiveSource, SeoProvider};
use crate::traits::repository::DomainRepository;
use crate::types::config::PipelineConfig;
use crate::types::domain::{DomainName, DomainRecord, DomainStatus};
use crate::types::score::{ScoreRecord, ScoreWeights};

/// Per-stage counts for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records advanced to `seo_analyzed`.
    pub seo_analyzed: usize,

    /// Records advanced to `content_analyzed`.
    pub content_analyzed: usize,

    /// Records advanced to `scored`.
    pub scored: usize,

    /// Records that landed in `failed`.
    pub failed: usize,

    /// Records skipped because the batch was cancelled.
    pub skipped: usize,
}

/// What happened to one record within one stage pass.
enum StageOutcome {
    Advanced(DomainStatus),
    Skipped,
    Failed,
}

/// Drives domains through discovery → SEO → content → scoring.
///
/// Collaborators arrive through the constructor; stage logic never
/// reaches into ambient configuration. All outbound calls share one
/// rate limiter regardless of worker count.
pub struct Pipeline<R: DomainRepository> {
    repo: Arc<R>,
    providers: Vec<Arc<dyn SeoProvider>>,
    archive: Arc<dyn ArchiveSource>,
    engine: ScoringEngine,
    config: PipelineConfig,
}

impl<R: DomainRepository> Pipeline<R> {
    /// Create a pipeline.
    ///
    /// Fails fast with `InvalidWeights` when the weight vector does not
    /// sum to 1.0; no per-domain work happens with a bad configuration.
    pub fn new(
        repo: Arc<R>,
        providers: Vec<Box<dyn SeoProvider>>,
        archive: Box<dyn ArchiveSource>,
        weights: ScoreWeights,
        config: PipelineConfig,
    ) -> Result<Self> {
        let engine = ScoringEngine::new(weights)?;
        let limiter = shared_limiter(config.requests_per_second);

        let providers = providers
            .into_iter()
            .map(|p| Arc::new(RateLimited::new(p, limiter.clone())) as Arc<dyn SeoProvider>)
            .collect();
        let archive: Arc<dyn ArchiveSource> = Arc::new(RateLimited::new(archive, limiter));

        Ok(Self {
            repo,
            providers,
            archive,
            engine,
            config,
        })
    }

    /// The repository this pipeline writes to.
    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// Pull candidates from a discovery source and ingest them.
    ///
    /// A source failure is absorbed as an empty batch; discovery being
    /// down is not a pipeline failure.
    pub async fn discover(&self, source: &dyn DiscoverySource) -> Result<DiscoverySummary> {
        let candidates = match source.discover(self.config.max_candidates).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(source = source.name(), error = %e, "discovery source unavailable");
                Vec::new()
            }
        };
        ingest_candidates(self.repo.as_ref(), candidates).await
    }

    /// Run one batch: SEO over `discovered`, content over
    /// `seo_analyzed`, scoring over `content_analyzed`.
    ///
    /// Passes are barriers, so a domain never has two stages running at
    /// once, while a freshly discovered domain still reaches `scored`
    /// within a single call. One domain's failure never aborts its
    /// siblings. Cancelling stops scheduling new domains; in-flight
    /// ones finish.
    pub async fn run_batch(&self, cancel: &CancellationToken) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for status in [
            DomainStatus::Discovered,
            DomainStatus::SeoAnalyzed,
            DomainStatus::ContentAnalyzed,
        ] {
            self.run_pass(status, cancel, &mut summary).await?;
        }

        info!(
            seo_analyzed = summary.seo_analyzed,
            content_analyzed = summary.content_analyzed,
            scored = summary.scored,
            failed = summary.failed,
            skipped = summary.skipped,
            "batch complete"
        );

        Ok(summary)
    }

    /// Recompute the score of an already-enriched domain from its
    /// stored metrics, overwriting any existing score record.
    ///
    /// This is the one sanctioned re-entry into `scored`: no enrichment
    /// stage re-runs, and no duplicate record is created.
    pub async fn rescore(&self, name: &DomainName) -> Result<ScoreRecord> {
        let mut record = self
            .repo
            .get(name)
            .await
            .map_err(PipelineError::Repository)?
            .ok_or_else(|| PipelineError::NotFound {
                name: name.to_string(),
            })?;

        match record.status {
            DomainStatus::ContentAnalyzed | DomainStatus::Scored => {}
            other => {
                return Err(PipelineError::InvalidTransition {
                    from: other,
                    to: DomainStatus::Scored,
                })
            }
        }

        let score = self.compute_score(&record)?;
        record.score = Some(score.clone());
        if record.status == DomainStatus::ContentAnalyzed {
            record.advance(DomainStatus::Scored)?;
        }

        self.persist_with_retry(&record)
            .await
            .map_err(PipelineError::Repository)?;
        Ok(score)
    }

    /// Reset a failed record to `discovered` for re-processing.
    ///
    /// Administrative operation; previously persisted metrics stay on
    /// the record for diagnosis until the stages overwrite them.
    pub async fn reopen(&self, name: &DomainName) -> Result<()> {
        let mut record = self
            .repo
            .get(name)
            .await
            .map_err(PipelineError::Repository)?
            .ok_or_else(|| PipelineError::NotFound {
                name: name.to_string(),
            })?;

        record.advance(DomainStatus::Discovered)?;
        self.persist_with_retry(&record)
            .await
            .map_err(PipelineError::Repository)?;
        Ok(())
    }

    /// Run one stage pass over every record in `status`.
    async fn run_pass(
        &self,
        status: DomainStatus,
        cancel: &CancellationToken,
        summary: &mut BatchSummary,
    ) -> Result<()> {
        let records = self
            .repo
            .list_by_status(status)
            .await
            .map_err(PipelineError::Repository)?;
        if records.is_empty() {
            return Ok(());
        }

        let outcomes: Vec<StageOutcome> = stream::iter(records)
            .map(|record| self.process(record, cancel))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                StageOutcome::Advanced(DomainStatus::SeoAnalyzed) => summary.seo_analyzed += 1,
                StageOutcome::Advanced(DomainStatus::ContentAnalyzed) => {
                    summary.content_analyzed += 1
                }
                StageOutcome::Advanced(DomainStatus::Scored) => summary.scored += 1,
                StageOutcome::Advanced(_) => {}
                StageOutcome::Skipped => summary.skipped += 1,
                StageOutcome::Failed => summary.failed += 1,
            }
        }

        Ok(())
    }

    /// Run the next stage for one record and persist the result.
    async fn process(&self, mut record: DomainRecord, cancel: &CancellationToken) -> StageOutcome {
        if cancel.is_cancelled() {
            return StageOutcome::Skipped;
        }

        let step = match record.status {
            DomainStatus::Discovered => {
                enrich_seo(&mut record, &self.providers, self.config.provider_timeout).await
            }
            DomainStatus::SeoAnalyzed => {
                enrich_content(
                    &mut record,
                    self.archive.as_ref(),
                    self.config.provider_timeout,
                )
                .await
            }
            DomainStatus::ContentAnalyzed => self.apply_score(&mut record),
            // Terminal records are never scheduled; listing is by status.
            DomainStatus::Scored | DomainStatus::Failed => return StageOutcome::Skipped,
        };

        if let Err(e) = step {
            warn!(domain = %record.name, error = %e, "stage error");
            return StageOutcome::Failed;
        }

        match self.persist_with_retry(&record).await {
            Ok(()) => StageOutcome::Advanced(record.status),
            Err(e) => {
                warn!(
                    domain = %record.name,
                    error = %e,
                    "repository retries exhausted, marking domain failed"
                );
                self.mark_failed(record).await;
                StageOutcome::Failed
            }
        }
    }

    /// Score a record from its stored metrics and advance it.
    ///
    /// Always recomputes, so a stale score left behind by a re-opened
    /// record can never be persisted as current.
    fn apply_score(&self, record: &mut DomainRecord) -> Result<()> {
        let score = self.compute_score(record)?;
        record.score = Some(score);
        record.advance(DomainStatus::Scored)
    }

    /// Score a content-analyzed record from its stored metrics.
    fn compute_score(&self, record: &DomainRecord) -> Result<ScoreRecord> {
        let seo = record
            .seo
            .as_ref()
            .ok_or_else(|| PipelineError::IncompleteRecord {
                name: record.name.to_string(),
                status: record.status,
            })?;
        let content = record
            .content
            .as_ref()
            .ok_or_else(|| PipelineError::IncompleteRecord {
                name: record.name.to_string(),
                status: record.status,
            })?;

        Ok(self.engine.score(seo, content))
    }

    /// Upsert with bounded exponential backoff.
    async fn persist_with_retry(&self, record: &DomainRecord) -> RepoResult<()> {
        let mut backoff = self.config.retry_backoff;
        let mut attempt = 0;

        loop {
            match self.repo.upsert(record).await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.write_retries => {
                    attempt += 1;
                    warn!(
                        domain = %record.name,
                        attempt,
                        error = %e,
                        "repository write failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Best-effort transition to `failed` after retry exhaustion.
    ///
    /// The in-memory metrics stay on the record so a later successful
    /// write retains the last known state for diagnosis.
    async fn mark_failed(&self, mut record: DomainRecord) {
        if record.status.is_terminal() {
            return;
        }
        if record.advance(DomainStatus::Failed).is_err() {
            return;
        }
        if let Err(e) = self.repo.upsert(&record).await {
            warn!(domain = %record.name, error = %e, "could not persist failed status");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::memory::MemoryRepository;
    use crate::testing::{FailingRepository, MockArchiveSource, MockSeoProvider};
    use crate::traits::discovery::StaticSource;
    use crate::types::domain::DomainCandidate;
    use crate::types::metrics::{DataSource, SeoObservation};
    use std::time::Duration;

    fn fast_config() -> PipelineConfig {
        PipelineConfig::new()
            .with_requests_per_second(1000)
            .with_retry_backoff(Duration::from_millis(1))
            .with_provider_timeout(Duration::from_secs(1))
    }

    fn pipeline_with(
        repo: Arc<MemoryRepository>,
        providers: Vec<Box<dyn SeoProvider>>,
        archive: MockArchiveSource,
    ) -> Pipeline<MemoryRepository> {
        Pipeline::new(
            repo,
            providers,
            Box::new(archive),
            ScoreWeights::default(),
            fast_config(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_oldblog() {
        let repo = Arc::new(MemoryRepository::new());
        let provider = MockSeoProvider::named("vendor").with_observation(
            "oldblog.net",
            SeoObservation {
                domain_authority: Some(45),
                backlinks: Some(1200),
                spam_score: Some(5),
                ..Default::default()
            },
        );
        let archive = MockArchiveSource::new().with_history(
            "oldblog.net",
            "A travel blog with vacation guides and hotel reviews. Learn to \
             explore every destination with our step by step travel guide.",
        );
        let pipeline = pipeline_with(repo.clone(), vec![Box::new(provider)], archive);

        let discovery = StaticSource::new(
            "fixture",
            [DomainCandidate::new("oldblog.net", "expired_listings")],
        );
        let discovered = pipeline.discover(&discovery).await.unwrap();
        assert_eq!(discovered.accepted, 1);

        let summary = pipeline.run_batch(&CancellationToken::new()).await.unwrap();
        assert_eq!(summary.seo_analyzed, 1);
        assert_eq!(summary.content_analyzed, 1);
        assert_eq!(summary.scored, 1);
        assert_eq!(summary.failed, 0);

        let record = repo
            .get(&DomainName::parse("oldblog.net").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, DomainStatus::Scored);

        let seo = record.seo.as_ref().unwrap();
        assert_eq!(seo.domain_authority, 45);
        assert_eq!(seo.backlinks, 1200);
        assert_eq!(seo.source, DataSource::Real);

        let score = record.score.as_ref().unwrap();
        assert!(score.composite > 0.0 && score.composite <= 100.0);
        assert_eq!(score.weights, ScoreWeights::default());

        // Deterministic: recomputing from the same metrics is bit-identical.
        let engine = ScoringEngine::with_defaults();
        let recomputed = engine.score(seo, record.content.as_ref().unwrap());
        assert_eq!(recomputed.composite, score.composite);
    }

    #[tokio::test]
    async fn test_everything_unavailable_still_scores() {
        let repo = Arc::new(MemoryRepository::new());
        let pipeline = pipeline_with(
            repo.clone(),
            vec![Box::new(MockSeoProvider::named("dead").unavailable())],
            MockArchiveSource::new().unavailable(),
        );

        ingest_candidates(
            repo.as_ref(),
            vec![DomainCandidate::new("oldblog.net", "test")],
        )
        .await
        .unwrap();

        let summary = pipeline.run_batch(&CancellationToken::new()).await.unwrap();
        assert_eq!(summary.scored, 1);

        let record = repo
            .get(&DomainName::parse("oldblog.net").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, DomainStatus::Scored);
        assert_eq!(record.seo.as_ref().unwrap().source, DataSource::Fallback);
        assert_eq!(record.content.as_ref().unwrap().source, DataSource::Fallback);
    }

    #[tokio::test]
    async fn test_sibling_failure_does_not_abort_batch() {
        let repo = Arc::new(FailingRepository::new(MemoryRepository::new()));

        ingest_candidates(
            repo.as_ref(),
            vec![
                DomainCandidate::new("oldblog.net", "test"),
                DomainCandidate::new("doomed.net", "test"),
            ],
        )
        .await
        .unwrap();
        repo.fail_next_upserts("doomed.net", 100);

        let pipeline = Pipeline::new(
            repo.clone(),
            Vec::new(),
            Box::new(MockArchiveSource::new()),
            ScoreWeights::default(),
            fast_config().with_write_retries(1),
        )
        .unwrap();

        let summary = pipeline.run_batch(&CancellationToken::new()).await.unwrap();

        // The healthy sibling went all the way through.
        let healthy = repo
            .get(&DomainName::parse("oldblog.net").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(healthy.status, DomainStatus::Scored);
        assert!(summary.failed >= 1);
    }

    #[tokio::test]
    async fn test_cancelled_batch_schedules_nothing() {
        let repo = Arc::new(MemoryRepository::new());
        let pipeline = pipeline_with(repo.clone(), Vec::new(), MockArchiveSource::new());

        ingest_candidates(
            repo.as_ref(),
            vec![DomainCandidate::new("oldblog.net", "test")],
        )
        .await
        .unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let summary = pipeline.run_batch(&cancel).await.unwrap();

        assert_eq!(summary.scored, 0);
        assert_eq!(summary.skipped, 1);

        let record = repo
            .get(&DomainName::parse("oldblog.net").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, DomainStatus::Discovered);
    }

    #[tokio::test]
    async fn test_rescore_overwrites_without_rerunning_stages() {
        let repo = Arc::new(MemoryRepository::new());
        let pipeline = pipeline_with(repo.clone(), Vec::new(), MockArchiveSource::new());

        ingest_candidates(
            repo.as_ref(),
            vec![DomainCandidate::new("oldblog.net", "test")],
        )
        .await
        .unwrap();
        pipeline.run_batch(&CancellationToken::new()).await.unwrap();

        let name = DomainName::parse("oldblog.net").unwrap();
        let before = repo.get(&name).await.unwrap().unwrap();

        let score = pipeline.rescore(&name).await.unwrap();
        let after = repo.get(&name).await.unwrap().unwrap();

        assert_eq!(after.status, DomainStatus::Scored);
        assert_eq!(after.id, before.id);
        assert_eq!(repo.count().await.unwrap(), 1);
        // Same metrics, same weights: identical composite.
        assert_eq!(score.composite, before.score.unwrap().composite);
    }

    #[tokio::test]
    async fn test_rescore_rejects_unenriched_domain() {
        let repo = Arc::new(MemoryRepository::new());
        let pipeline = pipeline_with(repo.clone(), Vec::new(), MockArchiveSource::new());

        ingest_candidates(
            repo.as_ref(),
            vec![DomainCandidate::new("oldblog.net", "test")],
        )
        .await
        .unwrap();

        let err = pipeline
            .rescore(&DomainName::parse("oldblog.net").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_invalid_weights_fail_pipeline_construction() {
        let weights = ScoreWeights {
            seo: 0.5,
            content: 0.3,
            brandability: 0.2,
            spam: 0.2,
        };

        let result = Pipeline::new(
            Arc::new(MemoryRepository::new()),
            Vec::new(),
            Box::new(MockArchiveSource::new()),
            weights,
            fast_config(),
        );

        assert!(matches!(
            result.err(),
            Some(PipelineError::InvalidWeights { .. })
        ));
    }

    #[tokio::test]
    async fn test_reopen_failed_record() {
        let repo = Arc::new(FailingRepository::new(MemoryRepository::new()));

        ingest_candidates(
            repo.as_ref(),
            vec![DomainCandidate::new("oldblog.net", "test")],
        )
        .await
        .unwrap();

        let pipeline = Pipeline::new(
            repo.clone(),
            Vec::new(),
            Box::new(MockArchiveSource::new()),
            ScoreWeights::default(),
            fast_config().with_write_retries(0),
        )
        .unwrap();

        // The SEO stage write fails; the follow-up write that records
        // the failed status succeeds.
        repo.fail_next_upserts("oldblog.net", 1);
        let summary = pipeline.run_batch(&CancellationToken::new()).await.unwrap();
        assert_eq!(summary.failed, 1);

        let name = DomainName::parse("oldblog.net").unwrap();
        let record = repo.get(&name).await.unwrap().unwrap();
        assert_eq!(record.status, DomainStatus::Failed);
        // Diagnosis state survives: the metrics computed before the
        // write failure are still attached.
        assert!(record.seo.is_some());

        pipeline.reopen(&name).await.unwrap();
        let reopened = repo.get(&name).await.unwrap().unwrap();
        assert_eq!(reopened.status, DomainStatus::Discovered);

        // Re-processing runs to completion now.
        let summary = pipeline.run_batch(&CancellationToken::new()).await.unwrap();
        assert_eq!(summary.scored, 1);
    }
}
