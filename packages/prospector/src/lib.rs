//! Expired-Domain Prospecting Library
//!
//! Discovers expired domains, enriches each with SEO and content
//! signals, and computes a composite 0-100 value score to rank
//! acquisition candidates.
//!
//! # Design Philosophy
//!
//! - One provider interface, real and synthetic variants: stage code
//!   never branches on "mock vs live"
//! - Unavailability is data, not failure: provider outages degrade to
//!   tagged fallback metrics and the batch keeps moving
//! - Explicit state machine: a closed status enum with a transition
//!   table, advanced exactly once per stage
//! - Pure scoring: independently testable normalization curves under a
//!   validated weight vector
//!
//! # Usage
//!
//! ```rust,ignore
//! use prospector::{
//!     MemoryRepository, Pipeline, PipelineConfig, ProviderSettings, ScoreWeights,
//!     StaticSource, WaybackSource, provider_stack,
//! };
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let repo = Arc::new(MemoryRepository::new());
//! let settings = ProviderSettings::new().with_moz_key(std::env::var("MOZ_API_KEY")?);
//! let pipeline = Pipeline::new(
//!     repo.clone(),
//!     provider_stack(&settings),
//!     Box::new(WaybackSource::new()),
//!     ScoreWeights::default(),
//!     PipelineConfig::default(),
//! )?;
//!
//! pipeline.discover(&StaticSource::expired_samples()).await?;
//! let summary = pipeline.run_batch(&CancellationToken::new()).await?;
//!
//! let ranked = prospector::report::top_domains(repo.as_ref(), &Default::default()).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (SeoProvider, ArchiveSource, DiscoverySource, DomainRepository)
//! - [`types`] - Domain records, metrics, scores, configuration
//! - [`pipeline`] - Discovery ingestion, enrichment stages, batch orchestrator
//! - [`scoring`] - Normalization curves and the weighted engine
//! - [`analysis`] - Pure content heuristics (niche, quality, sentiment, keywords, readability, brandability)
//! - [`providers`] - Real vendors, synthetic fallback, rate limiting, factory
//! - [`archive`] - Historical content retrieval (Wayback)
//! - [`stores`] - Repository implementations (MemoryRepository)
//! - [`report`] - Read-only ranking queries
//! - [`testing`] - Mock implementations for testing

pub mod analysis;
pub mod archive;
pub mod error;
pub mod pipeline;
pub mod providers;
pub mod report;
pub mod scoring;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    PipelineError, ProviderError, ProviderResult, RepoResult, RepositoryError, Result,
};
pub use traits::{
    discovery::{DiscoverySource, StaticSource},
    provider::{ArchiveSource, SeoProvider},
    repository::DomainRepository,
};
pub use types::{
    config::{PipelineConfig, ProviderSettings},
    domain::{DomainCandidate, DomainName, DomainRecord, DomainStatus},
    metrics::{ContentMetrics, DataSource, SeoMetrics, SeoObservation},
    score::{ScoreRecord, ScoreWeights},
};

// Re-export the pipeline and engine
pub use pipeline::{
    enrich_content, enrich_seo, ingest_candidates, BatchSummary, DiscoverySummary, Pipeline,
};
pub use scoring::ScoringEngine;

// Re-export providers and collaborators
pub use archive::WaybackSource;
pub use providers::{
    fallback_content, provider_stack, shared_limiter, AhrefsProvider, MozProvider, RateLimited,
    SharedRateLimiter, SyntheticSeoProvider,
};

// Re-export stores and reporting
pub use report::{top_domains, ReportFilter};
pub use security::SecretString;
pub use stores::MemoryRepository;

// Re-export testing utilities
pub use testing::{FailingRepository, MockArchiveSource, MockSeoProvider};
