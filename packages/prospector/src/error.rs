//! Typed errors for the prospector library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

use crate::types::domain::DomainStatus;

/// Errors that can occur while driving the enrichment pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Candidate name is not a well-formed domain. Rejected before the
    /// pipeline; providers never see malformed names.
    #[error("invalid domain name: {name}")]
    Validation { name: String },

    /// Status transition not present in the transition table.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: DomainStatus, to: DomainStatus },

    /// Repository read/write failure after retries.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Scoring weight vector does not sum to 1.0.
    #[error("scoring weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    /// Domain not present in the repository.
    #[error("domain not found: {name}")]
    NotFound { name: String },

    /// Record reached a stage without the metrics that stage requires.
    #[error("metrics missing for {name} at status {status}")]
    IncompleteRecord { name: String, status: DomainStatus },
}

/// Errors from metric providers and content collaborators.
///
/// Every variant means "unavailable": callers substitute synthetic
/// fallback metrics instead of propagating these into the pipeline.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No credential configured for this provider.
    #[error("missing credential for {provider}")]
    MissingCredential { provider: String },

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider rejected the call due to rate limiting.
    #[error("rate limited by {provider}")]
    RateLimited { provider: String },

    /// API quota exhausted.
    #[error("quota exhausted for {provider}")]
    QuotaExhausted { provider: String },

    /// Call exceeded the configured timeout.
    #[error("provider call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Response did not match the expected shape.
    #[error("undecodable provider response: {0}")]
    Decode(String),
}

/// Errors from the domain repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Backend storage failure.
    #[error("storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Stored record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for repository operations.
pub type RepoResult<T> = std::result::Result<T, RepositoryError>;
