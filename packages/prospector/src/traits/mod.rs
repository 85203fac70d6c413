//! Core trait abstractions: providers, archive, discovery, repository.

pub mod discovery;
pub mod provider;
pub mod repository;

pub use discovery::{DiscoverySource, StaticSource};
pub use provider::{ArchiveSource, SeoProvider};
pub use repository::DomainRepository;
