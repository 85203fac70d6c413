//! Historical content retrieval collaborators.

pub mod wayback;

pub use wayback::WaybackSource;
