//! Content analysis heuristics.
//!
//! Every function here is pure and deterministic: same text in, same
//! score out. The content stage composes them; the scoring engine never
//! calls them directly.

pub mod brandability;
pub mod keywords;
pub mod niche;
pub mod quality;
pub mod readability;
pub mod sentiment;
