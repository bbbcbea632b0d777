//! Data models for the vocabulary backend.
//!
//! These models match the JSON contract consumed by the presentation layer.

mod stats;
mod vocabulary;

pub use stats::*;
pub use vocabulary::*;
