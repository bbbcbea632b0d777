//! Aggregate statistics over a user's vocabulary.

use serde::{Deserialize, Serialize};

/// Server-computed stats snapshot. Counts are derived in SQL; consumers treat
/// this as an opaque read model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    pub total: u64,
    /// Records created within the last 7 days.
    pub recent: u64,
    pub pending: u64,
    pub complete: u64,
    pub today: u64,
    pub this_month: u64,
}
