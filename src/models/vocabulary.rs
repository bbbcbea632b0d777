//! Vocabulary record model and its request/filter types.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a vocabulary record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyStatus {
    New,
    Pending,
    Complete,
}

impl VocabularyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyStatus::New => "new",
            VocabularyStatus::Pending => "pending",
            VocabularyStatus::Complete => "complete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(VocabularyStatus::New),
            "pending" => Some(VocabularyStatus::Pending),
            "complete" => Some(VocabularyStatus::Complete),
            _ => None,
        }
    }
}

/// A vocabulary word owned by a single user.
///
/// `id` and `created_at` are assigned by the backend on insert and are
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub id: String,
    pub user_id: String,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_type: Option<String>,
    pub status: VocabularyStatus,
    pub created_at: String,
}

/// Request body for creating a new vocabulary record.
///
/// The owner is never taken from the request; it always comes from the
/// authenticated identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVocabularyRequest {
    pub word: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub word_type: Option<String>,
    #[serde(default)]
    pub status: Option<VocabularyStatus>,
}

/// Request body for a partial update of an existing vocabulary record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVocabularyRequest {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub word_type: Option<String>,
    #[serde(default)]
    pub status: Option<VocabularyStatus>,
}

/// Request body for bulk creation from raw word strings.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkCreateRequest {
    pub words: Vec<String>,
}

/// Status filter: a single value or a set.
#[derive(Debug, Clone)]
pub enum StatusFilter {
    One(VocabularyStatus),
    Many(Vec<VocabularyStatus>),
}

/// Listing filter. Each fetch is independent; nothing couples limit/offset to
/// prior results.
#[derive(Debug, Clone, Default)]
pub struct VocabularyFilter {
    pub status: Option<StatusFilter>,
    /// Case-insensitive substring match over word OR translation.
    pub search: Option<String>,
    pub word_type: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

/// One page of records plus the total matching count.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            VocabularyStatus::New,
            VocabularyStatus::Pending,
            VocabularyStatus::Complete,
        ] {
            assert_eq!(VocabularyStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(VocabularyStatus::from_str("archived"), None);
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&VocabularyStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
