//! Vocabulary API endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{ApiResponse, ApiResult};
use crate::auth::Session;
use crate::db::DEFAULT_LIMIT;
use crate::errors::AppError;
use crate::models::{
    BulkCreateRequest, CreateVocabularyRequest, StatusFilter, UpdateVocabularyRequest, Vocabulary,
    VocabularyFilter, VocabularyStatus, WordStats,
};
use crate::AppState;

/// Query parameters for GET /api/vocabularies.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Single status or a comma-separated set, e.g. `status=new,pending`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub word_type: Option<String>,
}

impl ListParams {
    /// Turn the raw query into a repository filter. The offset is derived
    /// from the page number exclusively.
    fn into_filter(self) -> Result<VocabularyFilter, AppError> {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(DEFAULT_LIMIT).max(1);

        let status = self.status.as_deref().map(parse_status).transpose()?;

        Ok(VocabularyFilter {
            status,
            search: self.search,
            word_type: self.word_type,
            limit: Some(per_page),
            // Widened before multiplying so an absurd page number cannot
            // overflow; the repository simply returns an empty page for it.
            offset: Some(u64::from(page - 1) * u64::from(per_page)),
        })
    }
}

fn parse_status(raw: &str) -> Result<StatusFilter, AppError> {
    let mut statuses = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        let status = VocabularyStatus::from_str(part)
            .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", part)))?;
        statuses.push(status);
    }

    match statuses.as_slice() {
        [single] => Ok(StatusFilter::One(*single)),
        _ => Ok(StatusFilter::Many(statuses)),
    }
}

/// GET /api/vocabularies - List the current user's words, newest first.
pub async fn list_vocabularies(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<Vocabulary>> {
    let filter = params.into_filter()?;
    let listing = state.service.list(&session, &filter).await?;
    Ok(ApiResponse::with_count(listing.items, listing.total))
}

/// GET /api/vocabularies/pending - Words waiting to be studied, oldest first.
pub async fn list_pending_words(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Vec<Vocabulary>> {
    let words = state.service.pending_words(&session).await?;
    let count = words.len() as u64;
    Ok(ApiResponse::with_count(words, count))
}

/// GET /api/vocabularies/stats - Aggregate stats snapshot.
pub async fn get_stats(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<WordStats> {
    let stats = state.service.stats(&session).await?;
    Ok(ApiResponse::new(stats))
}

/// GET /api/vocabularies/:id - Get a single word.
pub async fn get_vocabulary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<Vocabulary> {
    let vocabulary = state.service.get_by_id(&session, &id).await?;
    Ok(ApiResponse::new(vocabulary))
}

/// POST /api/vocabularies - Create a new word.
pub async fn create_vocabulary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<CreateVocabularyRequest>,
) -> ApiResult<Vocabulary> {
    let vocabulary = state.service.create(&session, &request).await?;
    Ok(ApiResponse::new(vocabulary))
}

/// POST /api/vocabularies/bulk - Create words from raw strings.
pub async fn create_vocabularies_bulk(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<BulkCreateRequest>,
) -> ApiResult<Vec<Vocabulary>> {
    let created = state.service.create_bulk(&session, &request.words).await?;
    let count = created.len() as u64;
    Ok(ApiResponse::with_count(created, count))
}

/// PUT /api/vocabularies/:id - Partially update a word.
pub async fn update_vocabulary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVocabularyRequest>,
) -> ApiResult<Vocabulary> {
    let vocabulary = state.service.update(&session, &id, &request).await?;
    Ok(ApiResponse::new(vocabulary))
}

/// DELETE /api/vocabularies/:id - Delete a word.
pub async fn delete_vocabulary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.service.delete(&session, &id).await?;
    Ok(ApiResponse::new(()))
}
