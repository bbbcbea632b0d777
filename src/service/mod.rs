//! Vocabulary access layer.
//!
//! Wraps every repository call with the session preconditions: a signed-in
//! identity and a usable credential must exist before anything touches the
//! database. Errors propagate as [`AppError`] and are normalized at the HTTP
//! envelope and view-state boundaries.

use std::sync::Arc;

use crate::auth::Session;
use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{
    CreateVocabularyRequest, Listing, UpdateVocabularyRequest, Vocabulary, VocabularyFilter,
    WordStats,
};

/// Access layer over the vocabulary repository.
#[derive(Clone)]
pub struct VocabularyService {
    repo: Arc<Repository>,
}

impl VocabularyService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        session: &Session,
        filter: &VocabularyFilter,
    ) -> Result<Listing<Vocabulary>, AppError> {
        let user_id = session.require()?;
        self.repo.list(user_id, filter).await
    }

    pub async fn pending_words(&self, session: &Session) -> Result<Vec<Vocabulary>, AppError> {
        let user_id = session.require()?;
        self.repo.list_pending(user_id).await
    }

    pub async fn get_by_id(&self, session: &Session, id: &str) -> Result<Vocabulary, AppError> {
        let user_id = session.require()?;
        self.repo.get_by_id(user_id, id).await
    }

    pub async fn create(
        &self,
        session: &Session,
        request: &CreateVocabularyRequest,
    ) -> Result<Vocabulary, AppError> {
        let user_id = session.require()?;

        if request.word.trim().is_empty() {
            return Err(AppError::Validation("Word is required".to_string()));
        }

        self.repo.create(user_id, request).await
    }

    pub async fn create_bulk(
        &self,
        session: &Session,
        words: &[String],
    ) -> Result<Vec<Vocabulary>, AppError> {
        let user_id = session.require()?;

        if words.is_empty() {
            return Err(AppError::Validation("No words provided".to_string()));
        }

        self.repo.create_bulk(user_id, words).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: &str,
        request: &UpdateVocabularyRequest,
    ) -> Result<Vocabulary, AppError> {
        let user_id = session.require()?;
        self.repo.update(user_id, id, request).await
    }

    pub async fn delete(&self, session: &Session, id: &str) -> Result<(), AppError> {
        let user_id = session.require()?;
        self.repo.delete(user_id, id).await
    }

    pub async fn stats(&self, session: &Session) -> Result<WordStats, AppError> {
        let user_id = session.require()?;
        self.repo.stats(user_id).await
    }
}
