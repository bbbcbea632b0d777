//! View-state store for the presentation layer.
//!
//! Holds the last-fetched page of words, the stats snapshot, the pending
//! subset and the pagination cursor. All fetches go through the access layer;
//! the offset is derived from the current page exclusively.

mod guard;
mod modal;

pub use guard::RequestGuard;
pub use modal::{ConfirmModal, ConfirmPrompt, ModalState, VocabModal, VocabModalMode};

use std::sync::{Mutex, MutexGuard};

use crate::auth::Session;
use crate::errors::AppError;
use crate::models::{Vocabulary, VocabularyFilter, WordStats};
use crate::service::VocabularyService;

/// Default number of words per page.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

#[derive(Debug)]
struct StoreState {
    words: Vec<Vocabulary>,
    stats: Option<WordStats>,
    pending_words: Vec<Vocabulary>,
    current_page: u32,
    per_page: u32,
    total_items: u64,
    loading_words: bool,
    loading_stats: bool,
    error: Option<String>,
}

/// State container backing the vocabulary views.
pub struct VocabStore {
    service: VocabularyService,
    session: Session,
    state: Mutex<StoreState>,
    words_guard: RequestGuard,
    stats_guard: RequestGuard,
    pending_guard: RequestGuard,
}

impl VocabStore {
    pub fn new(service: VocabularyService, session: Session) -> Self {
        Self::with_page_size(service, session, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(service: VocabularyService, session: Session, per_page: u32) -> Self {
        Self {
            service,
            session,
            state: Mutex::new(StoreState {
                words: Vec::new(),
                stats: None,
                pending_words: Vec::new(),
                current_page: 1,
                per_page: per_page.max(1),
                total_items: 0,
                loading_words: false,
                loading_stats: false,
                error: None,
            }),
            words_guard: RequestGuard::default(),
            stats_guard: RequestGuard::default(),
            pending_guard: RequestGuard::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch the current page of words. The filter's limit/offset are always
    /// replaced by the pagination cursor.
    pub async fn load_words(&self, filter: &VocabularyFilter) -> Result<(), AppError> {
        let seq = self.words_guard.begin();

        let (page, per_page) = {
            let mut state = self.state();
            state.loading_words = true;
            state.error = None;
            (state.current_page, state.per_page)
        };

        let mut page_filter = filter.clone();
        page_filter.limit = Some(per_page);
        page_filter.offset = Some(u64::from(page - 1) * u64::from(per_page));

        let result = self.service.list(&self.session, &page_filter).await;

        let mut state = self.state();
        if !self.words_guard.is_current(seq) {
            // A later fetch owns the state now; drop this result
            return Ok(());
        }
        state.loading_words = false;

        match result {
            Ok(listing) => {
                state.words = listing.items;
                state.total_items = listing.total;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the stats snapshot.
    pub async fn load_stats(&self) -> Result<(), AppError> {
        let seq = self.stats_guard.begin();
        {
            let mut state = self.state();
            state.loading_stats = true;
            state.error = None;
        }

        let result = self.service.stats(&self.session).await;

        let mut state = self.state();
        if !self.stats_guard.is_current(seq) {
            return Ok(());
        }
        state.loading_stats = false;

        match result {
            Ok(stats) => {
                state.stats = Some(stats);
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the pending-words subset.
    pub async fn load_pending_words(&self) -> Result<(), AppError> {
        let seq = self.pending_guard.begin();
        self.state().error = None;

        let result = self.service.pending_words(&self.session).await;

        let mut state = self.state();
        if !self.pending_guard.is_current(seq) {
            return Ok(());
        }

        match result {
            Ok(words) => {
                state.pending_words = words;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    // ---- pagination ----

    pub async fn next_page(&self, filter: &VocabularyFilter) -> Result<(), AppError> {
        if !self.has_next_page() {
            return Ok(());
        }
        self.state().current_page += 1;
        self.load_words(filter).await
    }

    pub async fn prev_page(&self, filter: &VocabularyFilter) -> Result<(), AppError> {
        if !self.has_prev_page() {
            return Ok(());
        }
        self.state().current_page -= 1;
        self.load_words(filter).await
    }

    /// Jump to a page. A no-op outside [1, total_pages].
    pub async fn go_to_page(&self, page: u32, filter: &VocabularyFilter) -> Result<(), AppError> {
        if page < 1 || u64::from(page) > self.total_pages() {
            return Ok(());
        }
        self.state().current_page = page;
        self.load_words(filter).await
    }

    pub fn reset_pagination(&self) {
        let mut state = self.state();
        state.current_page = 1;
        state.total_items = 0;
    }

    // ---- derived state ----

    pub fn words(&self) -> Vec<Vocabulary> {
        self.state().words.clone()
    }

    pub fn stats(&self) -> Option<WordStats> {
        self.state().stats.clone()
    }

    pub fn pending_words(&self) -> Vec<Vocabulary> {
        self.state().pending_words.clone()
    }

    pub fn has_words(&self) -> bool {
        !self.state().words.is_empty()
    }

    pub fn current_page(&self) -> u32 {
        self.state().current_page
    }

    pub fn total_items(&self) -> u64 {
        self.state().total_items
    }

    pub fn total_pages(&self) -> u64 {
        let state = self.state();
        state.total_items.div_ceil(u64::from(state.per_page))
    }

    pub fn has_next_page(&self) -> bool {
        u64::from(self.current_page()) < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page() > 1
    }

    pub fn is_loading_words(&self) -> bool {
        self.state().loading_words
    }

    pub fn is_loading_stats(&self) -> bool {
        self.state().loading_stats
    }

    pub fn has_error(&self) -> bool {
        self.state().error.is_some()
    }

    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn clear_error(&self) {
        self.state().error = None;
    }
}
