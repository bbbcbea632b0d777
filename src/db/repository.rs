//! Database repository for vocabulary CRUD operations.
//!
//! Every query is scoped to the owning user id. Uses prepared statements and
//! transactions for data integrity.

use chrono::{Duration, SecondsFormat, Utc};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateVocabularyRequest, Listing, StatusFilter, UpdateVocabularyRequest, Vocabulary,
    VocabularyFilter, VocabularyStatus, WordStats,
};

/// Default page size when the filter does not specify a limit.
pub const DEFAULT_LIMIT: u32 = 10;

const SELECT_COLUMNS: &str = "SELECT id, user_id, word, translation, example, pronunciation, \
     word_type, status, created_at FROM vocabularies";

/// Database repository for all vocabulary data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's vocabulary with optional filters, newest first, plus the
    /// total count of matching rows.
    pub async fn list(
        &self,
        user_id: &str,
        filter: &VocabularyFilter,
    ) -> Result<Listing<Vocabulary>, AppError> {
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT) as i64;
        let offset = i64::try_from(filter.offset.unwrap_or(0)).unwrap_or(i64::MAX);

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM vocabularies");
        push_filters(&mut count_query, user_id, filter);
        let total: i64 = count_query.build().fetch_one(&self.pool).await?.get(0);

        let mut query = QueryBuilder::new(SELECT_COLUMNS);
        push_filters(&mut query, user_id, filter);
        // rowid breaks ties between records created in the same microsecond
        query.push(" ORDER BY created_at DESC, rowid DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let rows = query.build().fetch_all(&self.pool).await?;

        Ok(Listing {
            items: rows.iter().map(vocabulary_from_row).collect(),
            total: total as u64,
        })
    }

    /// Words still waiting to be studied, oldest first (FIFO processing order).
    pub async fn list_pending(&self, user_id: &str) -> Result<Vec<Vocabulary>, AppError> {
        let sql = format!(
            "{} WHERE user_id = ? AND status IN ('new', 'pending') \
             ORDER BY created_at ASC, rowid ASC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(vocabulary_from_row).collect())
    }

    /// Get a single record by id. Exactly one row is expected; anything else
    /// is an error.
    pub async fn get_by_id(&self, user_id: &str, id: &str) -> Result<Vocabulary, AppError> {
        let sql = format!("{} WHERE user_id = ? AND id = ?", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(vocabulary_from_row)
            .ok_or_else(|| AppError::NotFound(format!("Vocabulary {} not found", id)))
    }

    /// Create a new record. The id and creation timestamp are assigned here;
    /// the owner always comes from the authenticated identity.
    pub async fn create(
        &self,
        user_id: &str,
        request: &CreateVocabularyRequest,
    ) -> Result<Vocabulary, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_timestamp();
        let status = request.status.unwrap_or(VocabularyStatus::New);

        sqlx::query(
            "INSERT INTO vocabularies \
             (id, user_id, word, translation, example, pronunciation, word_type, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(&request.word)
        .bind(&request.translation)
        .bind(&request.example)
        .bind(&request.pronunciation)
        .bind(&request.word_type)
        .bind(status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Vocabulary {
            id,
            user_id: user_id.to_string(),
            word: request.word.clone(),
            translation: request.translation.clone(),
            example: request.example.clone(),
            pronunciation: request.pronunciation.clone(),
            word_type: request.word_type.clone(),
            status,
            created_at: now,
        })
    }

    /// Create records from raw word strings: trim whitespace, drop empties,
    /// uppercase the survivors, tag each with the owner.
    ///
    /// The batch is inserted in one transaction, so a single failed row rolls
    /// back the whole batch.
    pub async fn create_bulk(
        &self,
        user_id: &str,
        words: &[String],
    ) -> Result<Vec<Vocabulary>, AppError> {
        let cleaned: Vec<String> = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_uppercase())
            .collect();

        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(cleaned.len());

        for word in cleaned {
            let id = uuid::Uuid::new_v4().to_string();
            let now = now_timestamp();

            sqlx::query(
                "INSERT INTO vocabularies (id, user_id, word, status, created_at) \
                 VALUES (?, ?, ?, 'new', ?)",
            )
            .bind(&id)
            .bind(user_id)
            .bind(&word)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            created.push(Vocabulary {
                id,
                user_id: user_id.to_string(),
                word,
                translation: None,
                example: None,
                pronunciation: None,
                word_type: None,
                status: VocabularyStatus::New,
                created_at: now,
            });
        }

        tx.commit().await?;

        Ok(created)
    }

    /// Partial update by id, scoped to the owner.
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        request: &UpdateVocabularyRequest,
    ) -> Result<Vocabulary, AppError> {
        let existing = self.get_by_id(user_id, id).await?;

        let word = request.word.clone().unwrap_or(existing.word);
        let translation = request.translation.clone().or(existing.translation);
        let example = request.example.clone().or(existing.example);
        let pronunciation = request.pronunciation.clone().or(existing.pronunciation);
        let word_type = request.word_type.clone().or(existing.word_type);
        let status = request.status.unwrap_or(existing.status);

        sqlx::query(
            "UPDATE vocabularies SET word = ?, translation = ?, example = ?, \
             pronunciation = ?, word_type = ?, status = ? WHERE id = ? AND user_id = ?",
        )
        .bind(&word)
        .bind(&translation)
        .bind(&example)
        .bind(&pronunciation)
        .bind(&word_type)
        .bind(status.as_str())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Vocabulary {
            id: id.to_string(),
            user_id: user_id.to_string(),
            word,
            translation,
            example,
            pronunciation,
            word_type,
            status,
            created_at: existing.created_at,
        })
    }

    /// Delete a record, scoped to the owner.
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vocabularies WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vocabulary {} not found", id)));
        }

        Ok(())
    }

    /// Aggregate stats over a user's records, computed in SQL.
    pub async fn stats(&self, user_id: &str) -> Result<WordStats, AppError> {
        let now = Utc::now();
        let recent_cutoff = (now - Duration::days(7)).to_rfc3339_opts(SecondsFormat::Micros, true);
        let today_cutoff = format!("{}T00:00:00.000000Z", now.format("%Y-%m-%d"));
        let month_cutoff = format!("{}-01T00:00:00.000000Z", now.format("%Y-%m"));

        let row = sqlx::query(
            "SELECT COUNT(*) AS total, \
             COALESCE(SUM(CASE WHEN created_at >= ? THEN 1 ELSE 0 END), 0) AS recent, \
             COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0) AS pending, \
             COALESCE(SUM(CASE WHEN status = 'complete' THEN 1 ELSE 0 END), 0) AS complete, \
             COALESCE(SUM(CASE WHEN created_at >= ? THEN 1 ELSE 0 END), 0) AS today, \
             COALESCE(SUM(CASE WHEN created_at >= ? THEN 1 ELSE 0 END), 0) AS this_month \
             FROM vocabularies WHERE user_id = ?",
        )
        .bind(&recent_cutoff)
        .bind(&today_cutoff)
        .bind(&month_cutoff)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(WordStats {
            total: row.get::<i64, _>("total") as u64,
            recent: row.get::<i64, _>("recent") as u64,
            pending: row.get::<i64, _>("pending") as u64,
            complete: row.get::<i64, _>("complete") as u64,
            today: row.get::<i64, _>("today") as u64,
            this_month: row.get::<i64, _>("this_month") as u64,
        })
    }
}

/// Append the WHERE clause shared by the listing and count queries.
fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, user_id: &str, filter: &VocabularyFilter) {
    query.push(" WHERE user_id = ");
    query.push_bind(user_id.to_string());

    match &filter.status {
        Some(StatusFilter::One(status)) => {
            query.push(" AND status = ");
            query.push_bind(status.as_str());
        }
        Some(StatusFilter::Many(statuses)) => {
            query.push(" AND status IN (");
            let mut separated = query.separated(", ");
            for status in statuses {
                separated.push_bind(status.as_str());
            }
            separated.push_unseparated(")");
        }
        None => {}
    }

    if let Some(search) = &filter.search {
        // SQLite LIKE is case-insensitive for ASCII
        let pattern = format!("%{}%", search);
        query.push(" AND (word LIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR translation LIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    if let Some(word_type) = &filter.word_type {
        query.push(" AND word_type = ");
        query.push_bind(word_type.to_string());
    }
}

/// Backend-assigned creation timestamp. Microsecond precision keeps the TEXT
/// column lexicographically ordered by creation time.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn vocabulary_from_row(row: &sqlx::sqlite::SqliteRow) -> Vocabulary {
    let status: String = row.get("status");
    Vocabulary {
        id: row.get("id"),
        user_id: row.get("user_id"),
        word: row.get("word"),
        translation: row.get("translation"),
        example: row.get("example"),
        pronunciation: row.get("pronunciation"),
        word_type: row.get("word_type"),
        status: VocabularyStatus::from_str(&status).unwrap_or(VocabularyStatus::New),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use tempfile::TempDir;

    async fn test_repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn word_request(word: &str, status: Option<VocabularyStatus>) -> CreateVocabularyRequest {
        CreateVocabularyRequest {
            word: word.to_string(),
            translation: None,
            example: None,
            pronunciation: None,
            word_type: None,
            status,
        }
    }

    #[tokio::test]
    async fn test_list_status_set_membership() {
        let (repo, _dir) = test_repo().await;

        // 5 rows for u1: 3 new, 1 pending, 1 complete
        repo.create("u1", &word_request("ONE", None)).await.unwrap();
        repo.create("u1", &word_request("TWO", None)).await.unwrap();
        repo.create("u1", &word_request("THREE", Some(VocabularyStatus::Pending)))
            .await
            .unwrap();
        repo.create("u1", &word_request("FOUR", Some(VocabularyStatus::Complete)))
            .await
            .unwrap();
        repo.create("u1", &word_request("FIVE", None)).await.unwrap();

        let filter = VocabularyFilter {
            status: Some(StatusFilter::Many(vec![
                VocabularyStatus::New,
                VocabularyStatus::Pending,
            ])),
            limit: Some(2),
            offset: Some(0),
            ..Default::default()
        };

        let listing = repo.list("u1", &filter).await.unwrap();

        // The 2 most recent of the 4 matching rows, total count of the match
        assert_eq!(listing.total, 4);
        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[0].word, "FIVE");
        assert_eq!(listing.items[1].word, "THREE");
        for item in &listing.items {
            assert_ne!(item.status, VocabularyStatus::Complete);
        }
    }

    #[tokio::test]
    async fn test_list_search_matches_word_or_translation() {
        let (repo, _dir) = test_repo().await;

        repo.create(
            "u1",
            &CreateVocabularyRequest {
                translation: Some("perro".to_string()),
                ..word_request("DOG", None)
            },
        )
        .await
        .unwrap();
        repo.create(
            "u1",
            &CreateVocabularyRequest {
                translation: Some("gato".to_string()),
                ..word_request("CAT", None)
            },
        )
        .await
        .unwrap();

        // Case-insensitive, matches the word column
        let by_word = repo
            .list(
                "u1",
                &VocabularyFilter {
                    search: Some("dog".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_word.total, 1);
        assert_eq!(by_word.items[0].word, "DOG");

        // Substring of the translation column
        let by_translation = repo
            .list(
                "u1",
                &VocabularyFilter {
                    search: Some("gat".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_translation.total, 1);
        assert_eq!(by_translation.items[0].word, "CAT");
    }

    #[tokio::test]
    async fn test_list_type_filter_and_owner_scope() {
        let (repo, _dir) = test_repo().await;

        repo.create(
            "u1",
            &CreateVocabularyRequest {
                word_type: Some("noun".to_string()),
                ..word_request("HOUSE", None)
            },
        )
        .await
        .unwrap();
        repo.create(
            "u1",
            &CreateVocabularyRequest {
                word_type: Some("verb".to_string()),
                ..word_request("RUN", None)
            },
        )
        .await
        .unwrap();
        repo.create(
            "u2",
            &CreateVocabularyRequest {
                word_type: Some("noun".to_string()),
                ..word_request("TREE", None)
            },
        )
        .await
        .unwrap();

        let listing = repo
            .list(
                "u1",
                &VocabularyFilter {
                    word_type: Some("noun".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(listing.total, 1);
        assert_eq!(listing.items[0].word, "HOUSE");
    }

    #[tokio::test]
    async fn test_list_pending_fifo_order() {
        let (repo, _dir) = test_repo().await;

        repo.create("u1", &word_request("FIRST", None)).await.unwrap();
        repo.create("u1", &word_request("DONE", Some(VocabularyStatus::Complete)))
            .await
            .unwrap();
        repo.create("u1", &word_request("SECOND", Some(VocabularyStatus::Pending)))
            .await
            .unwrap();

        let pending = repo.list_pending("u1").await.unwrap();

        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].word, "FIRST");
        assert_eq!(pending[1].word, "SECOND");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_is_an_error() {
        let (repo, _dir) = test_repo().await;

        let result = repo.get_by_id("u1", "no-such-id").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        // A record owned by another user is also not found
        let created = repo.create("u2", &word_request("HIDDEN", None)).await.unwrap();
        let result = repo.get_by_id("u1", &created.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_bulk_trims_and_uppercases() {
        let (repo, _dir) = test_repo().await;

        let words = vec!["  dog ".to_string(), "".to_string(), "CAT".to_string()];
        let created = repo.create_bulk("u1", &words).await.unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(created[0].word, "DOG");
        assert_eq!(created[1].word, "CAT");
        for record in &created {
            assert_eq!(record.user_id, "u1");
            assert_eq!(record.status, VocabularyStatus::New);
        }

        let listing = repo.list("u1", &VocabularyFilter::default()).await.unwrap();
        assert_eq!(listing.total, 2);
    }

    #[tokio::test]
    async fn test_create_bulk_all_blank_inserts_nothing() {
        let (repo, _dir) = test_repo().await;

        let words = vec!["   ".to_string(), "".to_string()];
        let created = repo.create_bulk("u1", &words).await.unwrap();
        assert!(created.is_empty());

        let listing = repo.list("u1", &VocabularyFilter::default()).await.unwrap();
        assert_eq!(listing.total, 0);
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let (repo, _dir) = test_repo().await;

        let created = repo
            .create(
                "u1",
                &CreateVocabularyRequest {
                    translation: Some("perro".to_string()),
                    ..word_request("DOG", None)
                },
            )
            .await
            .unwrap();

        let updated = repo
            .update(
                "u1",
                &created.id,
                &UpdateVocabularyRequest {
                    status: Some(VocabularyStatus::Complete),
                    example: Some("The dog barks.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.word, "DOG");
        assert_eq!(updated.translation.as_deref(), Some("perro"));
        assert_eq!(updated.example.as_deref(), Some("The dog barks."));
        assert_eq!(updated.status, VocabularyStatus::Complete);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_respect_owner() {
        let (repo, _dir) = test_repo().await;

        let created = repo.create("u2", &word_request("THEIRS", None)).await.unwrap();

        let update = repo
            .update("u1", &created.id, &UpdateVocabularyRequest::default())
            .await;
        assert!(matches!(update, Err(AppError::NotFound(_))));

        let delete = repo.delete("u1", &created.id).await;
        assert!(matches!(delete, Err(AppError::NotFound(_))));

        // Still there for its owner
        assert!(repo.get_by_id("u2", &created.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let (repo, _dir) = test_repo().await;

        repo.create("u1", &word_request("A", None)).await.unwrap();
        repo.create("u1", &word_request("B", Some(VocabularyStatus::Pending)))
            .await
            .unwrap();
        repo.create("u1", &word_request("C", Some(VocabularyStatus::Complete)))
            .await
            .unwrap();
        repo.create("u2", &word_request("OTHER", None)).await.unwrap();

        let stats = repo.stats("u1").await.unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.complete, 1);
        // Everything was created just now
        assert_eq!(stats.recent, 3);
        assert_eq!(stats.today, 3);
        assert_eq!(stats.this_month, 3);
    }
}
