//! Repository for review records
//!
//! Every read and delete is filtered by owner in SQL; a row owned by another
//! identity behaves exactly like an absent one. No unscoped lookup is
//! exported from this module.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{NewReview, ReviewRecord};
use crate::Result;

/// Repository for managing stored reviews
pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new review and return the stored row
    pub async fn create(&self, review: NewReview) -> Result<ReviewRecord> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO reviews (owner, code, language, output_json, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&review.owner)
        .bind(&review.code)
        .bind(&review.language)
        .bind(&review.output_json)
        .bind(now)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.fetch_created(id).await
    }

    // Post-insert read of the row we just wrote; kept private so the crate
    // exposes no owner-unscoped lookup
    async fn fetch_created(&self, id: i64) -> Result<ReviewRecord> {
        sqlx::query_as::<_, ReviewRecord>("SELECT * FROM reviews WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await
            .map_err(Into::into)
    }

    /// Find a review by id, scoped to its owner
    pub async fn find(&self, owner: &str, id: i64) -> Result<Option<ReviewRecord>> {
        sqlx::query_as::<_, ReviewRecord>("SELECT * FROM reviews WHERE id = ? AND owner = ?")
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool)
            .await
            .map_err(Into::into)
    }

    /// List all reviews for an owner, newest first
    ///
    /// Ordering is by creation time; the id breaks ties within one timestamp.
    pub async fn list(&self, owner: &str) -> Result<Vec<ReviewRecord>> {
        sqlx::query_as::<_, ReviewRecord>(
            "SELECT * FROM reviews WHERE owner = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a review by id, scoped to its owner
    ///
    /// Returns whether a row was removed.
    pub async fn delete(&self, owner: &str, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ? AND owner = ?")
            .bind(id)
            .bind(owner)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn sample(owner: &str, code: &str) -> NewReview {
        NewReview {
            owner: owner.to_string(),
            code: code.to_string(),
            language: "python".to_string(),
            output_json: r#"{"summary":"ok"}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();

        let created = repo.create(sample("alice", "x = 1")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.owner, "alice");
        assert_eq!(created.code, "x = 1");
        assert_eq!(created.language, "python");
        assert_eq!(created.output_json, r#"{"summary":"ok"}"#);
    }

    #[tokio::test]
    async fn test_find_is_owner_scoped() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();

        let created = repo.create(sample("alice", "x = 1")).await.unwrap();

        let found = repo.find("alice", created.id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().code, "x = 1");

        // Someone else's id behaves exactly like an absent one
        assert!(repo.find("bob", created.id).await.unwrap().is_none());
        assert!(repo.find("alice", created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();

        let first = repo.create(sample("alice", "a = 1")).await.unwrap();
        let second = repo.create(sample("alice", "b = 2")).await.unwrap();
        let third = repo.create(sample("alice", "c = 3")).await.unwrap();

        let listed = repo.list("alice").await.unwrap();
        assert_eq!(
            listed.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![third.id, second.id, first.id]
        );
    }

    #[tokio::test]
    async fn test_list_excludes_other_owners() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();

        let alice = uuid::Uuid::new_v4().to_string();
        let bob = uuid::Uuid::new_v4().to_string();

        repo.create(sample(&alice, "a = 1")).await.unwrap();
        repo.create(sample(&alice, "a = 2")).await.unwrap();
        repo.create(sample(&bob, "b = 1")).await.unwrap();

        assert_eq!(repo.list(&alice).await.unwrap().len(), 2);
        assert_eq!(repo.list(&bob).await.unwrap().len(), 1);
        assert!(repo.list("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();

        let created = repo.create(sample("alice", "x = 1")).await.unwrap();

        // A non-owner cannot remove the row
        assert!(!repo.delete("bob", created.id).await.unwrap());
        assert!(repo.find("alice", created.id).await.unwrap().is_some());

        // The owner can, exactly once
        assert!(repo.delete("alice", created.id).await.unwrap());
        assert!(!repo.delete("alice", created.id).await.unwrap());
        assert!(repo.find("alice", created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.reviews();

        let keep = repo.create(sample("alice", "a = 1")).await.unwrap();
        let remove = repo.create(sample("alice", "b = 2")).await.unwrap();

        assert!(repo.delete("alice", remove.id).await.unwrap());

        let listed = repo.list("alice").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }
}
