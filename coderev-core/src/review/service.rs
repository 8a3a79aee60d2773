//! Review orchestration
//!
//! One request is one sequential pipeline: validate, classify when needed,
//! one model call, one persistence write. Validation and upstream failures
//! abort before anything is written, so a stored review always reflects a
//! fully successful generation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use coderev_db::{Database, NewReview, ReviewRecord};

use crate::language::resolve_language;
use crate::model::ReviewModel;
use crate::review::ReviewOutput;
use crate::{Error, Result};

/// One persisted review with its output decoded
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: i64,
    pub owner: String,
    pub code: String,
    pub language: String,
    pub output: ReviewOutput,
    pub created_at: DateTime<Utc>,
}

impl Review {
    fn from_record(record: ReviewRecord) -> Result<Self> {
        let output: ReviewOutput = serde_json::from_str(&record.output_json)?;
        Ok(Self {
            id: record.id,
            owner: record.owner,
            code: record.code,
            language: record.language,
            output,
            created_at: record.created_at,
        })
    }
}

/// History listing item
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSummary {
    pub id: i64,
    pub language: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Orchestrates validation, generation, and owner-scoped persistence
///
/// The model adapter is injected behind [`ReviewModel`] and shared across
/// concurrent requests; the service holds no other mutable state.
pub struct ReviewService {
    model: Arc<dyn ReviewModel>,
    db: Database,
}

impl ReviewService {
    /// Create a service from an adapter and an open database
    pub fn new(model: Arc<dyn ReviewModel>, db: Database) -> Self {
        Self { model, db }
    }

    /// Generate and persist a review for a code snippet
    ///
    /// Fails with [`Error::Validation`] before any model call when `code` or
    /// `language` is empty. Adapter failures propagate with nothing persisted.
    pub async fn analyze(&self, owner: &str, code: &str, language: &str) -> Result<Review> {
        if code.is_empty() {
            return Err(Error::Validation("code is required".to_string()));
        }
        if language.is_empty() {
            return Err(Error::Validation("language is required".to_string()));
        }

        let output = self.model.generate_review(code, language).await?;

        let record = self
            .db
            .reviews()
            .create(NewReview {
                owner: owner.to_string(),
                code: code.to_string(),
                language: language.to_string(),
                output_json: serde_json::to_string(&output)?,
            })
            .await?;

        info!(owner, id = record.id, language, "Created review");

        Review::from_record(record)
    }

    /// Generate and persist a review for an uploaded file
    ///
    /// The bytes must decode as UTF-8 and contain more than whitespace. The
    /// language comes from `explicit_language` when given, otherwise from the
    /// file name.
    pub async fn analyze_upload(
        &self,
        owner: &str,
        bytes: &[u8],
        file_name: &str,
        explicit_language: Option<&str>,
    ) -> Result<Review> {
        let code = std::str::from_utf8(bytes)
            .map_err(|_| Error::Validation("uploaded file is not valid UTF-8".to_string()))?;

        if code.trim().is_empty() {
            return Err(Error::Validation("uploaded file is empty".to_string()));
        }

        let language = resolve_language(explicit_language, file_name);
        debug!(owner, file_name, language = %language, "Classified upload");

        self.analyze(owner, code, &language).await
    }

    /// List the caller's reviews, newest first
    pub async fn history(&self, owner: &str) -> Result<Vec<ReviewSummary>> {
        let records = self.db.reviews().list(owner).await?;

        records
            .into_iter()
            .map(|record| {
                let output: ReviewOutput = serde_json::from_str(&record.output_json)?;
                Ok(ReviewSummary {
                    id: record.id,
                    language: record.language,
                    summary: output.summary,
                    created_at: record.created_at,
                })
            })
            .collect()
    }

    /// Fetch one review owned by the caller
    ///
    /// A review owned by someone else is indistinguishable from an absent one.
    pub async fn get(&self, owner: &str, id: i64) -> Result<Review> {
        let record = self
            .db
            .reviews()
            .find(owner, id)
            .await?
            .ok_or(Error::NotFound(id))?;

        Review::from_record(record)
    }

    /// Delete one review owned by the caller, irreversibly
    pub async fn delete(&self, owner: &str, id: i64) -> Result<()> {
        let deleted = self.db.reviews().delete(owner, id).await?;

        if !deleted {
            return Err(Error::NotFound(id));
        }

        info!(owner, id, "Deleted review");
        Ok(())
    }
}
