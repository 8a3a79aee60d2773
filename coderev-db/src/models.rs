//! Data models for stored reviews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored review row
///
/// `code`, `language`, and `output_json` are immutable after creation; the
/// store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewRecord {
    /// Row id assigned by the store
    pub id: i64,

    /// Identity that owns this review; every read and delete is scoped to it
    pub owner: String,

    /// The submitted code, verbatim
    pub code: String,

    /// Canonical language tag the review was generated for
    pub language: String,

    /// Serialized review output (JSON object)
    pub output_json: String,

    /// When this review was created
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new review
///
/// Carries everything the caller decides; id and timestamp come from the
/// store at insert time.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub owner: String,
    pub code: String,
    pub language: String,
    pub output_json: String,
}
