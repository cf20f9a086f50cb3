//! Database operations for the `reviews` and `emotion_scores` tables.

use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use crate::DbError;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Input record for inserting a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub venue_id: i64,
    pub source: String,
    pub text: String,
    pub reviewer_location: Option<String>,
    pub review_date: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert a review and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (e.g. unknown `venue_id`).
pub async fn insert_review(pool: &PgPool, review: &NewReview) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reviews (venue_id, source, text, reviewer_location, review_date) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(review.venue_id)
    .bind(&review.source)
    .bind(&review.text)
    .bind(&review.reviewer_location)
    .bind(review.review_date)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Attach an emotion score to a review and return the score's id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including scores outside `[0, 1]`.
pub async fn insert_emotion_score(
    pool: &PgPool,
    review_id: i64,
    emotion: &str,
    score: f64,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO emotion_scores (review_id, emotion, score) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(review_id)
    .bind(emotion)
    .bind(score)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Every `emotion` score as `(venue_id, score)`, ordered by venue then score id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn venue_scores<'e, E>(executor: E, emotion: &str) -> Result<Vec<(i64, f64)>, DbError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, (i64, f64)>(
        "SELECT r.venue_id, es.score \
         FROM emotion_scores es \
         JOIN reviews r ON r.id = es.review_id \
         WHERE es.emotion = $1 \
         ORDER BY r.venue_id, es.id",
    )
    .bind(emotion)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}
