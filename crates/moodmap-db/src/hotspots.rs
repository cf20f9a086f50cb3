//! Database operations for the `emotional_hotspots` table.

use chrono::{DateTime, Utc};
use moodmap_core::{EmotionalHotspot, HotspotUpsert, UpsertSummary};
use sqlx::PgPool;

use crate::DbError;

/// A row from `emotional_hotspots`, joined with its neighborhood name.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HotspotRow {
    pub id: i64,
    pub neighborhood_id: i64,
    pub neighborhood_name: String,
    pub emotion: String,
    pub average_score: f64,
    pub review_count: i32,
    pub last_updated: DateTime<Utc>,
}

impl From<HotspotRow> for EmotionalHotspot {
    fn from(row: HotspotRow) -> Self {
        Self {
            id: row.id,
            neighborhood_id: row.neighborhood_id,
            emotion: row.emotion,
            average_score: row.average_score,
            review_count: row.review_count,
            last_updated: row.last_updated,
        }
    }
}

/// Insert or overwrite hotspots keyed by `(neighborhood_id, emotion)`.
///
/// Existing rows get their `average_score` and `review_count` replaced and
/// `last_updated` refreshed. All rows run inside a single transaction; if any
/// statement fails the whole batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn upsert_hotspots(
    pool: &PgPool,
    rows: &[HotspotUpsert],
) -> Result<UpsertSummary, DbError> {
    let mut summary = UpsertSummary::default();
    if rows.is_empty() {
        return Ok(summary);
    }

    let mut tx = pool.begin().await?;

    for row in rows {
        let is_new: bool = sqlx::query_scalar(
            "INSERT INTO emotional_hotspots \
                 (neighborhood_id, emotion, average_score, review_count) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (neighborhood_id, emotion) DO UPDATE SET \
                 average_score = EXCLUDED.average_score, \
                 review_count  = EXCLUDED.review_count, \
                 last_updated  = NOW() \
             RETURNING (xmax = 0) AS is_new",
        )
        .bind(row.neighborhood_id)
        .bind(&row.emotion)
        .bind(row.average_score)
        .bind(row.review_count)
        .fetch_one(&mut *tx)
        .await?;

        if is_new {
            summary.inserted += 1;
        } else {
            summary.updated += 1;
        }
    }

    tx.commit().await?;
    Ok(summary)
}

/// List stored hotspots, optionally filtered by emotion.
///
/// Ordered by `average_score DESC`, then neighborhood name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_hotspots(
    pool: &PgPool,
    emotion: Option<&str>,
) -> Result<Vec<HotspotRow>, DbError> {
    let rows = sqlx::query_as::<_, HotspotRow>(
        "SELECT h.id, h.neighborhood_id, n.name AS neighborhood_name, h.emotion, \
                h.average_score, h.review_count, h.last_updated \
         FROM emotional_hotspots h \
         JOIN neighborhoods n ON n.id = h.neighborhood_id \
         WHERE ($1::TEXT IS NULL OR h.emotion = $1) \
         ORDER BY h.average_score DESC, n.name",
    )
    .bind(emotion)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
