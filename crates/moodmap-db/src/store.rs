//! Postgres-backed [`HeatmapStore`].

use std::collections::HashMap;

use moodmap_core::{
    HeatmapSnapshot, HeatmapStore, HotspotUpsert, Neighborhood, UpsertSummary, Venue,
};
use sqlx::PgPool;

use crate::DbError;

/// [`HeatmapStore`] over a shared [`PgPool`].
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgHeatmapStore {
    pool: PgPool,
}

impl PgHeatmapStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl HeatmapStore for PgHeatmapStore {
    type Error = DbError;

    /// All three reads share one `REPEATABLE READ READ ONLY` transaction, so
    /// reviews committed mid-read are either fully visible or not at all.
    async fn read_snapshot(&self, emotion: &str) -> Result<HeatmapSnapshot, DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let neighborhoods = crate::list_neighborhoods(&mut *tx).await?;
        let venues = crate::list_venues(&mut *tx).await?;
        let score_rows = crate::venue_scores(&mut *tx, emotion).await?;
        tx.commit().await?;

        let mut scores: HashMap<i64, Vec<f64>> = HashMap::new();
        for (venue_id, score) in score_rows {
            scores.entry(venue_id).or_default().push(score);
        }

        Ok(HeatmapSnapshot {
            neighborhoods: neighborhoods.into_iter().map(Neighborhood::from).collect(),
            venues: venues.into_iter().map(Venue::from).collect(),
            scores,
        })
    }

    async fn upsert_hotspots(&self, rows: &[HotspotUpsert]) -> Result<UpsertSummary, DbError> {
        crate::upsert_hotspots(&self.pool, rows).await
    }
}
