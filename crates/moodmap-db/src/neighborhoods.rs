//! Database operations for the `neighborhoods` table.

use chrono::{DateTime, Utc};
use moodmap_core::{Neighborhood, NeighborhoodConfig};
use sqlx::{PgExecutor, PgPool};

use crate::DbError;

/// A row from the `neighborhoods` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NeighborhoodRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub geometry: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NeighborhoodRow> for Neighborhood {
    fn from(row: NeighborhoodRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            city: row.city,
            geometry: row.geometry,
        }
    }
}

/// List every neighborhood, ordered by id.
///
/// Accepts a pool or an open transaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_neighborhoods<'e, E>(executor: E) -> Result<Vec<NeighborhoodRow>, DbError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, NeighborhoodRow>(
        "SELECT id, name, city, geometry, created_at, updated_at \
         FROM neighborhoods \
         ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Insert a neighborhood with raw geometry text and return its id.
///
/// The geometry is stored verbatim; it is not validated here.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including a duplicate
/// `(name, city)` pair).
pub async fn insert_neighborhood(
    pool: &PgPool,
    name: &str,
    city: &str,
    geometry: &str,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO neighborhoods (name, city, geometry) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(name)
    .bind(city)
    .bind(geometry)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Upsert neighborhoods from the seed file, keyed by `(name, city)`.
///
/// Returns the number of neighborhoods processed. All upserts run inside a
/// single transaction; if any fails the whole batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_neighborhoods(
    pool: &PgPool,
    neighborhoods: &[NeighborhoodConfig],
) -> Result<usize, DbError> {
    let mut tx = pool.begin().await?;

    for hood in neighborhoods {
        sqlx::query(
            "INSERT INTO neighborhoods (name, city, geometry) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (name, city) DO UPDATE SET \
                 geometry = EXCLUDED.geometry, \
                 updated_at = NOW()",
        )
        .bind(&hood.name)
        .bind(&hood.city)
        .bind(hood.geometry())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(neighborhoods.len())
}
