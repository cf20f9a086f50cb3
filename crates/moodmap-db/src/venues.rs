//! Database operations for the `venues` table.

use chrono::{DateTime, Utc};
use moodmap_core::Venue;
use sqlx::{PgExecutor, PgPool};

use crate::DbError;

/// Input record for inserting a venue.
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
}

/// A row from the `venues` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VenueRow {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            category: row.category,
        }
    }
}

/// List every venue, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_venues<'e, E>(executor: E) -> Result<Vec<VenueRow>, DbError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, VenueRow>(
        "SELECT id, name, address, latitude, longitude, category, created_at \
         FROM venues \
         ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Insert a venue and return its generated id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including coordinates
/// outside the WGS84 range.
pub async fn insert_venue(pool: &PgPool, venue: &NewVenue) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO venues (name, address, latitude, longitude, category) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id",
    )
    .bind(&venue.name)
    .bind(&venue.address)
    .bind(venue.latitude)
    .bind(venue.longitude)
    .bind(&venue.category)
    .fetch_one(pool)
    .await?;

    Ok(id)
}
