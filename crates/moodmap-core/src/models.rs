//! Domain records read and written by the hotspot pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-located place that reviews are attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    /// WGS84 degrees.
    pub latitude: f64,
    /// WGS84 degrees.
    pub longitude: f64,
    pub category: Option<String>,
}

/// A city neighborhood.
///
/// `geometry` is the stored GeoJSON geometry text, kept verbatim. It is
/// usually a `Point` but may be any geometry type, or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub geometry: String,
}

/// Aggregated sentiment for one `(neighborhood, emotion)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalHotspot {
    pub id: i64,
    pub neighborhood_id: i64,
    pub emotion: String,
    pub average_score: f64,
    pub review_count: i32,
    pub last_updated: DateTime<Utc>,
}

/// Write request for one hotspot row, keyed by `(neighborhood_id, emotion)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotUpsert {
    pub neighborhood_id: i64,
    pub emotion: String,
    pub average_score: f64,
    pub review_count: i32,
}

/// Outcome counts of a hotspot batch write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: u64,
    pub updated: u64,
}
