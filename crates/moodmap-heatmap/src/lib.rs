//! Emotional hotspot aggregation for moodmap.
//!
//! Matches point-located venues to neighborhood centers by great-circle
//! distance, averages the emotion scores of their reviews, upserts one hotspot
//! per `(neighborhood, emotion)` pair, and renders the result as a GeoJSON
//! `FeatureCollection`. When the pipeline produces nothing, or any storage
//! call fails, a fixed fallback dataset is rendered instead.

pub mod aggregate;
pub mod error;
pub mod fallback;
pub mod geo;
pub mod geojson;
pub mod geometry;
pub mod pipeline;
pub mod proximity;
pub mod types;

pub use aggregate::{aggregate_scores, summarize, ScoreSummary};
pub use error::{GeometryError, HeatmapError};
pub use fallback::render_fallback;
pub use geo::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use geojson::{render_hotspots, Feature, FeatureCollection, HotspotProperties};
pub use geometry::point_center;
pub use pipeline::HeatmapGenerator;
pub use proximity::{nearby_venue_ids, DEFAULT_PROXIMITY_RADIUS_KM};
pub use types::{HeatmapConfig, HeatmapOutcome, HeatmapRun, NeighborhoodScore};
