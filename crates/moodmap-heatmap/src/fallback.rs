//! Deterministic substitute output for when no real hotspots exist.

use moodmap_core::FallbackLocation;

use crate::geojson::{Feature, FeatureCollection, HotspotProperties};

/// Synthetic review count per unit of fallback score.
const REVIEW_COUNT_SCALE: f64 = 50.0;

/// Render the fallback dataset for `emotion`.
///
/// Each location becomes a `Point` feature with `weight = score * 10` and
/// `review_count = round(score * 50)`.
#[must_use]
pub fn render_fallback(emotion: &str, locations: &[FallbackLocation]) -> FeatureCollection {
    let features = locations
        .iter()
        .map(|loc| Feature {
            geometry: serde_json::json!({
                "type": "Point",
                "coordinates": [loc.lng, loc.lat],
            }),
            properties: HotspotProperties::new(
                &loc.name,
                emotion,
                loc.score,
                synthetic_review_count(loc.score),
            ),
        })
        .collect();

    FeatureCollection { features }
}

/// Ties round to even: `0.85` yields 42, not 43.
#[allow(clippy::cast_possible_truncation)]
fn synthetic_review_count(score: f64) -> i64 {
    (score * REVIEW_COUNT_SCALE).round_ties_even() as i64
}
