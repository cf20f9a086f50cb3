//! GeoJSON (RFC 7946) rendering of hotspots.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::NeighborhoodScore;

/// Multiplier from average score to heatmap rendering intensity.
pub const WEIGHT_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Value,
    pub properties: HotspotProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotProperties {
    pub neighborhood: String,
    pub emotion: String,
    pub score: f64,
    pub weight: f64,
    pub review_count: i64,
}

impl HotspotProperties {
    #[must_use]
    pub fn new(neighborhood: &str, emotion: &str, score: f64, review_count: i64) -> Self {
        Self {
            neighborhood: neighborhood.to_string(),
            emotion: emotion.to_string(),
            score,
            weight: score * WEIGHT_SCALE,
            review_count,
        }
    }
}

impl FeatureCollection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Render one feature per scored neighborhood.
///
/// Each feature's geometry is the neighborhood's stored geometry, parsed but
/// otherwise untouched. Neighborhoods whose geometry is not valid JSON are
/// left out.
#[must_use]
pub fn render_hotspots(emotion: &str, scores: &[NeighborhoodScore]) -> FeatureCollection {
    let features = scores
        .iter()
        .filter_map(|scored| {
            let geometry = match serde_json::from_str::<Value>(&scored.neighborhood.geometry) {
                Ok(geometry) => geometry,
                Err(e) => {
                    tracing::debug!(
                        neighborhood_id = scored.neighborhood.id,
                        error = %e,
                        "skipping neighborhood with unparseable geometry"
                    );
                    return None;
                }
            };

            Some(Feature {
                geometry,
                properties: HotspotProperties::new(
                    &scored.neighborhood.name,
                    emotion,
                    scored.summary.average,
                    i64::from(scored.summary.review_count()),
                ),
            })
        })
        .collect();

    FeatureCollection { features }
}
