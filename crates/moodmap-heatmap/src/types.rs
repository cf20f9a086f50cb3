use moodmap_core::{
    default_fallback_locations, load_fallback_locations, AppConfig, ConfigError,
    FallbackLocation, Neighborhood,
};

use crate::aggregate::ScoreSummary;
use crate::error::HeatmapError;
use crate::geojson::FeatureCollection;
use crate::proximity::DEFAULT_PROXIMITY_RADIUS_KM;

/// Tunables for [`HeatmapGenerator`](crate::HeatmapGenerator).
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    /// Maximum venue distance from a neighborhood center, in kilometers.
    pub radius_km: f64,
    /// Locations rendered when no real hotspot data is available.
    pub fallback: Vec<FallbackLocation>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_PROXIMITY_RADIUS_KM,
            fallback: default_fallback_locations(),
        }
    }
}

impl HeatmapConfig {
    /// Build from application config, loading the fallback YAML if one is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the fallback file cannot be loaded or is invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let fallback = match &config.fallback_path {
            Some(path) => load_fallback_locations(path)?,
            None => default_fallback_locations(),
        };

        Ok(Self {
            radius_km: config.proximity_radius_km,
            fallback,
        })
    }
}

/// A neighborhood that produced an aggregation result.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodScore {
    pub neighborhood: Neighborhood,
    pub summary: ScoreSummary,
}

/// How a heatmap run terminated.
#[derive(Debug)]
pub enum HeatmapOutcome {
    /// Hotspots were persisted and rendered from real data.
    RealData {
        hotspots: usize,
        inserted: u64,
        updated: u64,
    },
    /// The fallback dataset was rendered; nothing was persisted.
    Fallback { reason: HeatmapError },
}

/// A rendered heatmap plus the outcome that produced it.
#[derive(Debug)]
pub struct HeatmapRun {
    pub collection: FeatureCollection,
    pub outcome: HeatmapOutcome,
}

impl HeatmapRun {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, HeatmapOutcome::Fallback { .. })
    }
}
