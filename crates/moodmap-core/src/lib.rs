pub mod app_config;
pub mod config;
pub mod fallback;
pub mod models;
pub mod neighborhoods;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, resolve_emotion};
pub use fallback::{default_fallback_locations, load_fallback_locations, FallbackLocation};
pub use models::{EmotionalHotspot, HotspotUpsert, Neighborhood, UpsertSummary, Venue};
pub use neighborhoods::{load_neighborhoods, NeighborhoodConfig, NeighborhoodsFile};
pub use store::{HeatmapSnapshot, HeatmapStore};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    FileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
