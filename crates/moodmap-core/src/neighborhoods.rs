use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A neighborhood declared in the seed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodConfig {
    pub name: String,
    pub city: String,
    /// Representative latitude of the neighborhood center.
    pub lat: f64,
    /// Representative longitude of the neighborhood center.
    pub lng: f64,
}

impl NeighborhoodConfig {
    /// GeoJSON `Point` geometry text for the neighborhood center.
    ///
    /// Coordinates are written in RFC 7946 `[lng, lat]` order.
    #[must_use]
    pub fn geometry(&self) -> String {
        serde_json::json!({
            "type": "Point",
            "coordinates": [self.lng, self.lat],
        })
        .to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct NeighborhoodsFile {
    pub neighborhoods: Vec<NeighborhoodConfig>,
}

/// Load and validate the neighborhoods seed file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_neighborhoods(path: &Path) -> Result<NeighborhoodsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: NeighborhoodsFile = serde_yaml::from_str(&content)?;
    validate_neighborhoods(&file)?;
    Ok(file)
}

fn validate_neighborhoods(file: &NeighborhoodsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for hood in &file.neighborhoods {
        if hood.name.trim().is_empty() || hood.city.trim().is_empty() {
            return Err(ConfigError::Validation(
                "neighborhood name and city must be non-empty".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&hood.lat) || !(-180.0..=180.0).contains(&hood.lng) {
            return Err(ConfigError::Validation(format!(
                "neighborhood '{}' has out-of-range coordinates ({}, {})",
                hood.name, hood.lat, hood.lng
            )));
        }

        let key = (hood.name.to_lowercase(), hood.city.to_lowercase());
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate neighborhood: '{}' in '{}'",
                hood.name, hood.city
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "neighborhoods_test.rs"]
mod tests;
