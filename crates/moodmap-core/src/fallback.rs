use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A named demo location rendered when no real hotspot data is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub score: f64,
}

impl FallbackLocation {
    fn new(name: &str, lat: f64, lng: f64, score: f64) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lng,
            score,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FallbackFile {
    pub locations: Vec<FallbackLocation>,
}

/// The built-in fallback dataset: five central London areas.
#[must_use]
pub fn default_fallback_locations() -> Vec<FallbackLocation> {
    vec![
        FallbackLocation::new("Central London", 51.5074, -0.1278, 0.85),
        FallbackLocation::new("Westminster", 51.5012, -0.1426, 0.75),
        FallbackLocation::new("Shoreditch", 51.5177, -0.0753, 0.92),
        FallbackLocation::new("Camden", 51.5390, -0.1427, 0.88),
        FallbackLocation::new("South Bank", 51.5050, -0.1167, 0.79),
    ]
}

/// Load and validate a fallback dataset from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_fallback_locations(path: &Path) -> Result<Vec<FallbackLocation>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_fallback_locations(&content)
}

/// Parse and validate a fallback dataset from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_fallback_locations(content: &str) -> Result<Vec<FallbackLocation>, ConfigError> {
    let file: FallbackFile = serde_yaml::from_str(content)?;
    validate_locations(&file.locations)?;
    Ok(file.locations)
}

fn validate_locations(locations: &[FallbackLocation]) -> Result<(), ConfigError> {
    if locations.is_empty() {
        return Err(ConfigError::Validation(
            "fallback dataset must contain at least one location".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for loc in locations {
        if loc.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fallback location name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(loc.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate fallback location: '{}'",
                loc.name
            )));
        }
        if !(0.0..=1.0).contains(&loc.score) {
            return Err(ConfigError::Validation(format!(
                "fallback location '{}' has score {} outside [0, 1]",
                loc.name, loc.score
            )));
        }
        if !(-90.0..=90.0).contains(&loc.lat) || !(-180.0..=180.0).contains(&loc.lng) {
            return Err(ConfigError::Validation(format!(
                "fallback location '{}' has out-of-range coordinates ({}, {})",
                loc.name, loc.lat, loc.lng
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "fallback_test.rs"]
mod tests;
