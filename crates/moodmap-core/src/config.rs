use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("MOODMAP_ENV", "development"))?;

    let bind_addr = or_default("MOODMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("MOODMAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("MOODMAP_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("MOODMAP_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("MOODMAP_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("MOODMAP_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let proximity_radius_km = parse_radius(&or_default("MOODMAP_PROXIMITY_RADIUS_KM", "2.0"))
        .map_err(|reason| invalid("MOODMAP_PROXIMITY_RADIUS_KM", reason))?;

    let fallback_path = lookup("MOODMAP_FALLBACK_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let neighborhoods_path = PathBuf::from(or_default(
        "MOODMAP_NEIGHBORHOODS_PATH",
        "./config/neighborhoods.yaml",
    ));

    let default_emotion = or_default("MOODMAP_DEFAULT_EMOTION", "joy").trim().to_string();
    if default_emotion.is_empty() {
        return Err(invalid(
            "MOODMAP_DEFAULT_EMOTION",
            "must be non-empty".to_string(),
        ));
    }

    let refresh_emotions = parse_emotion_list(&or_default(
        "MOODMAP_REFRESH_EMOTIONS",
        "joy,excitement,calm,trust,anticipation",
    ));
    if refresh_emotions.is_empty() {
        return Err(invalid(
            "MOODMAP_REFRESH_EMOTIONS",
            "must list at least one emotion".to_string(),
        ));
    }
    let refresh_cron = or_default("MOODMAP_REFRESH_CRON", "0 0 * * * *");

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        proximity_radius_km,
        fallback_path,
        neighborhoods_path,
        default_emotion,
        refresh_emotions,
        refresh_cron,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MOODMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_radius(raw: &str) -> Result<f64, String> {
    let radius = raw.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(format!("radius must be a finite, non-negative number of km, got {raw}"));
    }
    Ok(radius)
}

/// Resolve a requested emotion label against the configured default.
///
/// The label is trimmed; an absent or blank request yields `default`.
#[must_use]
pub fn resolve_emotion(requested: Option<&str>, default: &str) -> String {
    requested
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn parse_emotion_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
