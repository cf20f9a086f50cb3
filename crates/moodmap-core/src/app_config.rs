use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Venues within this great-circle distance of a neighborhood center count
    /// toward its hotspot.
    pub proximity_radius_km: f64,
    /// Optional YAML file replacing the built-in fallback dataset.
    pub fallback_path: Option<PathBuf>,
    pub neighborhoods_path: PathBuf,
    pub default_emotion: String,
    pub refresh_emotions: Vec<String>,
    pub refresh_cron: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("proximity_radius_km", &self.proximity_radius_km)
            .field("fallback_path", &self.fallback_path)
            .field("neighborhoods_path", &self.neighborhoods_path)
            .field("default_emotion", &self.default_emotion)
            .field("refresh_emotions", &self.refresh_emotions)
            .field("refresh_cron", &self.refresh_cron)
            .finish()
    }
}
