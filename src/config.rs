use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::services::ClusterEndpoints;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub cluster_api: ClusterApiSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_cluster_player_path")]
    pub cluster_player_path: String,
    #[serde(default = "default_cluster_all_path")]
    pub cluster_all_path: String,
    #[serde(default = "default_players_path")]
    pub players_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClusterApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cluster_player_path: default_cluster_player_path(),
            cluster_all_path: default_cluster_all_path(),
            players_path: default_players_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClusterApiSettings {
    pub fn endpoints(&self) -> ClusterEndpoints {
        ClusterEndpoints {
            cluster_player: self.cluster_player_path.clone(),
            cluster_all: self.cluster_all_path.clone(),
            players: self.players_path.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String { "http://127.0.0.1:5000".to_string() }
fn default_cluster_player_path() -> String { "/cluster-player".to_string() }
fn default_cluster_all_path() -> String { "/cluster-all".to_string() }
fn default_players_path() -> String { "/players".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to the plain compact format
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

impl LoggingSettings {
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.format)
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PLAYER_CLUSTER_)
    /// 5. CLUSTER_API_URL for the clustering API base URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PLAYER_CLUSTER__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        let settings = apply_api_url_override(settings, std::env::var("CLUSTER_API_URL").ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PLAYER_CLUSTER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Point the client at `api_url` when one is given
fn apply_api_url_override(settings: Config, api_url: Option<String>) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = api_url {
        builder = builder.set_override("cluster_api.base_url", url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_cluster_api() {
        let api = ClusterApiSettings::default();
        assert_eq!(api.base_url, "http://127.0.0.1:5000");
        assert_eq!(api.cluster_player_path, "/cluster-player");
        assert_eq!(api.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_log_format_names() {
        assert_eq!(LoggingSettings::default().log_format(), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("text"), LogFormat::Compact);
    }

    #[test]
    fn test_api_url_override() {
        let base = Config::builder()
            .set_default("cluster_api.base_url", "http://127.0.0.1:5000")
            .unwrap()
            .build()
            .unwrap();

        let overridden = apply_api_url_override(base, Some("http://cluster.internal:9000".to_string()))
            .unwrap();
        let settings: Settings = overridden.try_deserialize().unwrap();

        assert_eq!(settings.cluster_api.base_url, "http://cluster.internal:9000");
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("player-cluster-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[cluster_api]\nbase_url = \"http://10.0.0.5:5000\"\ntimeout_secs = 5"
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.cluster_api.base_url, "http://10.0.0.5:5000");
        assert_eq!(settings.cluster_api.timeout_secs, 5);
        assert_eq!(settings.cluster_api.players_path, "/players");
        assert_eq!(settings.logging.level, "info");
    }
}
