use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub model: ModelSettings,
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
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 4000 }
fn default_body_limit() -> usize { 1024 * 1024 }

/// Cross-origin policy. `allowed_origin = "*"` opens the API to any origin.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl CorsSettings {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origin.trim() == "*"
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
        }
    }
}

fn default_allowed_origin() -> String { "http://localhost:5173".to_string() }

/// Generative model provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
}

impl ModelSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

fn default_model() -> String { "gemini-2.0-flash".to_string() }
fn default_base_url() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_timeout_secs() -> u64 { 60 }

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

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with REVIEW_)
    /// 5. `GOOGLE_API_KEY` for the provider credential
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., REVIEW__SERVER__PORT -> server.port
            .add_source(review_environment())
            .build()?;

        let settings = apply_credential_override(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(review_environment())
            .build()?;

        let settings = apply_credential_override(settings)?;

        settings.try_deserialize()
    }
}

fn review_environment() -> Environment {
    Environment::with_prefix("REVIEW")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// The provider credential is conventionally exported as `GOOGLE_API_KEY`.
/// It is read once here; a missing key only surfaces when a review is requested.
fn apply_credential_override(settings: Config) -> Result<Config, ConfigError> {
    let builder = Config::builder().add_source(settings);

    match std::env::var("GOOGLE_API_KEY") {
        Ok(key) if !key.trim().is_empty() => builder.set_override("model.api_key", key)?.build(),
        _ => builder.build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.server.body_limit_bytes, 1024 * 1024);
        assert_eq!(settings.cors.allowed_origin, "http://localhost:5173");
        assert!(!settings.cors.allows_any_origin());
        assert_eq!(settings.model.model, "gemini-2.0-flash");
        assert_eq!(settings.model.timeout(), Duration::from_secs(60));
        assert!(settings.model.api_key.is_empty());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_wildcard_origin() {
        let cors = CorsSettings {
            allowed_origin: " * ".to_string(),
        };
        assert!(cors.allows_any_origin());
    }

    #[test]
    fn test_load_from_file_fills_missing_sections() {
        let path = std::env::temp_dir().join(format!("review-assist-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 8088\n\n[model]\ntimeout_secs = 5\ntemperature = 0.2").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 8088);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.model.timeout_secs, 5);
        assert_eq!(settings.model.temperature, Some(0.2));
        assert_eq!(settings.cors.allowed_origin, "http://localhost:5173");
    }
}
