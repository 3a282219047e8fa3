//! Configuration types and loading
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `TRACKER__SECTION__KEY` environment variables. Plain `HOST` and `PORT`
//! still override the server address.

use serde::{Deserialize, Serialize};

/// Default location of the optional config file (extension resolved by `config`)
pub const DEFAULT_CONFIG_FILE: &str = "config/tracker";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "TRACKER";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Reject requests that carry no acting user
    pub require_authentication: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_authentication: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,pt_server=debug,pt_api=debug,tower_http=debug".to_string(),
            json: false,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Config load error: {0}")]
    Load(#[from] ::config::ConfigError),
}

impl AppConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration using `path` as the optional config file
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AppConfig::default())?)
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: AppConfig = settings.try_deserialize()?;
        config.apply_legacy_env()?;
        Ok(config)
    }

    /// Apply `HOST` / `PORT` overrides
    fn apply_legacy_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("'{}' is not a valid port", port),
            })?;
        }
        Ok(())
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert!(config.auth.require_authentication);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_server_addr() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".to_string();
        let addr = config.server_addr();
        assert_eq!(addr.port(), 3000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn test_unparseable_host_falls_back_to_any() {
        let mut config = AppConfig::default();
        config.server.host = "not-an-ip".to_string();
        assert!(config.server_addr().ip().is_unspecified());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = AppConfig::load_from("does/not/exist/tracker").unwrap();
        assert!(!config.logging.filter.is_empty());
    }
}
