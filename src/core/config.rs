//! Configuration management for the NASA MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and an optional `.env` file) on top of defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};

/// Public fallback key accepted by api.nasa.gov with reduced rate limits.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// NASA endpoint locations and per-endpoint timeouts.
    pub nasa: NasaConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// api.nasa.gov key. Get a free key at: https://api.nasa.gov/
    pub nasa_api_key: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.nasa_api_key == DEMO_API_KEY {
            DEMO_API_KEY
        } else {
            "[REDACTED]"
        };
        f.debug_struct("CredentialsConfig")
            .field("nasa_api_key", &key)
            .finish()
    }
}

impl CredentialsConfig {
    /// Whether requests go out with the public demo key.
    pub fn uses_demo_key(&self) -> bool {
        self.nasa_api_key == DEMO_API_KEY
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            nasa_api_key: DEMO_API_KEY.to_string(),
        }
    }
}

/// NASA endpoints used by the tools.
///
/// The URLs are fixed in production; they are kept here so tests can point
/// the fetchers at a local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NasaConfig {
    /// Astronomy Picture of the Day endpoint.
    pub apod_url: String,

    /// Seconds to wait for the APOD endpoint.
    pub apod_timeout_secs: u64,

    /// Image and Video Library search endpoint.
    pub image_search_url: String,

    /// Seconds to wait for the image search endpoint.
    pub image_search_timeout_secs: u64,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            apod_url: "https://api.nasa.gov/planetary/apod".to_string(),
            apod_timeout_secs: 30,
            image_search_url: "https://images-api.nasa.gov/search".to_string(),
            image_search_timeout_secs: 15,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "nasa-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            nasa: NasaConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first, then the process environment. Server settings use
    /// the `MCP_` prefix (`MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TRANSPORT`,
    /// ...). The NASA key is read from `NASA_API_KEY` and falls back to
    /// [`DEMO_API_KEY`]; check [`CredentialsConfig::uses_demo_key`] once
    /// logging is up.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_process_env()
    }

    /// Build the configuration from the process environment only.
    pub(crate) fn from_process_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(api_key) = std::env::var("NASA_API_KEY") {
            if !api_key.is_empty() {
                config.credentials.nasa_api_key = api_key;
            }
        }

        config
    }
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_from_env() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("NASA_API_KEY", "test_key_12345");
        }
        let config = Config::from_process_env();
        unsafe {
            std::env::remove_var("NASA_API_KEY");
        }
        assert_eq!(config.credentials.nasa_api_key, "test_key_12345");
        assert!(!config.credentials.uses_demo_key());
    }

    #[test]
    fn test_api_key_default_fallback() {
        let _lock = lock_env();
        unsafe {
            std::env::remove_var("NASA_API_KEY");
        }
        let config = Config::from_process_env();
        assert_eq!(config.credentials.nasa_api_key, DEMO_API_KEY);
        assert!(config.credentials.uses_demo_key());
    }

    #[test]
    fn test_empty_api_key_falls_back() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("NASA_API_KEY", "");
        }
        let config = Config::from_process_env();
        unsafe {
            std::env::remove_var("NASA_API_KEY");
        }
        assert!(config.credentials.uses_demo_key());
    }

    #[test]
    fn test_server_name_and_level_from_env() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "apod-only");
            std::env::set_var("MCP_LOG_LEVEL", "debug");
        }
        let config = Config::from_process_env();
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
            std::env::remove_var("MCP_LOG_LEVEL");
        }
        assert_eq!(config.server.name, "apod-only");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            nasa_api_key: "super_secret_key".to_string(),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_default_endpoints() {
        let config = Config::default();
        assert_eq!(config.nasa.apod_url, "https://api.nasa.gov/planetary/apod");
        assert_eq!(config.nasa.apod_timeout_secs, 30);
        assert_eq!(config.nasa.image_search_url, "https://images-api.nasa.gov/search");
        assert_eq!(config.nasa.image_search_timeout_secs, 15);
    }
}
