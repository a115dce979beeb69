//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally seeded from a `.env` file) or defaults.
//! The configuration is built once at start-up and then passed explicitly to
//! everything that needs it.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Default Apillon API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.apillon.io";

/// Default timeout applied to every Apillon request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Apillon API credentials.
    pub credentials: CredentialsConfig,

    /// Apillon endpoint and HTTP client settings.
    pub apillon: ApillonConfig,

    /// Restrictions on local paths read by the upload tools.
    pub security: SecurityConfig,
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

/// Apillon API key pair.
///
/// Missing values stay empty: the client is still built and the platform
/// rejects the calls remotely.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub api_key: String,
    pub api_secret: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &str| if value.is_empty() { "[EMPTY]" } else { "[REDACTED]" };
        f.debug_struct("CredentialsConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .finish()
    }
}

impl CredentialsConfig {
    /// Whether both halves of the key pair are present.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

/// Apillon endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApillonConfig {
    /// Base URL every platform call is made against.
    pub api_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApillonConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApillonConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Configuration for security and path validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Optional root directory for local reads.
    /// If None, no path restrictions are enforced.
    pub root_path: Option<PathBuf>,

    /// Whether symlinks may be followed when a root is configured.
    /// If false, symlinks resolving outside the root are rejected.
    pub allow_symlinks: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            allow_symlinks: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "apillon-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            apillon: ApillonConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Apillon settings use the `APILLON_` prefix (`APILLON_API_KEY`,
    /// `APILLON_API_SECRET`, `APILLON_API_URL`, `APILLON_TIMEOUT_SECS`),
    /// server settings the `MCP_` prefix.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        config.credentials.api_key = std::env::var("APILLON_API_KEY").unwrap_or_default();
        config.credentials.api_secret = std::env::var("APILLON_API_SECRET").unwrap_or_default();
        if config.credentials.is_complete() {
            info!("Apillon credentials loaded from environment");
        } else {
            warn!(
                "APILLON_API_KEY and/or APILLON_API_SECRET not set - \
                 platform calls will be rejected until both are provided"
            );
        }

        if let Ok(url) = std::env::var("APILLON_API_URL") {
            config.apillon.api_url = url;
        }

        if let Ok(timeout) = std::env::var("APILLON_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.apillon.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid APILLON_TIMEOUT_SECS value '{}', using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        if let Ok(root_path) = std::env::var("MCP_ROOT_PATH") {
            config.security.root_path = Some(PathBuf::from(root_path));
            info!("Path security enabled: root directory set to {:?}", config.security.root_path);
        }

        if let Ok(allow_symlinks) = std::env::var("MCP_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = allow_symlinks.parse().unwrap_or(true);
            info!("Symlinks allowed: {}", config.security.allow_symlinks);
        }

        config
    }
}
