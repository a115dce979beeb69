//! Transport selection.
//!
//! `MCP_TRANSPORT=http` picks the HTTP transport when it is compiled in.
//! Any other value, or none, picks STDIO.

use std::env;

use serde::{Deserialize, Serialize};

/// The transport the server runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// JSON-RPC frames on stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// Where the HTTP transport listens.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Route accepting JSON-RPC requests.
    pub rpc_path: String,
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Read `MCP_HTTP_HOST`, `MCP_HTTP_PORT`, `MCP_HTTP_PATH` and
    /// `MCP_HTTP_CORS`. Unset or unparsable values keep their default;
    /// CORS is only turned off by `false`, `0` or `off`.
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            port: env::var("MCP_HTTP_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            rpc_path: env::var("MCP_HTTP_PATH").unwrap_or(defaults.rpc_path),
            enable_cors: env::var("MCP_HTTP_CORS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "off"))
                .unwrap_or(defaults.enable_cors),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("enable the stdio or the http feature");
        }
    }
}

impl TransportConfig {
    pub fn from_env() -> Self {
        match env::var("MCP_TRANSPORT").unwrap_or_default().to_lowercase().as_str() {
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            _ => Self::default(),
        }
    }

    /// One-line summary for the start-up log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}
