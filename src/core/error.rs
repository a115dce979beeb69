//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type for start-up and infrastructure
//! failures. Per-call failures never surface here: the tool registry turns
//! them into error envelopes (see `domains::tools::ToolError`).

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// A tool table that could not be built (e.g. a schema that does not compile).
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Failure while building the Apillon platform client.
    #[error("Platform error: {0}")]
    Platform(#[from] crate::apillon::ApillonError),

    /// Configuration-related errors, including an inconsistent tool registry.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
