//! Apillon MCP Server Library
//!
//! This crate exposes the Apillon cloud platform (storage buckets, static
//! website hosting, NFT collections) as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **apillon**: HTTP client for the Apillon REST API and local file loading
//! - **core**: Configuration, error handling, the MCP server and its transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Input contracts, per-domain operation tables and the tool registry
//!
//! # Example
//!
//! ```rust,no_run
//! use apillon_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod apillon;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
