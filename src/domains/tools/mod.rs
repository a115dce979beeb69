//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are the operations of the Apillon platform (storage, hosting, NFT)
//! exposed to MCP clients.
//!
//! ## Architecture
//!
//! - `contract.rs` - Input contracts: schemas derived from parameter structs, and validation
//! - `dispatch.rs` - Generic operation tables, one per domain
//! - `definitions/` - The storage, hosting and NFT domain tables
//! - `registry.rs` - Merged tool list, routing and the error boundary
//! - `envelope.rs` - Response envelope helpers
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Add an `ApillonApi` method for the platform call
//! 2. Add a parameter struct deriving `JsonSchema` and an `Operation` row to
//!    the domain table in `definitions/`
//!
//! **No need to modify `registry.rs` or `server.rs`!**

pub mod contract;
pub mod definitions;
pub mod dispatch;
pub mod envelope;
mod error;
mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use contract::{InputContract, ValidatedArgs, ValidationErrors};
pub use dispatch::{Domain, Operation, ToolContext, ToolDescriptor};
pub use error::ToolError;
pub use registry::ToolRegistry;
