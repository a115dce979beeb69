//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The merged list of every domain's tools, in registration order
//! - Routing of a named call to the domain that declares it
//! - The single failure boundary turning any error into an error envelope

use std::collections::HashSet;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::definitions::{hosting, nft, storage};
use super::dispatch::{Domain, ToolContext};
use super::envelope::{error_result, json_result};
use super::error::ToolError;
use crate::core::error::{Error, Result};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Domains are checked in registration order; tool names are unique across
/// domains, so at most one domain ever matches a name.
pub struct ToolRegistry {
    domains: Vec<Domain>,
    context: ToolContext,
}

impl ToolRegistry {
    /// Create the registry with the storage, hosting and NFT domains.
    ///
    /// Fails when a tool's input schema does not compile.
    pub fn new(context: ToolContext) -> Result<Self> {
        Self::with_domains(
            context,
            vec![storage::domain()?, hosting::domain()?, nft::domain()?],
        )
    }

    /// Create a registry over `domains`, refusing duplicate tool names.
    pub fn with_domains(context: ToolContext, domains: Vec<Domain>) -> Result<Self> {
        let mut seen = HashSet::new();
        for domain in &domains {
            for name in domain.tool_names() {
                if !seen.insert(name) {
                    return Err(Error::config(format!(
                        "tool '{}' of domain '{}' is already registered",
                        name,
                        domain.name()
                    )));
                }
            }
        }

        debug!(tools = seen.len(), domains = domains.len(), "Tool registry built");
        Ok(Self { domains, context })
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.domains.iter().flat_map(Domain::tool_names).collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both the stdio and HTTP transports list tools through it.
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.domains
            .iter()
            .flat_map(Domain::operations)
            .map(|op| op.descriptor().to_tool())
            .collect()
    }

    /// The first domain declaring `name`.
    pub fn find_domain(&self, name: &str) -> Option<&Domain> {
        self.domains.iter().find(|domain| domain.find(name).is_some())
    }

    /// Route a call to its owning domain and run it.
    pub async fn dispatch(&self, name: &str, arguments: &JsonObject) -> std::result::Result<Value, ToolError> {
        let domain = self
            .find_domain(name)
            .ok_or_else(|| ToolError::unknown_tool(name))?;
        let operation = domain
            .find(name)
            .ok_or_else(|| ToolError::internal(format!("domain '{}' lost tool '{}'", domain.name(), name)))?;

        debug!(domain = domain.name(), "Dispatching tool call");
        operation.execute(&self.context, arguments).await
    }

    /// Call a tool and wrap the outcome in a response envelope.
    ///
    /// Never fails: validation, routing and platform errors all come back as
    /// an envelope flagged as error whose text starts with `"Error: "`.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = arguments.unwrap_or_default();
        match self.dispatch(name, &arguments).await {
            Ok(value) => json_result(&value),
            Err(e) => {
                if matches!(e, ToolError::UnknownTool(_)) {
                    warn!("Unknown tool requested: {}", name);
                }
                error_result(&format!("Error: {}", e))
            }
        }
    }
}
