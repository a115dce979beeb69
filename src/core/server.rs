//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating every tool request to the [`ToolRegistry`].
//!
//! Tools are declared per domain in `domains/tools/definitions/`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::apillon::{ApillonApi, ApillonClient};
use crate::domains::tools::envelope::envelope_json;
use crate::domains::tools::{ToolContext, ToolRegistry};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It only
/// advertises the tools capability.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry listing and dispatching every tool.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server talking to the Apillon API configured in `config`.
    pub fn new(config: Config) -> Result<Self> {
        let client = ApillonClient::from_config(&config)?;
        Self::with_platform(config, Arc::new(client))
    }

    /// Create a new MCP server over an arbitrary platform implementation.
    pub fn with_platform(config: Config, platform: Arc<dyn ApillonApi>) -> Result<Self> {
        let context = ToolContext::new(platform, config.security.clone());
        let registry = ToolRegistry::new(context)?;

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<serde_json::Value> {
        self.registry
            .get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Returns the response envelope as JSON; failures are already folded
    /// into it with `isError` set.
    pub async fn call_tool_json(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> serde_json::Value {
        let result = self.registry.call_tool(name, arguments).await;
        envelope_json(&result)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Apillon MCP server. Provides tools to manage storage buckets, host static websites and create and mint NFT collections on the Apillon platform."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool");
        Ok(self.registry.call_tool(&request.name, request.arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::RecordingPlatform;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::with_platform(Config::default(), RecordingPlatform::new()).unwrap()
    }

    #[test]
    fn test_server_info_advertises_tools_only() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.server_info.name, "apillon-mcp-server");
    }

    #[test]
    fn test_new_builds_real_client() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.registry().tool_names().len(), 17);
    }

    #[test]
    fn test_list_tools_json() {
        let tools = server().list_tools_json();
        assert_eq!(tools.len(), 17);
        assert_eq!(tools[0]["name"], "create_bucket");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["name"]));
    }

    #[tokio::test]
    async fn test_call_tool_json() {
        let server = server();

        let ok = server
            .call_tool_json("get_website", json!({ "uuid": "w-1" }).as_object().cloned())
            .await;
        assert_eq!(ok["isError"], false);

        let err = server.call_tool_json("nope", None).await;
        assert_eq!(err["isError"], true);
        assert_eq!(err["content"][0]["text"], "Error: Unknown tool: nope");
    }
}
