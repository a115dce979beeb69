//! STDIO transport.
//!
//! Stdout carries protocol frames only; logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// Serve `server` on stdin/stdout until the client disconnects.
pub async fn serve(server: McpServer) -> TransportResult<()> {
    let tools = server.registry().tool_names().len();

    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| TransportError::init(e.to_string()))?;
    info!(tools, "Serving tools on stdin/stdout");

    let reason = running
        .waiting()
        .await
        .map_err(|e| TransportError::ServiceError(e.to_string()))?;
    info!(?reason, "STDIO session closed");
    Ok(())
}
