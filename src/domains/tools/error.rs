//! Tool-specific error types.

use thiserror::Error;

use super::contract::ValidationErrors;
use crate::apillon::ApillonError;

/// Why a tool call failed.
///
/// The registry turns every variant into an error envelope whose text is
/// `"Error: "` followed by this type's `Display` output.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The arguments did not satisfy the tool's input contract.
    #[error("Invalid arguments for {tool}: {errors}")]
    Validation {
        tool: String,
        errors: ValidationErrors,
    },

    /// No domain declares the requested tool.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The platform call or a local read failed.
    /// `action` names the operation, e.g. "Failed to upload file".
    #[error("{action}: {source}")]
    Collaborator {
        action: &'static str,
        #[source]
        source: ApillonError,
    },

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new validation error.
    pub fn validation(tool: impl Into<String>, errors: ValidationErrors) -> Self {
        Self::Validation {
            tool: tool.into(),
            errors,
        }
    }

    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Wrap a platform failure with the operation that raised it.
    pub fn collaborator(action: &'static str, source: ApillonError) -> Self {
        Self::Collaborator { action, source }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
