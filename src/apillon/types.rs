//! Request payloads and enumerations understood by the Apillon API.
//!
//! Enumerated tool arguments are mapped to the platform's numeric codes here,
//! through exhaustive matches, so an unknown value can never reach the wire.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerations
// ============================================================================

/// EVM chains an NFT collection can be deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EvmChain {
    Moonbeam,
    Moonbase,
    Astar,
}

impl EvmChain {
    /// Names accepted by the `chain` tool argument.
    pub const NAMES: &'static [&'static str] = &["MOONBEAM", "MOONBASE", "ASTAR"];

    /// Chain id sent to the platform.
    pub fn chain_id(self) -> u32 {
        match self {
            Self::Moonbeam => 1284,
            Self::Moonbase => 1287,
            Self::Astar => 592,
        }
    }
}

/// Target of a website deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeployEnvironment {
    Staging,
    Production,
}

impl DeployEnvironment {
    /// Names accepted by the `environment` tool argument.
    pub const NAMES: &'static [&'static str] = &["staging", "production"];

    /// Deployment code sent to the platform
    /// (1 = to staging, 3 = directly to production).
    pub fn code(self) -> u8 {
        match self {
            Self::Staging => 1,
            Self::Production => 3,
        }
    }
}

/// Collection type code for generic NFT collections.
pub const GENERIC_COLLECTION_TYPE: u8 = 1;

// ============================================================================
// Query strings
// ============================================================================

/// Pagination shared by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub limit: u64,
    pub page: u64,
}

/// Query for the content of a bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_uuid: Option<String>,
    pub limit: u64,
    pub page: u64,
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBucket {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsite {
    pub name: String,
    pub bucket_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeployWebsite {
    pub environment: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollection {
    pub chain: u32,
    pub collection_type: u8,
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_uri: String,
    pub base_extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_supply: Option<u64>,
    pub is_revokable: bool,
    pub is_soulbound: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_auto_increment: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub royalties_address: Option<String>,
    pub royalties_fees: f64,
    pub drop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_start: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_reserve: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintNft {
    pub quantity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiving_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids_to_mint: Option<Vec<u64>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnNft {
    pub token_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferOwnership {
    pub address: String,
}

// ============================================================================
// Uploads
// ============================================================================

/// A local file loaded into memory, ready to be uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Name of the file on the platform.
    pub file_name: String,

    /// Directory on the platform the file lands in; `None` keeps it at the root.
    pub path: Option<String>,

    pub content: Vec<u8>,
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("file_name", &self.file_name)
            .field("path", &self.path)
            .field("bytes", &self.content.len())
            .finish()
    }
}

/// File entry announced when opening an upload session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadFileEntry<'a> {
    pub file_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a str>,
}

/// Upload session opened by the platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadSession {
    pub session_uuid: String,
    pub files: Vec<SignedUpload>,
}

/// Pre-signed destination for one announced file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignedUpload {
    pub file_name: String,
    pub url: String,
    #[serde(default)]
    pub file_uuid: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// Result reported back for a completed upload session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub session_uuid: String,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_uuid: Option<String>,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_names_cover_every_variant() {
        let parsed: Vec<EvmChain> = EvmChain::NAMES
            .iter()
            .map(|name| serde_json::from_value(serde_json::json!(name)).unwrap())
            .collect();
        assert_eq!(
            parsed,
            vec![EvmChain::Moonbeam, EvmChain::Moonbase, EvmChain::Astar]
        );
        assert_eq!(EvmChain::Moonbeam.chain_id(), 1284);
        assert_eq!(EvmChain::Moonbase.chain_id(), 1287);
        assert_eq!(EvmChain::Astar.chain_id(), 592);
        assert!(serde_json::from_value::<EvmChain>(serde_json::json!("moonbeam")).is_err());
    }

    #[test]
    fn test_environment_names_cover_every_variant() {
        let parsed: Vec<DeployEnvironment> = DeployEnvironment::NAMES
            .iter()
            .map(|name| serde_json::from_value(serde_json::json!(name)).unwrap())
            .collect();
        assert_eq!(
            parsed,
            vec![DeployEnvironment::Staging, DeployEnvironment::Production]
        );
        assert_eq!(DeployEnvironment::Staging.code(), 1);
        assert_eq!(DeployEnvironment::Production.code(), 3);
        assert!(
            serde_json::from_value::<DeployEnvironment>(serde_json::json!("canary")).is_err()
        );
    }

    #[test]
    fn test_absent_optionals_are_omitted_from_body() {
        let body = serde_json::to_value(CreateBucket {
            name: "docs".to_string(),
            description: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "name": "docs" }));

        let query = serde_json::to_value(ObjectQuery {
            directory_uuid: None,
            limit: 10,
            page: 0,
        })
        .unwrap();
        assert!(query.get("directoryUuid").is_none());
    }

    #[test]
    fn test_file_upload_debug_hides_content() {
        let upload = FileUpload {
            file_name: "a.txt".to_string(),
            path: None,
            content: b"secret bytes".to_vec(),
        };
        let debug = format!("{:?}", upload);
        assert!(debug.contains("bytes: 12"));
        assert!(!debug.contains("secret"));
    }
}
