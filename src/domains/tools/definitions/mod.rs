//! Tool definitions module.
//!
//! One file per capability domain. Each exports a `domain()` table listing
//! its operations in declaration order. Parameter structs derive
//! `JsonSchema`; their doc comments become the field descriptions.

pub mod hosting;
pub mod nft;
pub mod storage;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::apillon::PageQuery;

pub(crate) fn default_limit() -> u64 {
    10
}

pub(crate) fn default_page() -> u64 {
    0
}

/// Arguments of list operations that only page through results.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct PageParams {
    /// Maximum number of items to return (default: 10)
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Page number (default: 0)
    #[serde(default = "default_page")]
    pub page: u64,
}

impl From<PageParams> for PageQuery {
    fn from(params: PageParams) -> Self {
        PageQuery {
            limit: params.limit,
            page: params.page,
        }
    }
}
