//! NFT tools: collections on EVM chains and the tokens inside them.

use schemars::JsonSchema;
use serde::Deserialize;

use super::{PageParams, default_limit, default_page};
use crate::apillon::types::{
    BurnNft, CreateCollection, GENERIC_COLLECTION_TYPE, MintNft, TransferOwnership,
};
use crate::apillon::{EvmChain, PageQuery};
use crate::domains::tools::ToolError;
use crate::domains::tools::dispatch::{Domain, Operation, ToolContext};

pub const DOMAIN: &str = "nft";

pub const LIST_COLLECTIONS: &str = "list_collections";
pub const GET_COLLECTION: &str = "get_collection";
pub const CREATE_COLLECTION: &str = "create_collection";
pub const MINT_NFT: &str = "mint_nft";
pub const BURN_NFT: &str = "burn_nft";
pub const TRANSFER_OWNERSHIP: &str = "transfer_ownership";
pub const LIST_TRANSACTIONS: &str = "list_transactions";

fn default_base_extension() -> String {
    ".json".to_string()
}

fn default_quantity() -> u64 {
    1
}

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCollectionParams {
    /// UUID of the collection
    pub uuid: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionParams {
    /// Name of the collection
    pub name: String,
    /// Token symbol of the collection
    pub symbol: String,
    /// Description of the collection
    pub description: Option<String>,
    /// Whether the owner can burn tokens
    pub is_revokable: bool,
    /// Whether tokens are non-transferable
    pub is_soulbound: bool,
    /// Whether token ids are assigned automatically
    pub is_auto_increment: Option<bool>,
    /// EVM chain to deploy the collection to
    pub chain: EvmChain,
    /// Base URI of the token metadata
    pub base_uri: String,
    /// Extension appended to metadata URIs (default: .json)
    #[serde(default = "default_base_extension")]
    pub base_extension: String,
    /// Maximum number of tokens (omit for unlimited)
    pub max_supply: Option<u64>,
    /// Address receiving royalties
    pub royalties_address: Option<String>,
    /// Royalties in percent
    pub royalties_fees: f64,
    /// Whether tokens can be bought by the public
    pub drop: bool,
    /// Unix timestamp the drop starts at
    pub drop_start: Option<u64>,
    /// Price of one token in the drop
    pub drop_price: Option<f64>,
    /// Tokens reserved for the owner
    pub drop_reserve: Option<u64>,
}

impl From<CreateCollectionParams> for CreateCollection {
    fn from(params: CreateCollectionParams) -> Self {
        CreateCollection {
            chain: params.chain.chain_id(),
            collection_type: GENERIC_COLLECTION_TYPE,
            name: params.name,
            symbol: params.symbol,
            description: params.description,
            base_uri: params.base_uri,
            base_extension: params.base_extension,
            max_supply: params.max_supply,
            is_revokable: params.is_revokable,
            is_soulbound: params.is_soulbound,
            is_auto_increment: params.is_auto_increment,
            royalties_address: params.royalties_address,
            royalties_fees: params.royalties_fees,
            drop: params.drop,
            drop_start: params.drop_start,
            drop_price: params.drop_price,
            drop_reserve: params.drop_reserve,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MintNftParams {
    /// UUID of the collection
    pub collection_uuid: String,
    /// Number of tokens to mint (default: 1)
    #[serde(default = "default_quantity")]
    pub quantity: u64,
    /// Specific token id to mint
    pub token_id: Option<u64>,
    /// Address receiving the minted tokens
    pub receiving_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BurnNftParams {
    /// UUID of the collection
    pub collection_uuid: String,
    /// Id of the token to burn
    pub token_id: u64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferOwnershipParams {
    /// UUID of the collection
    pub collection_uuid: String,
    /// Address of the new owner
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsParams {
    /// UUID of the collection
    pub collection_uuid: String,
    /// Maximum number of items to return (default: 10)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Page number (default: 0)
    #[serde(default = "default_page")]
    pub page: u64,
}

// ============================================================================
// Domain Table
// ============================================================================

pub fn domain() -> Result<Domain, ToolError> {
    Ok(Domain::new(
        DOMAIN,
        vec![
            Operation::new(
                LIST_COLLECTIONS,
                "List the NFT collections of the Apillon project, paginated.",
                "Failed to list collections",
                |ctx: ToolContext, params: PageParams| async move {
                    ctx.platform.list_collections(PageQuery::from(params)).await
                },
            )?,
            Operation::new(
                GET_COLLECTION,
                "Get an NFT collection by UUID, including its contract address and status.",
                "Failed to get collection",
                |ctx: ToolContext, params: GetCollectionParams| async move {
                    ctx.platform.get_collection(&params.uuid).await
                },
            )?,
            Operation::new(
                CREATE_COLLECTION,
                "Create and deploy a new NFT collection on an EVM chain.",
                "Failed to create collection",
                |ctx: ToolContext, params: CreateCollectionParams| async move {
                    let request = CreateCollection::from(params);
                    ctx.platform.create_collection(&request).await
                },
            )?,
            Operation::new(
                MINT_NFT,
                "Mint tokens in an NFT collection. Pass tokenId to mint a specific id.",
                "Failed to mint NFT",
                |ctx: ToolContext, params: MintNftParams| async move {
                    let request = MintNft {
                        quantity: params.quantity,
                        receiving_address: params.receiving_address,
                        ids_to_mint: params.token_id.map(|id| vec![id]),
                    };
                    ctx.platform.mint_nft(&params.collection_uuid, &request).await
                },
            )?,
            Operation::new(
                BURN_NFT,
                "Burn a token of a revokable NFT collection.",
                "Failed to burn NFT",
                |ctx: ToolContext, params: BurnNftParams| async move {
                    let request = BurnNft {
                        token_id: params.token_id,
                    };
                    ctx.platform.burn_nft(&params.collection_uuid, &request).await
                },
            )?,
            Operation::new(
                TRANSFER_OWNERSHIP,
                "Transfer ownership of an NFT collection contract to another address.",
                "Failed to transfer ownership",
                |ctx: ToolContext, params: TransferOwnershipParams| async move {
                    let request = TransferOwnership {
                        address: params.address,
                    };
                    ctx.platform
                        .transfer_ownership(&params.collection_uuid, &request)
                        .await
                },
            )?,
            Operation::new(
                LIST_TRANSACTIONS,
                "List the on-chain transactions of an NFT collection, paginated.",
                "Failed to list transactions",
                |ctx: ToolContext, params: ListTransactionsParams| async move {
                    let page = PageQuery {
                        limit: params.limit,
                        page: params.page,
                    };
                    ctx.platform
                        .list_transactions(&params.collection_uuid, page)
                        .await
                },
            )?,
        ],
    ))
}
