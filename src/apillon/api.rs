//! The platform seam used by the tool handlers.

use async_trait::async_trait;
use serde_json::Value;

use super::error::ApillonResult;
use super::types::{
    BurnNft, CreateBucket, CreateCollection, CreateWebsite, DeployEnvironment, FileUpload, MintNft,
    ObjectQuery, PageQuery, TransferOwnership,
};

/// Operations the server performs against Apillon.
///
/// `ApillonClient` is the production implementation. Results are the
/// platform's JSON payloads, passed back to callers untouched.
#[async_trait]
pub trait ApillonApi: Send + Sync {
    // Storage
    async fn create_bucket(&self, request: &CreateBucket) -> ApillonResult<Value>;
    async fn list_buckets(&self, page: PageQuery) -> ApillonResult<Value>;
    async fn list_objects(&self, bucket_uuid: &str, query: &ObjectQuery) -> ApillonResult<Value>;
    async fn upload_file(&self, bucket_uuid: &str, file: FileUpload) -> ApillonResult<Value>;

    // Hosting
    async fn list_websites(&self, page: PageQuery) -> ApillonResult<Value>;
    async fn get_website(&self, website_uuid: &str) -> ApillonResult<Value>;
    async fn create_website(&self, request: &CreateWebsite) -> ApillonResult<Value>;
    async fn upload_website_files(
        &self,
        website_uuid: &str,
        files: Vec<FileUpload>,
    ) -> ApillonResult<Value>;
    async fn deploy_website(
        &self,
        website_uuid: &str,
        environment: DeployEnvironment,
    ) -> ApillonResult<Value>;
    async fn list_deployments(&self, website_uuid: &str, page: PageQuery) -> ApillonResult<Value>;

    // NFTs
    async fn list_collections(&self, page: PageQuery) -> ApillonResult<Value>;
    async fn get_collection(&self, collection_uuid: &str) -> ApillonResult<Value>;
    async fn create_collection(&self, request: &CreateCollection) -> ApillonResult<Value>;
    async fn mint_nft(&self, collection_uuid: &str, request: &MintNft) -> ApillonResult<Value>;
    async fn burn_nft(&self, collection_uuid: &str, request: &BurnNft) -> ApillonResult<Value>;
    async fn transfer_ownership(
        &self,
        collection_uuid: &str,
        request: &TransferOwnership,
    ) -> ApillonResult<Value>;
    async fn list_transactions(&self, collection_uuid: &str, page: PageQuery)
    -> ApillonResult<Value>;
}
