//! Hosting tools: static websites and their deployments.

use schemars::JsonSchema;
use serde::Deserialize;

use super::{PageParams, default_limit, default_page};
use crate::apillon::files;
use crate::apillon::types::CreateWebsite;
use crate::apillon::{DeployEnvironment, PageQuery};
use crate::domains::tools::ToolError;
use crate::domains::tools::dispatch::{Domain, Operation, ToolContext};

pub const DOMAIN: &str = "hosting";

pub const LIST_WEBSITES: &str = "list_websites";
pub const GET_WEBSITE: &str = "get_website";
pub const CREATE_WEBSITE: &str = "create_website";
pub const UPLOAD_WEBSITE_FILES: &str = "upload_website_files";
pub const DEPLOY_WEBSITE: &str = "deploy_website";
pub const LIST_DEPLOYMENTS: &str = "list_deployments";

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetWebsiteParams {
    /// UUID of the website
    pub uuid: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebsiteParams {
    /// Name of the website
    pub name: String,
    /// UUID of the bucket serving the website
    pub bucket_uuid: String,
    /// Description of the website
    pub description: Option<String>,
    /// Custom domain for the website
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadWebsiteFilesParams {
    /// UUID of the website
    pub website_uuid: String,
    /// Path of the local folder to upload
    pub folder_path: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployWebsiteParams {
    /// UUID of the website
    pub website_uuid: String,
    /// Target environment
    pub environment: DeployEnvironment,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDeploymentsParams {
    /// UUID of the website
    pub website_uuid: String,
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
                LIST_WEBSITES,
                "List the websites hosted on Apillon, paginated.",
                "Failed to list websites",
                |ctx: ToolContext, params: PageParams| async move {
                    ctx.platform.list_websites(PageQuery::from(params)).await
                },
            )?,
            Operation::new(
                GET_WEBSITE,
                "Get a website by UUID, including its staging and production URLs.",
                "Failed to get website",
                |ctx: ToolContext, params: GetWebsiteParams| async move {
                    ctx.platform.get_website(&params.uuid).await
                },
            )?,
            Operation::new(
                CREATE_WEBSITE,
                "Create a new website backed by a storage bucket.",
                "Failed to create website",
                |ctx: ToolContext, params: CreateWebsiteParams| async move {
                    let request = CreateWebsite {
                        name: params.name,
                        bucket_uuid: params.bucket_uuid,
                        description: params.description,
                        domain: params.domain,
                    };
                    ctx.platform.create_website(&request).await
                },
            )?,
            Operation::new(
                UPLOAD_WEBSITE_FILES,
                "Upload every file of a local folder to a website, keeping the folder structure. Deploy afterwards to publish.",
                "Failed to upload website files",
                |ctx: ToolContext, params: UploadWebsiteFilesParams| async move {
                    let uploads = files::load_folder(&params.folder_path, &ctx.security).await?;
                    ctx.platform
                        .upload_website_files(&params.website_uuid, uploads)
                        .await
                },
            )?,
            Operation::new(
                DEPLOY_WEBSITE,
                "Deploy the uploaded files of a website to the staging or production environment.",
                "Failed to deploy website",
                |ctx: ToolContext, params: DeployWebsiteParams| async move {
                    ctx.platform
                        .deploy_website(&params.website_uuid, params.environment)
                        .await
                },
            )?,
            Operation::new(
                LIST_DEPLOYMENTS,
                "List the deployments of a website, paginated.",
                "Failed to list deployments",
                |ctx: ToolContext, params: ListDeploymentsParams| async move {
                    let page = PageQuery {
                        limit: params.limit,
                        page: params.page,
                    };
                    ctx.platform.list_deployments(&params.website_uuid, page).await
                },
            )?,
        ],
    ))
}
