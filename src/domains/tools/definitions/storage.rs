//! Storage tools: buckets and the files inside them.

use schemars::JsonSchema;
use serde::Deserialize;

use super::{PageParams, default_limit, default_page};
use crate::apillon::PageQuery;
use crate::apillon::files;
use crate::apillon::types::{CreateBucket, ObjectQuery};
use crate::domains::tools::ToolError;
use crate::domains::tools::dispatch::{Domain, Operation, ToolContext};

pub const DOMAIN: &str = "storage";

pub const CREATE_BUCKET: &str = "create_bucket";
pub const LIST_BUCKETS: &str = "list_buckets";
pub const LIST_OBJECTS: &str = "list_objects";
pub const UPLOAD_FILE: &str = "upload_file";

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateBucketParams {
    /// Name of the bucket
    pub name: String,
    /// Description of the bucket
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsParams {
    /// UUID of the bucket
    pub bucket_uuid: String,
    /// UUID of a directory inside the bucket (omit for the root)
    pub directory_uuid: Option<String>,
    /// Maximum number of items to return (default: 10)
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Page number (default: 0)
    #[serde(default = "default_page")]
    pub page: u64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileParams {
    /// UUID of the target bucket
    pub bucket_uuid: String,
    /// Name the file gets in the bucket
    pub file_name: String,
    /// Path of the local file to upload
    pub file_path: String,
    /// Directory inside the bucket (omit to upload to the root)
    pub directory_path: Option<String>,
}

// ============================================================================
// Domain Table
// ============================================================================

pub fn domain() -> Result<Domain, ToolError> {
    Ok(Domain::new(
        DOMAIN,
        vec![
            Operation::new(
                CREATE_BUCKET,
                "Create a new storage bucket on Apillon. Returns the bucket record including its bucketUuid.",
                "Failed to create bucket",
                |ctx: ToolContext, params: CreateBucketParams| async move {
                    let request = CreateBucket {
                        name: params.name,
                        description: params.description,
                    };
                    ctx.platform.create_bucket(&request).await
                },
            )?,
            Operation::new(
                LIST_BUCKETS,
                "List the storage buckets of the Apillon project, paginated.",
                "Failed to list buckets",
                |ctx: ToolContext, params: PageParams| async move {
                    ctx.platform.list_buckets(PageQuery::from(params)).await
                },
            )?,
            Operation::new(
                LIST_OBJECTS,
                "List files and directories in a storage bucket. Pass directoryUuid to list a sub-directory instead of the bucket root.",
                "Failed to list objects",
                |ctx: ToolContext, params: ListObjectsParams| async move {
                    let query = ObjectQuery {
                        directory_uuid: params.directory_uuid,
                        limit: params.limit,
                        page: params.page,
                    };
                    ctx.platform.list_objects(&params.bucket_uuid, &query).await
                },
            )?,
            Operation::new(
                UPLOAD_FILE,
                "Upload a local file into a storage bucket. The whole file is read into memory first, so very large files may fail.",
                "Failed to upload file",
                |ctx: ToolContext, params: UploadFileParams| async move {
                    let file = files::load_file(
                        &params.file_path,
                        &params.file_name,
                        params.directory_path.as_deref(),
                        &ctx.security,
                    )
                    .await?;
                    ctx.platform.upload_file(&params.bucket_uuid, file).await
                },
            )?,
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::contract::ViolationKind;
    use crate::domains::tools::testing::{RecordingPlatform, args, context};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_declares_four_tools_in_order() {
        let names: Vec<_> = domain().unwrap().tool_names().collect();
        assert_eq!(names, vec![CREATE_BUCKET, LIST_BUCKETS, LIST_OBJECTS, UPLOAD_FILE]);
    }

    #[test]
    fn test_create_bucket_validation() {
        let domain = domain().unwrap();
        let op = domain.find(CREATE_BUCKET).unwrap();

        let validated = op.validate(&args(json!({ "name": "docs" }))).unwrap();
        assert_eq!(validated.as_map(), &args(json!({ "name": "docs" })));

        match op.validate(&args(json!({}))) {
            Err(ToolError::Validation { tool, errors }) => {
                assert_eq!(tool, CREATE_BUCKET);
                assert_eq!(errors.for_field("name").unwrap().kind, ViolationKind::Missing);
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let err = op.validate(&args(json!({ "name": 42 }))).unwrap_err();
        assert!(err.to_string().contains("'name' must be a string, got integer"));
    }

    #[test]
    fn test_list_buckets_defaults() {
        let domain = domain().unwrap();
        let validated = domain
            .find(LIST_BUCKETS)
            .unwrap()
            .validate(&args(json!({})))
            .unwrap();
        assert_eq!(validated.as_map(), &args(json!({ "limit": 10, "page": 0 })));
    }

    #[tokio::test]
    async fn test_create_bucket_forwards_without_description() {
        let platform = RecordingPlatform::new();
        let ctx = context(platform.clone());
        let domain = domain().unwrap();

        let result = domain
            .find(CREATE_BUCKET)
            .unwrap()
            .execute(&ctx, &args(json!({ "name": "docs" })))
            .await
            .unwrap();

        let call = platform.last_call();
        assert_eq!(call.method, "create_bucket");
        assert_eq!(call.payload, json!({ "name": "docs" }));
        assert_eq!(result["payload"]["name"], "docs");
    }

    #[tokio::test]
    async fn test_list_objects_omits_absent_directory() {
        let platform = RecordingPlatform::new();
        let ctx = context(platform.clone());
        let domain = domain().unwrap();
        let op = domain.find(LIST_OBJECTS).unwrap();

        op.execute(&ctx, &args(json!({ "bucketUuid": "b-1" }))).await.unwrap();
        let call = platform.last_call();
        assert_eq!(call.target.as_deref(), Some("b-1"));
        assert_eq!(call.payload, json!({ "limit": 10, "page": 0 }));

        op.execute(
            &ctx,
            &args(json!({ "bucketUuid": "b-1", "directoryUuid": "d-7", "page": 2 })),
        )
        .await
        .unwrap();
        assert_eq!(
            platform.last_call().payload,
            json!({ "directoryUuid": "d-7", "limit": 10, "page": 2 })
        );
    }

    #[tokio::test]
    async fn test_upload_file_reads_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("report.csv");
        fs::write(&file, "a,b,c").unwrap();

        let platform = RecordingPlatform::new();
        let ctx = context(platform.clone());
        let domain = domain().unwrap();

        domain
            .find(UPLOAD_FILE)
            .unwrap()
            .execute(
                &ctx,
                &args(json!({
                    "bucketUuid": "b-1",
                    "fileName": "report.csv",
                    "filePath": file.to_string_lossy(),
                })),
            )
            .await
            .unwrap();

        let call = platform.last_call();
        assert_eq!(call.target.as_deref(), Some("b-1"));
        assert_eq!(
            call.payload,
            json!({ "fileName": "report.csv", "path": null, "size": 5 })
        );
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_collaborator_failure() {
        let platform = RecordingPlatform::new();
        let ctx = context(platform.clone());
        let domain = domain().unwrap();

        let err = domain
            .find(UPLOAD_FILE)
            .unwrap()
            .execute(
                &ctx,
                &args(json!({
                    "bucketUuid": "b-1",
                    "fileName": "x.txt",
                    "filePath": "/nonexistent/path/12345.txt",
                })),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Collaborator { .. }));
        assert!(err.to_string().starts_with("Failed to upload file: "));
        assert!(platform.calls().is_empty());
    }
}
