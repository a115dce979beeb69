//! Test doubles for the platform seam.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::dispatch::ToolContext;
use crate::apillon::types::{
    BurnNft, CreateBucket, CreateCollection, CreateWebsite, MintNft, ObjectQuery,
    TransferOwnership,
};
use crate::apillon::{
    ApillonApi, ApillonError, ApillonResult, DeployEnvironment, FileUpload, PageQuery,
};
use crate::core::config::SecurityConfig;

/// One call seen by [`RecordingPlatform`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub target: Option<String>,
    pub payload: Value,
}

/// Platform stand-in that records every call and answers with a canned
/// record, or with a remote rejection when built with [`Self::failing`].
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<RecordedCall>>,
    failure: Option<(u16, String)>,
}

impl RecordingPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: Some((status, message.to_string())),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no platform call recorded")
    }

    fn record(&self, method: &'static str, target: Option<&str>, payload: Value) -> ApillonResult<Value> {
        let call = RecordedCall {
            method,
            target: target.map(str::to_string),
            payload,
        };
        self.calls.lock().unwrap().push(call.clone());

        match &self.failure {
            Some((status, message)) => Err(ApillonError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(json!({
                "method": call.method,
                "target": call.target,
                "payload": call.payload,
            })),
        }
    }
}

fn upload_json(file: &FileUpload) -> Value {
    json!({
        "fileName": file.file_name,
        "path": file.path,
        "size": file.content.len(),
    })
}

#[async_trait]
impl ApillonApi for RecordingPlatform {
    async fn create_bucket(&self, request: &CreateBucket) -> ApillonResult<Value> {
        self.record("create_bucket", None, serde_json::to_value(request).unwrap())
    }

    async fn list_buckets(&self, page: PageQuery) -> ApillonResult<Value> {
        self.record("list_buckets", None, serde_json::to_value(page).unwrap())
    }

    async fn list_objects(&self, bucket_uuid: &str, query: &ObjectQuery) -> ApillonResult<Value> {
        self.record("list_objects", Some(bucket_uuid), serde_json::to_value(query).unwrap())
    }

    async fn upload_file(&self, bucket_uuid: &str, file: FileUpload) -> ApillonResult<Value> {
        self.record("upload_file", Some(bucket_uuid), upload_json(&file))
    }

    async fn list_websites(&self, page: PageQuery) -> ApillonResult<Value> {
        self.record("list_websites", None, serde_json::to_value(page).unwrap())
    }

    async fn get_website(&self, website_uuid: &str) -> ApillonResult<Value> {
        self.record("get_website", Some(website_uuid), Value::Null)
    }

    async fn create_website(&self, request: &CreateWebsite) -> ApillonResult<Value> {
        self.record("create_website", None, serde_json::to_value(request).unwrap())
    }

    async fn upload_website_files(
        &self,
        website_uuid: &str,
        files: Vec<FileUpload>,
    ) -> ApillonResult<Value> {
        let payload = Value::Array(files.iter().map(upload_json).collect());
        self.record("upload_website_files", Some(website_uuid), payload)
    }

    async fn deploy_website(
        &self,
        website_uuid: &str,
        environment: DeployEnvironment,
    ) -> ApillonResult<Value> {
        self.record(
            "deploy_website",
            Some(website_uuid),
            json!({ "environment": environment.code() }),
        )
    }

    async fn list_deployments(&self, website_uuid: &str, page: PageQuery) -> ApillonResult<Value> {
        self.record("list_deployments", Some(website_uuid), serde_json::to_value(page).unwrap())
    }

    async fn list_collections(&self, page: PageQuery) -> ApillonResult<Value> {
        self.record("list_collections", None, serde_json::to_value(page).unwrap())
    }

    async fn get_collection(&self, collection_uuid: &str) -> ApillonResult<Value> {
        self.record("get_collection", Some(collection_uuid), Value::Null)
    }

    async fn create_collection(&self, request: &CreateCollection) -> ApillonResult<Value> {
        self.record("create_collection", None, serde_json::to_value(request).unwrap())
    }

    async fn mint_nft(&self, collection_uuid: &str, request: &MintNft) -> ApillonResult<Value> {
        self.record("mint_nft", Some(collection_uuid), serde_json::to_value(request).unwrap())
    }

    async fn burn_nft(&self, collection_uuid: &str, request: &BurnNft) -> ApillonResult<Value> {
        self.record("burn_nft", Some(collection_uuid), serde_json::to_value(request).unwrap())
    }

    async fn transfer_ownership(
        &self,
        collection_uuid: &str,
        request: &TransferOwnership,
    ) -> ApillonResult<Value> {
        self.record(
            "transfer_ownership",
            Some(collection_uuid),
            serde_json::to_value(request).unwrap(),
        )
    }

    async fn list_transactions(
        &self,
        collection_uuid: &str,
        page: PageQuery,
    ) -> ApillonResult<Value> {
        self.record("list_transactions", Some(collection_uuid), serde_json::to_value(page).unwrap())
    }
}

/// Tool context backed by `platform`, with no path restrictions.
pub fn context(platform: Arc<RecordingPlatform>) -> ToolContext {
    ToolContext::new(platform, SecurityConfig::default())
}

/// Build an argument object from a `json!` literal.
pub fn args(value: Value) -> rmcp::model::JsonObject {
    value.as_object().cloned().unwrap_or_default()
}
