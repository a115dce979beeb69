//! HTTP client for the Apillon REST API.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use super::api::ApillonApi;
use super::error::{ApillonError, ApillonResult};
use super::types::{
    BurnNft, CreateBucket, CreateCollection, CreateWebsite, DeployEnvironment, DeployWebsite,
    FileUpload, MintNft, ObjectQuery, PageQuery, SignedUpload, TransferOwnership,
    UploadFileEntry, UploadSession, UploadSummary, UploadedFile,
};
use crate::core::config::{ApillonConfig, Config, CredentialsConfig};

/// Apillon API client.
///
/// Every platform call, uploads included, goes through this client and the
/// single configured base URL. Requests carry HTTP Basic auth built from the
/// API key and secret; pre-signed upload URLs are called without it.
pub struct ApillonClient {
    http: HttpClient,
    base_url: String,
    authorization: String,
}

impl ApillonClient {
    /// Create a client from explicit credentials and endpoint settings.
    pub fn new(credentials: &CredentialsConfig, apillon: &ApillonConfig) -> ApillonResult<Self> {
        let http = HttpClient::builder().timeout(apillon.timeout()).build()?;
        let token = BASE64.encode(format!("{}:{}", credentials.api_key, credentials.api_secret));

        info!("Apillon client targeting {}", apillon.api_url);

        Ok(Self {
            http,
            base_url: apillon.api_url.trim_end_matches('/').to_string(),
            authorization: format!("Basic {}", token),
        })
    }

    /// Create a client from the server configuration.
    pub fn from_config(config: &Config) -> ApillonResult<Self> {
        Self::new(&config.credentials, &config.apillon)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
    }

    async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> ApillonResult<Value> {
        Self::send(self.request(Method::GET, path).query(query)).await
    }

    async fn get_plain(&self, path: &str) -> ApillonResult<Value> {
        Self::send(self.request(Method::GET, path)).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApillonResult<Value> {
        Self::send(self.request(Method::POST, path).json(body)).await
    }

    /// Send a request and unwrap the platform's `{ id, status, data }` envelope.
    async fn send(request: RequestBuilder) -> ApillonResult<Value> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            warn!("Apillon rejected request ({}): {}", status.as_u16(), message);
            return Err(ApillonError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Ok(match body {
            Value::Object(mut envelope) if envelope.contains_key("data") => {
                envelope.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        })
    }

    /// Run a complete upload session: announce the files, PUT each one to its
    /// pre-signed URL, then close the session.
    async fn upload_session(&self, prefix: &str, files: Vec<FileUpload>) -> ApillonResult<Value> {
        let entries: Vec<UploadFileEntry<'_>> = files
            .iter()
            .map(|f| UploadFileEntry {
                file_name: &f.file_name,
                path: f.path.as_deref(),
            })
            .collect();

        let started = self
            .post(&format!("{}/upload", prefix), &json!({ "files": entries }))
            .await?;
        let session: UploadSession = serde_json::from_value(started)
            .map_err(|e| ApillonError::unexpected(format!("invalid upload session: {}", e)))?;

        if session.files.len() != files.len() {
            return Err(ApillonError::unexpected(format!(
                "upload session returned {} destinations for {} files",
                session.files.len(),
                files.len()
            )));
        }

        let mut pending: Vec<Option<FileUpload>> = files.into_iter().map(Some).collect();
        let mut uploaded = Vec::with_capacity(pending.len());
        for signed in session.files {
            let file = take_matching(&mut pending, &signed).ok_or_else(|| {
                ApillonError::unexpected(format!(
                    "upload session returned a destination for unknown file '{}'",
                    signed.file_name
                ))
            })?;
            let size = file.content.len();
            let response = self.http.put(&signed.url).body(file.content).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApillonError::Api {
                    status: status.as_u16(),
                    message: format!("upload of '{}' was rejected", file.file_name),
                });
            }
            debug!("Uploaded {} ({} bytes)", signed.file_name, size);
            uploaded.push(UploadedFile {
                file_name: signed.file_name,
                path: signed.path.or(file.path),
                file_uuid: signed.file_uuid,
                size,
            });
        }

        self.post(
            &format!("{}/upload/{}/end", prefix, session.session_uuid),
            &json!({}),
        )
        .await?;

        info!(
            "Upload session {} completed with {} file(s)",
            session.session_uuid,
            uploaded.len()
        );

        serde_json::to_value(UploadSummary {
            session_uuid: session.session_uuid,
            files: uploaded,
        })
        .map_err(|e| ApillonError::unexpected(e.to_string()))
    }
}

/// Remove and return the pending file a signed destination was issued for.
///
/// Files are matched on name and bucket path, so two `index.html` in
/// different folders never swap destinations. A destination that does not
/// echo a path falls back to the first pending file of that name.
fn take_matching(pending: &mut [Option<FileUpload>], signed: &SignedUpload) -> Option<FileUpload> {
    let same_name = |file: &FileUpload| file.file_name == signed.file_name;
    let exact = pending
        .iter()
        .position(|slot| slot.as_ref().is_some_and(|f| same_name(f) && f.path == signed.path));
    let index = match exact {
        Some(index) => Some(index),
        None if signed.path.is_none() => pending
            .iter()
            .position(|slot| slot.as_ref().is_some_and(same_name)),
        None => None,
    };
    index.and_then(|i| pending[i].take())
}

/// Pull the most useful message out of an error body.
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        v.get("message")
            .and_then(Value::as_str)
            .or_else(|| {
                v.get("errors")
                    .and_then(|e| e.get(0))
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
            })
            .map(str::to_string)
    });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl ApillonApi for ApillonClient {
    #[instrument(skip(self))]
    async fn create_bucket(&self, request: &CreateBucket) -> ApillonResult<Value> {
        self.post("/storage/buckets", request).await
    }

    #[instrument(skip(self))]
    async fn list_buckets(&self, page: PageQuery) -> ApillonResult<Value> {
        self.get("/storage/buckets", &page).await
    }

    #[instrument(skip(self))]
    async fn list_objects(&self, bucket_uuid: &str, query: &ObjectQuery) -> ApillonResult<Value> {
        self.get(&format!("/storage/buckets/{}/content", bucket_uuid), query)
            .await
    }

    #[instrument(skip(self))]
    async fn upload_file(&self, bucket_uuid: &str, file: FileUpload) -> ApillonResult<Value> {
        self.upload_session(&format!("/storage/buckets/{}", bucket_uuid), vec![file])
            .await
    }

    #[instrument(skip(self))]
    async fn list_websites(&self, page: PageQuery) -> ApillonResult<Value> {
        self.get("/hosting/websites", &page).await
    }

    #[instrument(skip(self))]
    async fn get_website(&self, website_uuid: &str) -> ApillonResult<Value> {
        self.get_plain(&format!("/hosting/websites/{}", website_uuid))
            .await
    }

    #[instrument(skip(self))]
    async fn create_website(&self, request: &CreateWebsite) -> ApillonResult<Value> {
        self.post("/hosting/websites", request).await
    }

    #[instrument(skip(self, files), fields(files = files.len()))]
    async fn upload_website_files(
        &self,
        website_uuid: &str,
        files: Vec<FileUpload>,
    ) -> ApillonResult<Value> {
        self.upload_session(&format!("/hosting/websites/{}", website_uuid), files)
            .await
    }

    #[instrument(skip(self))]
    async fn deploy_website(
        &self,
        website_uuid: &str,
        environment: DeployEnvironment,
    ) -> ApillonResult<Value> {
        let body = DeployWebsite {
            environment: environment.code(),
        };
        self.post(&format!("/hosting/websites/{}/deploy", website_uuid), &body)
            .await
    }

    #[instrument(skip(self))]
    async fn list_deployments(&self, website_uuid: &str, page: PageQuery) -> ApillonResult<Value> {
        self.get(
            &format!("/hosting/websites/{}/deployments", website_uuid),
            &page,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_collections(&self, page: PageQuery) -> ApillonResult<Value> {
        self.get("/nfts/collections", &page).await
    }

    #[instrument(skip(self))]
    async fn get_collection(&self, collection_uuid: &str) -> ApillonResult<Value> {
        self.get_plain(&format!("/nfts/collections/{}", collection_uuid))
            .await
    }

    #[instrument(skip(self))]
    async fn create_collection(&self, request: &CreateCollection) -> ApillonResult<Value> {
        self.post("/nfts/collections", request).await
    }

    #[instrument(skip(self))]
    async fn mint_nft(&self, collection_uuid: &str, request: &MintNft) -> ApillonResult<Value> {
        self.post(&format!("/nfts/collections/{}/mint", collection_uuid), request)
            .await
    }

    #[instrument(skip(self))]
    async fn burn_nft(&self, collection_uuid: &str, request: &BurnNft) -> ApillonResult<Value> {
        self.post(&format!("/nfts/collections/{}/burn", collection_uuid), request)
            .await
    }

    #[instrument(skip(self))]
    async fn transfer_ownership(
        &self,
        collection_uuid: &str,
        request: &TransferOwnership,
    ) -> ApillonResult<Value> {
        self.post(
            &format!("/nfts/collections/{}/transfer", collection_uuid),
            request,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_transactions(
        &self,
        collection_uuid: &str,
        page: PageQuery,
    ) -> ApillonResult<Value> {
        self.get(
            &format!("/nfts/collections/{}/transactions", collection_uuid),
            &page,
        )
        .await
    }
}
