//! HTTP client for the document service's REST surface.
//!
//! The client is deliberately stateless: every successful mutation is
//! expected to be followed by a full [`crate::store::DocumentStore`]
//! refresh, so no response here updates any local cache. The
//! [`DocumentApi`] trait is the seam the negotiator, store, and tests sit
//! on; [`MockDocumentApi`] is the test double.

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::Document;
use crate::multipart::{self, UploadPayload};

/// The four remote operations the core consumes.
#[allow(async_fn_in_trait)]
pub trait DocumentApi {
    /// Fetch the full remote collection.
    async fn list(&self) -> Result<Vec<Document>, ClientError>;

    /// Fetch a short-lived direct-access URL for one document.
    async fn signed_url(&self, id: &str) -> Result<String, ClientError>;

    /// Send one file as a multipart body.
    async fn upload(&self, payload: UploadPayload) -> Result<UploadAck, ClientError>;

    /// Issue a delete request. `confirm=false` is the tentative call; the
    /// server may answer with `confirm: true` asking for a forced retry.
    async fn delete(&self, id: &str, confirm: bool) -> Result<DeleteAck, ClientError>;
}

/// Server acknowledgment of an upload. Field availability varies across
/// server revisions, so everything is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadAck {
    pub id: Option<String>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub message: Option<String>,
    pub record: Option<Document>,
}

/// Server response to a delete request.
///
/// `confirm: true` means the deletion was not performed and must be
/// re-issued with explicit confirmation; anything else is a final outcome.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteAck {
    pub confirm: Option<bool>,
    pub status: Option<String>,
    pub message: Option<String>,
    pub id: Option<String>,
}

impl DeleteAck {
    /// Did the server ask for a confirmed retry instead of deleting?
    pub fn needs_confirmation(&self) -> bool {
        self.confirm == Some(true)
    }
}

#[derive(Deserialize)]
struct SignedUrlResponse {
    url: Option<String>,
}

/// Some server revisions wrap an empty listing in an envelope object
/// instead of returning a bare array; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Documents(Vec<Document>),
    Envelope { data: Vec<Document> },
}

/// reqwest-backed implementation of [`DocumentApi`].
pub struct DocumentClient {
    base_url: String,
    user_id: String,
    http: reqwest::Client,
}

impl DocumentClient {
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id: config.user_id.clone(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into the matching error variant.
    async fn reject(context: &str, response: reqwest::Response) -> ClientError {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return ClientError::NotFound(context.to_string());
        }
        let body = response.text().await.unwrap_or_default();
        ClientError::Validation {
            status: status.as_u16(),
            body,
        }
    }
}

impl DocumentApi for DocumentClient {
    async fn list(&self) -> Result<Vec<Document>, ClientError> {
        let response = self
            .http
            .get(self.endpoint("/api/documents"))
            .header("X-User-Id", &self.user_id)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        if !response.status().is_success() {
            return Err(Self::reject("document listing", response).await);
        }

        let parsed: ListResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        let documents = match parsed {
            ListResponse::Documents(docs) => docs,
            ListResponse::Envelope { data } => data,
        };
        tracing::debug!(count = documents.len(), "listed documents");
        Ok(documents)
    }

    async fn signed_url(&self, id: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/signed-url/{id}")))
            .header("X-User-Id", &self.user_id)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(id, response).await);
        }

        let parsed: SignedUrlResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        parsed
            .url
            .ok_or_else(|| ClientError::Decode("signed-url response has no url field".into()))
    }

    async fn upload(&self, payload: UploadPayload) -> Result<UploadAck, ClientError> {
        let file_name = payload.file_name.clone();
        let body = multipart::encode(&payload);
        let response = self
            .http
            .post(self.endpoint("/api/upload"))
            .header("X-User-Id", &self.user_id)
            .header("Content-Type", body.content_type())
            .body(body.bytes)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Validation {
                status: status.as_u16(),
                body,
            });
        }

        let ack: UploadAck = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        tracing::info!(file_name, "upload accepted");
        Ok(ack)
    }

    async fn delete(&self, id: &str, confirm: bool) -> Result<DeleteAck, ClientError> {
        let path = if confirm {
            format!("/api/documents/{id}?confirm=true")
        } else {
            format!("/api/documents/{id}")
        };
        let response = self
            .http
            .delete(self.endpoint(&path))
            .header("X-User-Id", &self.user_id)
            .send()
            .await
            .map_err(ClientError::from_transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(id, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Mock API for testing — scripted responses plus call recording.
pub struct MockDocumentApi {
    documents: std::sync::Mutex<Vec<Document>>,
    fail_list: std::sync::atomic::AtomicBool,
    delete_script: std::sync::Mutex<std::collections::VecDeque<Result<DeleteAck, ClientError>>>,
    list_calls: std::sync::atomic::AtomicUsize,
    delete_calls: std::sync::Mutex<Vec<(String, bool)>>,
}

impl MockDocumentApi {
    pub fn new() -> Self {
        Self {
            documents: std::sync::Mutex::new(Vec::new()),
            fail_list: std::sync::atomic::AtomicBool::new(false),
            delete_script: std::sync::Mutex::new(std::collections::VecDeque::new()),
            list_calls: std::sync::atomic::AtomicUsize::new(0),
            delete_calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_documents(self, documents: Vec<Document>) -> Self {
        *self.documents.lock().unwrap() = documents;
        self
    }

    /// Make subsequent `list()` calls fail with a network error.
    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Queue the response for the next `delete()` call.
    pub fn push_delete_response(&self, response: Result<DeleteAck, ClientError>) {
        self.delete_script.lock().unwrap().push_back(response);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> Vec<(String, bool)> {
        self.delete_calls.lock().unwrap().clone()
    }
}

impl Default for MockDocumentApi {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentApi for MockDocumentApi {
    async fn list(&self) -> Result<Vec<Document>, ClientError> {
        self.list_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail_list.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(ClientError::Network("simulated outage".into()));
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn signed_url(&self, id: &str) -> Result<String, ClientError> {
        Ok(format!("https://signed.example/{id}"))
    }

    async fn upload(&self, payload: UploadPayload) -> Result<UploadAck, ClientError> {
        Ok(UploadAck {
            file_name: Some(payload.file_name),
            message: Some("File uploaded successfully".into()),
            ..UploadAck::default()
        })
    }

    async fn delete(&self, id: &str, confirm: bool) -> Result<DeleteAck, ClientError> {
        self.delete_calls
            .lock()
            .unwrap()
            .push((id.to_string(), confirm));
        match self.delete_script.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(DeleteAck::default()),
        }
    }
}
