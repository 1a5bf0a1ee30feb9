//! HTTP document store client
//!
//! Implements [`DocumentStore`] against the hosted service's REST API.
//! Requests authenticate with a project id and API key header pair; filters
//! travel as JSON query objects in repeated `queries[]` parameters.

use super::DocumentStore;
use crate::config::StoreConfig;
use crate::domain::ids::{CollectionId, DocumentId};
use crate::domain::{CustodianError, Document, DocumentList, Filter, Result, StoreError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use std::time::Duration;

/// HTTP client for the hosted document store
///
/// # Example
///
/// ```no_run
/// use custodian::adapters::store::HttpStoreClient;
/// use custodian::config::{secret_string, StoreConfig};
///
/// let config = StoreConfig {
///     endpoint: "https://cloud.example.io/v1".to_string(),
///     project_id: "my-project".to_string(),
///     api_key: secret_string("api-key".to_string()),
///     database_id: "main".to_string(),
///     timeout_seconds: 30,
/// };
/// let client = HttpStoreClient::new(config);
/// ```
pub struct HttpStoreClient {
    client: Client,
    config: StoreConfig,
    endpoint: String,
}

impl HttpStoreClient {
    /// Create a new store client from configuration
    pub fn new(config: StoreConfig) -> Self {
        let endpoint = config.endpoint.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            config,
            endpoint,
        }
    }

    /// Base URL of the store API
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn documents_url(&self, collection_id: &CollectionId) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.config.database_id, collection_id
        )
    }

    fn document_url(&self, collection_id: &CollectionId, document_id: &DocumentId) -> String {
        format!("{}/{}", self.documents_url(collection_id), document_id)
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", self.config.api_key.expose_secret().as_ref())
    }

    /// Map a non-success status to the store error taxonomy
    async fn error_for_status(
        resp: reqwest::Response,
        not_found: impl FnOnce(String) -> StoreError,
        context: &str,
    ) -> CustodianError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        let err = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                StoreError::AuthenticationFailed(format!("{context}: {body}"))
            }
            StatusCode::NOT_FOUND => not_found(context.to_string()),
            s if s.is_server_error() => StoreError::ServerError {
                status: status.as_u16(),
                message: body,
            },
            _ => StoreError::ClientError {
                status: status.as_u16(),
                message: body,
            },
        };
        CustodianError::Store(err)
    }
}

#[async_trait]
impl DocumentStore for HttpStoreClient {
    async fn list_documents(
        &self,
        collection_id: &CollectionId,
        filters: &[Filter],
        limit: usize,
        offset: usize,
    ) -> Result<DocumentList> {
        let url = self.documents_url(collection_id);

        let mut query: Vec<(String, String)> = filters
            .iter()
            .map(|f| ("queries[]".to_string(), f.to_query().to_string()))
            .collect();
        query.push(("limit".to_string(), limit.to_string()));
        query.push(("offset".to_string(), offset.to_string()));

        tracing::debug!(
            collection_id = %collection_id,
            filter_count = filters.len(),
            limit = limit,
            offset = offset,
            "Listing documents"
        );

        let resp = self
            .with_auth(self.client.get(&url).query(&query))
            .send()
            .await
            .map_err(|e| CustodianError::Store(StoreError::ConnectionFailed(e.to_string())))?;

        if !resp.status().is_success() {
            return Err(Self::error_for_status(
                resp,
                StoreError::CollectionNotFound,
                collection_id.as_str(),
            )
            .await);
        }

        resp.json::<DocumentList>()
            .await
            .map_err(|e| CustodianError::Store(StoreError::InvalidResponse(e.to_string())))
    }

    async fn get_document(
        &self,
        collection_id: &CollectionId,
        document_id: &DocumentId,
    ) -> Result<Document> {
        let url = self.document_url(collection_id, document_id);

        tracing::debug!(
            collection_id = %collection_id,
            document_id = %document_id,
            "Fetching document"
        );

        let resp = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| CustodianError::Store(StoreError::ConnectionFailed(e.to_string())))?;

        if !resp.status().is_success() {
            return Err(Self::error_for_status(
                resp,
                StoreError::DocumentNotFound,
                document_id.as_str(),
            )
            .await);
        }

        resp.json::<Document>()
            .await
            .map_err(|e| CustodianError::Store(StoreError::InvalidResponse(e.to_string())))
    }

    async fn update_document(
        &self,
        collection_id: &CollectionId,
        document_id: &DocumentId,
        patch: Map<String, Value>,
    ) -> Result<Document> {
        let url = self.document_url(collection_id, document_id);

        tracing::debug!(
            collection_id = %collection_id,
            document_id = %document_id,
            fields = ?patch.keys().collect::<Vec<_>>(),
            "Updating document"
        );

        let resp = self
            .with_auth(
                self.client
                    .patch(&url)
                    .json(&serde_json::json!({ "data": patch })),
            )
            .send()
            .await
            .map_err(|e| CustodianError::Store(StoreError::ConnectionFailed(e.to_string())))?;

        match resp.status() {
            s if s.is_success() => resp
                .json::<Document>()
                .await
                .map_err(|e| CustodianError::Store(StoreError::InvalidResponse(e.to_string()))),
            StatusCode::NOT_FOUND => Err(CustodianError::Store(StoreError::DocumentNotFound(
                document_id.to_string(),
            ))),
            _ => {
                let status = resp.status().as_u16();
                let body = resp.text().await.unwrap_or_default();
                Err(CustodianError::Store(StoreError::UpdateFailed(format!(
                    "status {status}: {body}"
                ))))
            }
        }
    }
}
