use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::schema::{
    AiAnalysis, AnalyticsSnapshot, DeleteResponse, Document, DocumentQuery, DocumentUpdate,
    UploadResponse,
};
use super::{ApiError, DocumentApi, UploadFile};
use crate::config::ApiConfig;

/// `reqwest`-backed client for the document API.
#[derive(Clone)]
pub struct HttpDocumentApi {
    config: ApiConfig,
    client: Client,
}

impl HttpDocumentApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("docdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn document_url(&self, id: &str) -> String {
        format!(
            "{}{}/{}",
            self.config.base_url,
            self.config.endpoints.documents,
            urlencoding::encode(id)
        )
    }

    /// Send, log any failure under `operation`, and hand it back to the caller.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(operation, "API request");
        let result = Self::execute(request).await;
        if let Err(ref e) = result {
            error!(operation, error = %e, "API error");
        }
        result
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::from_status(status, &body));
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn list_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, ApiError> {
        let mut request = self.client.get(self.url(&self.config.endpoints.documents));
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }
        self.send("list_documents", request).await
    }

    async fn get_document(&self, id: &str) -> Result<Document, ApiError> {
        let request = self.client.get(self.document_url(id));
        self.send("get_document", request).await
    }

    async fn upload_file(&self, file: UploadFile, analyze: bool) -> Result<UploadResponse, ApiError> {
        let endpoint = if analyze {
            &self.config.endpoints.upload_analyze
        } else {
            &self.config.endpoints.upload
        };
        let UploadFile {
            name,
            mime_type,
            data,
        } = file;
        let part = Part::bytes(data).file_name(name).mime_str(&mime_type)?;
        let form = Form::new().part("file", part);
        let request = self.client.post(self.url(endpoint)).multipart(form);
        self.send("upload_file", request).await
    }

    async fn update_document(&self, id: &str, update: &DocumentUpdate) -> Result<Document, ApiError> {
        let request = self.client.put(self.document_url(id)).json(update);
        self.send("update_document", request).await
    }

    async fn delete_document(&self, id: &str) -> Result<DeleteResponse, ApiError> {
        let request = self.client.delete(self.document_url(id));
        self.send("delete_document", request).await
    }

    async fn analyze_document(&self, id: &str) -> Result<AiAnalysis, ApiError> {
        let url = format!("{}/analyze", self.document_url(id));
        self.send("analyze_document", self.client.post(url)).await
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        let request = self.client.get(self.url(&self.config.endpoints.analytics));
        self.send("analytics", request).await
    }
}
