//! Client side of the document REST API.
//!
//! `DocumentApi` is the seam handlers depend on; `HttpDocumentApi` talks to
//! the real server. Failures are logged here and returned, never swallowed.

pub mod client;
pub mod error;
pub mod schema;
pub mod upload;

#[cfg(test)]
pub(crate) mod fake;

pub use client::HttpDocumentApi;
pub use error::{ApiError, GENERIC_FAILURE};
pub use schema::{
    AiAnalysis, AnalyticsSnapshot, Category, CategoryCount, DeleteResponse, Document,
    DocumentQuery, DocumentUpdate, TagCount, TimelinePoint, UploadResponse,
};
pub use upload::UploadFile;

use async_trait::async_trait;

/// One operation per remote action.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, ApiError>;

    async fn get_document(&self, id: &str) -> Result<Document, ApiError>;

    /// Upload through the analyze endpoint when `analyze` is set. The file
    /// is consumed so its bytes move into the request body.
    async fn upload_file(&self, file: UploadFile, analyze: bool) -> Result<UploadResponse, ApiError>;

    async fn update_document(&self, id: &str, update: &DocumentUpdate) -> Result<Document, ApiError>;

    async fn delete_document(&self, id: &str) -> Result<DeleteResponse, ApiError>;

    async fn analyze_document(&self, id: &str) -> Result<AiAnalysis, ApiError>;

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError>;
}
