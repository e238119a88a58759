//! In-memory `DocumentApi` that records calls and fails on request.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::collections::HashSet;

use super::schema::{
    AiAnalysis, AnalyticsSnapshot, Category, DeleteResponse, Document, DocumentQuery,
    DocumentUpdate, UploadResponse,
};
use super::{ApiError, DocumentApi, UploadFile};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(DocumentQuery),
    Get(String),
    Upload { name: String, analyze: bool },
    Update(String, DocumentUpdate),
    Delete(String),
    Analyze(String),
    Analytics,
}

#[derive(Default)]
pub struct FakeApi {
    pub documents: Mutex<Vec<Document>>,
    pub snapshot: Mutex<AnalyticsSnapshot>,
    pub analysis: Mutex<Option<AiAnalysis>>,
    failing_uploads: Mutex<HashSet<String>>,
    failing_ops: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<Call>>,
    on_upload: Mutex<Option<UploadHook>>,
}

type UploadHook = Box<dyn Fn(&str) + Send>;

pub fn document(id: &str, title: &str) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        author: None,
        category: Category::General,
        file_type: "pdf".to_string(),
        file_size: 1536,
        tags: vec!["alpha".to_string(), "beta".to_string()],
        description: None,
        created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
        file_name: Some(format!("{title}.pdf")),
        file_url: None,
        updated_at: None,
    }
}

impl FakeApi {
    pub fn with_documents(documents: Vec<Document>) -> Self {
        let api = Self::default();
        *api.documents.lock() = documents;
        api
    }

    pub fn fail_upload(&self, name: &str) {
        self.failing_uploads.lock().insert(name.to_string());
    }

    /// Make every call of `operation` fail with a 500 and a detail message.
    pub fn fail(&self, operation: &'static str) {
        self.failing_ops.lock().insert(operation);
    }

    /// Run `hook` with the file name whenever an upload arrives.
    pub fn on_upload(&self, hook: impl Fn(&str) + Send + 'static) {
        *self.on_upload.lock() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| matches(c)).count()
    }

    pub fn list_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::List(_)))
    }

    pub fn analytics_calls(&self) -> usize {
        self.count(|c| matches!(c, Call::Analytics))
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), ApiError> {
        self.calls.lock().push(call);
        if self.failing_ops.lock().contains(operation) {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("{operation} failed"),
            });
        }
        Ok(())
    }

    fn find(&self, id: &str) -> Result<Document, ApiError> {
        self.documents
            .lock()
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                status: StatusCode::NOT_FOUND,
                message: "Document not found".to_string(),
            })
    }
}

#[async_trait]
impl DocumentApi for FakeApi {
    async fn list_documents(&self, query: &DocumentQuery) -> Result<Vec<Document>, ApiError> {
        self.record("list", Call::List(query.clone()))?;
        let search = query.search.clone().unwrap_or_default().to_lowercase();
        Ok(self
            .documents
            .lock()
            .iter()
            .filter(|d| search.is_empty() || d.title.to_lowercase().contains(&search))
            .cloned()
            .collect())
    }

    async fn get_document(&self, id: &str) -> Result<Document, ApiError> {
        self.record("get", Call::Get(id.to_string()))?;
        self.find(id)
    }

    async fn upload_file(&self, file: UploadFile, analyze: bool) -> Result<UploadResponse, ApiError> {
        self.record(
            "upload",
            Call::Upload {
                name: file.name.clone(),
                analyze,
            },
        )?;
        if let Some(hook) = self.on_upload.lock().as_ref() {
            hook(&file.name);
        }
        if self.failing_uploads.lock().contains(&file.name) {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("could not store {}", file.name),
            });
        }
        let doc = document(&format!("up-{}", file.name), &file.name);
        self.documents.lock().push(doc.clone());
        Ok(UploadResponse {
            success: true,
            message: "Document uploaded successfully".to_string(),
            document: Some(doc),
        })
    }

    async fn update_document(&self, id: &str, update: &DocumentUpdate) -> Result<Document, ApiError> {
        self.record("update", Call::Update(id.to_string(), update.clone()))?;
        let mut docs = self.documents.lock();
        let doc = docs.iter_mut().find(|d| d.id == id).ok_or(ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: "Document not found".to_string(),
        })?;
        if let Some(ref title) = update.title {
            doc.title = title.clone();
        }
        if let Some(ref author) = update.author {
            doc.author = Some(author.clone());
        }
        if let Some(category) = update.category {
            doc.category = category;
        }
        if let Some(ref tags) = update.tags {
            doc.tags = tags.clone();
        }
        if let Some(ref description) = update.description {
            doc.description = Some(description.clone());
        }
        Ok(doc.clone())
    }

    async fn delete_document(&self, id: &str) -> Result<DeleteResponse, ApiError> {
        self.record("delete", Call::Delete(id.to_string()))?;
        self.documents.lock().retain(|d| d.id != id);
        Ok(DeleteResponse {
            success: true,
            message: "Document deleted successfully".to_string(),
        })
    }

    async fn analyze_document(&self, id: &str) -> Result<AiAnalysis, ApiError> {
        self.record("analyze", Call::Analyze(id.to_string()))?;
        self.analysis
            .lock()
            .clone()
            .ok_or_else(|| ApiError::Decode("no analysis scripted".to_string()))
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        self.record("analytics", Call::Analytics)?;
        Ok(self.snapshot.lock().clone())
    }
}
