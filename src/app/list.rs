use std::sync::Arc;
use tracing::{debug, error};

use crate::api::{Document, DocumentApi, DocumentQuery};
use crate::ui::{Notifier, Region};

/// Filters driving the list query. Empty strings mean "any"; anything else,
/// whitespace included, is sent as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub category: String,
    pub file_type: String,
    pub search: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Filters {
    pub fn to_query(&self) -> DocumentQuery {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        DocumentQuery {
            category: non_empty(&self.category),
            file_type: non_empty(&self.file_type),
            search: non_empty(&self.search),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// The filtered document list and its cached contents.
pub struct DocumentList {
    api: Arc<dyn DocumentApi>,
    notifier: Arc<dyn Notifier>,
    filters: Filters,
    documents: Vec<Document>,
    empty_state: Region,
}

impl DocumentList {
    pub fn new(api: Arc<dyn DocumentApi>, notifier: Arc<dyn Notifier>, filters: Filters) -> Self {
        Self {
            api,
            notifier,
            filters,
            documents: Vec::new(),
            empty_state: Region::hidden("emptyState"),
        }
    }

    /// Replace the cache with a fresh fetch. On failure the previous list stays.
    pub async fn load(&mut self) -> bool {
        let query = self.filters.to_query();
        debug!(?query, "loading documents");
        match self.api.list_documents(&query).await {
            Ok(documents) => {
                self.documents = documents;
                if self.documents.is_empty() {
                    self.empty_state.show();
                } else {
                    self.empty_state.hide();
                }
                true
            }
            Err(e) => {
                error!(error = %e, "Error loading documents");
                self.notifier.error("Failed to load documents");
                false
            }
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut Filters {
        &mut self.filters
    }

    pub fn empty_state(&self) -> &Region {
        &self.empty_state
    }

    /// `"0 documents found"` or `"N document(s) found"`.
    pub fn count_label(&self) -> String {
        match self.documents.len() {
            0 => "0 documents found".to_string(),
            n => format!("{n} document(s) found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{document, Call, FakeApi};
    use crate::ui::{Severity, ToastCenter};

    #[test]
    fn filters_drop_only_empty_values() {
        let filters = Filters {
            category: "Legal".into(),
            file_type: String::new(),
            search: " plan ".into(),
            limit: Some(10),
            offset: None,
        };
        let query = filters.to_query();
        assert_eq!(query.category.as_deref(), Some("Legal"));
        assert_eq!(query.file_type, None);
        assert_eq!(query.search.as_deref(), Some(" plan "));

        let blank = Filters {
            search: "  ".into(),
            ..Default::default()
        };
        assert_eq!(blank.to_query().search.as_deref(), Some("  "));
        assert_eq!(query.limit, Some(10));
    }

    #[tokio::test]
    async fn load_fills_list_and_count() {
        let api = Arc::new(FakeApi::with_documents(vec![document("1", "a"), document("2", "b")]));
        let toasts = Arc::new(ToastCenter::default());
        let mut list = DocumentList::new(api.clone(), toasts, Filters::default());

        assert!(list.load().await);
        assert_eq!(list.documents().len(), 2);
        assert_eq!(list.count_label(), "2 document(s) found");
        assert!(!list.empty_state().is_visible());
        assert_eq!(api.calls(), vec![Call::List(DocumentQuery::default())]);
    }

    #[tokio::test]
    async fn empty_result_shows_placeholder() {
        let api = Arc::new(FakeApi::default());
        let mut list = DocumentList::new(api, Arc::new(ToastCenter::default()), Filters::default());

        list.load().await;
        assert_eq!(list.count_label(), "0 documents found");
        assert!(list.empty_state().is_visible());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_documents() {
        let api = Arc::new(FakeApi::with_documents(vec![document("1", "a")]));
        let toasts = ToastCenter::default();
        let mut list = DocumentList::new(api.clone(), Arc::new(toasts.clone()), Filters::default());
        list.load().await;

        api.fail("list");
        assert!(!list.load().await);
        assert_eq!(list.documents().len(), 1);
        assert_eq!(toasts.messages(Severity::Error), vec!["Failed to load documents"]);
    }
}
