//! Document manager view-model.
//!
//! Handlers mutate typed state and talk to the injected `DocumentApi`;
//! `render` turns the state into text. Every handler catches its own
//! failures, reports them through the `Notifier` and leaves the previous
//! state in place.

pub mod analysis;
pub mod edit;
pub mod list;
pub mod render;
pub mod search;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use analysis::AiReview;
pub use edit::{EditDialog, EditForm};
pub use list::{DocumentList, Filters};
pub use render::{DocumentCard, UNKNOWN_AUTHOR};
pub use search::Debouncer;
pub use upload::{UploadOutcome, UploadPanel, UploadReport};

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::api::DocumentApi;
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::ui::{Confirm, Notifier};

const DELETE_PROMPT: &str = "Are you sure you want to delete this document?";

/// How a delete request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing was sent.
    Cancelled,
    Failed,
}

impl DeleteOutcome {
    pub fn is_failure(self) -> bool {
        self == DeleteOutcome::Failed
    }
}

pub struct DocumentManager {
    api: Arc<dyn DocumentApi>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    list: DocumentList,
    dashboard: Dashboard,
    upload: UploadPanel,
    edit: EditDialog,
    review: AiReview,
    search: Debouncer,
}

impl DocumentManager {
    pub fn new(
        api: Arc<dyn DocumentApi>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        config: &Config,
    ) -> Self {
        let list = DocumentList::new(api.clone(), notifier.clone(), Filters::default());
        let dashboard = Dashboard::new(api.clone(), notifier.clone(), config.ui.top_tags_limit);
        Self {
            api,
            notifier,
            confirm,
            list,
            dashboard,
            upload: UploadPanel::new(config.upload.analyze),
            edit: EditDialog::new(),
            review: AiReview::new(),
            search: Debouncer::new(config.ui.search_debounce()),
        }
    }

    /// Initial load: documents, then analytics.
    pub async fn init(&mut self) {
        self.list.load().await;
        self.dashboard.init().await;
    }

    /// Re-fetch list and analytics after a mutation.
    async fn reload_all(&mut self) {
        self.list.load().await;
        self.dashboard.load_analytics().await;
    }

    /// Delete after confirmation. Declining is a no-op.
    pub async fn delete_document(&mut self, id: &str) -> DeleteOutcome {
        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!(id, "delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_document(id).await {
            Ok(_) => {
                info!(id, "document deleted");
                self.notifier.success("Document deleted successfully!");
                self.reload_all().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!(id, error = %e, "Error deleting document");
                self.notifier.error("Failed to delete document");
                DeleteOutcome::Failed
            }
        }
    }

    /// Search text changed: restart the debounce timer.
    pub fn on_search_input(&mut self, text: &str) {
        self.list.filters_mut().search = text.to_string();
        self.search.trigger();
    }

    /// Wait for the debounce timer, then fetch. Pends while no search is armed.
    pub async fn run_pending_search(&mut self) {
        self.search.fired().await;
        self.list.load().await;
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    pub async fn on_category_filter(&mut self, category: &str) -> bool {
        self.list.filters_mut().category = category.to_string();
        self.list.load().await
    }

    pub async fn on_type_filter(&mut self, file_type: &str) -> bool {
        self.list.filters_mut().file_type = file_type.to_string();
        self.list.load().await
    }

    /// Replace every filter at once without fetching.
    pub fn set_filters(&mut self, filters: Filters) {
        self.search.cancel();
        *self.list.filters_mut() = filters;
    }

    pub fn set_page(&mut self, limit: Option<u32>, offset: Option<u32>) {
        let filters = self.list.filters_mut();
        filters.limit = limit;
        filters.offset = offset;
    }

    pub fn set_analyze_on_upload(&mut self, analyze: bool) {
        self.upload.analyze = analyze;
    }

    pub async fn refresh_dashboard(&mut self) {
        self.dashboard.refresh(&mut self.list).await;
    }

    pub async fn load_documents(&mut self) -> bool {
        self.list.load().await
    }

    pub async fn load_analytics(&mut self) -> bool {
        self.dashboard.load_analytics().await
    }

    pub fn list(&self) -> &DocumentList {
        &self.list
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn upload_panel(&self) -> &UploadPanel {
        &self.upload
    }

    pub fn edit_dialog(&self) -> &EditDialog {
        &self.edit
    }

    pub fn edit_form_mut(&mut self) -> &mut EditForm {
        &mut self.edit.form
    }

    pub fn review(&self) -> &AiReview {
        &self.review
    }
}
