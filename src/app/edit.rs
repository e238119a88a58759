use tracing::{error, info};

use super::DocumentManager;
use crate::api::{Category, Document, DocumentUpdate};
use crate::ui::{join_tags, parse_tags, Modal};

/// Editable fields as the user sees them; tags are one comma-separated field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub tags: String,
    pub description: String,
}

impl EditForm {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            author: doc.author.clone().unwrap_or_default(),
            category: doc.category,
            tags: join_tags(&doc.tags),
            description: doc.description.clone().unwrap_or_default(),
        }
    }

    /// Empty author and description are left out of the update.
    pub fn to_update(&self) -> DocumentUpdate {
        let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
        DocumentUpdate {
            title: Some(self.title.clone()),
            author: optional(&self.author),
            category: Some(self.category),
            tags: Some(parse_tags(&self.tags)),
            description: optional(&self.description),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditDialog {
    pub modal: Modal,
    pub form: EditForm,
    document: Option<Document>,
}

impl EditDialog {
    pub fn new() -> Self {
        Self {
            modal: Modal::closed("editModal"),
            form: EditForm::default(),
            document: None,
        }
    }

    /// Document being edited.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }
}

impl Default for EditDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentManager {
    /// Fetch the document and open the edit dialog pre-filled from it.
    pub async fn edit_document(&mut self, id: &str) -> bool {
        match self.api.get_document(id).await {
            Ok(doc) => {
                self.edit.form = EditForm::from_document(&doc);
                self.edit.document = Some(doc);
                self.edit.modal.open();
                true
            }
            Err(e) => {
                error!(id, error = %e, "Error loading document");
                self.notifier.error("Failed to load document");
                false
            }
        }
    }

    /// Send the form. On failure the dialog stays open with its contents.
    pub async fn save_document(&mut self) -> bool {
        let Some(id) = self.edit.document.as_ref().map(|d| d.id.clone()) else {
            return false;
        };
        let update = self.edit.form.to_update();

        match self.api.update_document(&id, &update).await {
            Ok(_) => {
                info!(id = %id, "document updated");
                self.notifier.success("Document updated successfully!");
                self.edit.modal.close();
                self.reload_all().await;
                true
            }
            Err(e) => {
                error!(id = %id, error = %e, "Error updating document");
                self.notifier.error("Failed to update document");
                false
            }
        }
    }
}
