use tracing::{error, info};

use super::DocumentManager;
use crate::api::{AiAnalysis, Document};
use crate::ui::{Modal, ProgressBar, Region};

const MISSING: &str = "N/A";

/// Review dialog for AI suggestions.
#[derive(Debug, Clone)]
pub struct AiReview {
    pub modal: Modal,
    pub loading: Region,
    pub results: Region,
    pub confidence: ProgressBar,
    apply_enabled: bool,
    document: Option<Document>,
    analysis: Option<AiAnalysis>,
}

impl AiReview {
    pub fn new() -> Self {
        Self {
            modal: Modal::closed("aiModal"),
            loading: Region::hidden("aiLoading"),
            results: Region::hidden("aiResults"),
            confidence: ProgressBar::default(),
            apply_enabled: false,
            document: None,
            analysis: None,
        }
    }

    pub fn can_apply(&self) -> bool {
        self.apply_enabled
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn analysis(&self) -> Option<&AiAnalysis> {
        self.analysis.as_ref()
    }

    /// Suggested fields as display rows, `N/A` where missing.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let Some(a) = &self.analysis else {
            return Vec::new();
        };
        let or_missing = |v: &Option<String>| v.clone().unwrap_or_else(|| MISSING.to_string());
        vec![
            ("Title", or_missing(&a.suggested_title)),
            ("Author", or_missing(&a.suggested_author)),
            (
                "Category",
                a.suggested_category
                    .map(|c| c.label().to_string())
                    .unwrap_or_else(|| MISSING.to_string()),
            ),
            ("Summary", or_missing(&a.summary)),
            (
                "Tags",
                if a.suggested_tags.is_empty() {
                    "No suggested tags".to_string()
                } else {
                    a.suggested_tags.join(", ")
                },
            ),
        ]
    }

    fn start(&mut self, doc: Document) {
        self.document = Some(doc);
        self.analysis = None;
        self.modal.open();
        self.loading.show();
        self.results.hide();
        self.apply_enabled = false;
    }

    fn show(&mut self, analysis: AiAnalysis) {
        self.confidence.set(f64::from(analysis.confidence_percent()));
        self.analysis = Some(analysis);
        self.loading.hide();
        self.results.show();
        self.apply_enabled = true;
    }

    fn dismiss(&mut self) {
        self.modal.close();
        self.loading.hide();
        self.results.hide();
        self.apply_enabled = false;
        self.analysis = None;
    }
}

impl Default for AiReview {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentManager {
    /// Open the review dialog and run the analysis.
    pub async fn analyze_with_ai(&mut self, id: &str) -> bool {
        let result = match self.api.get_document(id).await {
            Ok(doc) => {
                self.review.start(doc);
                self.api.analyze_document(id).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(analysis) => {
                info!(id, confidence = analysis.confidence, "analysis ready");
                self.review.show(analysis);
                true
            }
            Err(e) => {
                error!(id, error = %e, "Error analyzing document");
                self.notifier.error("Failed to analyze document with AI");
                self.review.dismiss();
                false
            }
        }
    }

    /// Apply every suggestion to the reviewed document.
    pub async fn apply_ai_suggestions(&mut self) -> bool {
        let (Some(doc), Some(analysis)) = (&self.review.document, &self.review.analysis) else {
            return false;
        };
        let id = doc.id.clone();
        let update = analysis.to_update();

        match self.api.update_document(&id, &update).await {
            Ok(_) => {
                info!(id = %id, "AI suggestions applied");
                self.notifier.success("AI suggestions applied successfully!");
                self.review.dismiss();
                self.reload_all().await;
                true
            }
            Err(e) => {
                error!(id = %id, error = %e, "Error applying AI suggestions");
                self.notifier.error("Failed to apply suggestions");
                false
            }
        }
    }

    pub fn close_review(&mut self) {
        self.review.dismiss();
    }
}
