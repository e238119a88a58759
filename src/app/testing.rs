//! Manager wired to a fake API and a recording toast center.

use std::sync::Arc;

use super::DocumentManager;
use crate::api::fake::FakeApi;
use crate::api::Document;
use crate::config::Config;
use crate::ui::{Confirm, ToastCenter};

pub struct Harness {
    pub app: DocumentManager,
    pub api: Arc<FakeApi>,
    pub toasts: ToastCenter,
}

struct FixedAnswer(bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

pub fn manager(documents: Vec<Document>) -> Harness {
    manager_with_confirm(documents, true)
}

pub fn manager_with_confirm(documents: Vec<Document>, answer: bool) -> Harness {
    let api = Arc::new(FakeApi::with_documents(documents));
    let config = Config::default();
    let toasts = ToastCenter::from_config(&config.ui);
    let app = DocumentManager::new(
        api.clone(),
        Arc::new(toasts.clone()),
        Arc::new(FixedAnswer(answer)),
        &config,
    );
    Harness { app, api, toasts }
}
