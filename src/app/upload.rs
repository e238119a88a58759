//! Batch upload.
//!
//! Files go up one at a time in selection order; progress is linear in the
//! number of files started. Each file succeeds or fails on its own and the
//! batch always runs to the end. Files on disk are read one at a time, right
//! before their upload, so only one file is held in memory.

use tracing::{error, info};

use super::DocumentManager;
use crate::api::{ApiError, UploadFile};
use crate::ui::{ProgressBar, Region};

/// Upload area state: progress bar, its visibility, and the analyze toggle.
#[derive(Debug, Clone)]
pub struct UploadPanel {
    pub progress: ProgressBar,
    pub indicator: Region,
    pub analyze: bool,
}

impl UploadPanel {
    pub fn new(analyze: bool) -> Self {
        Self {
            progress: ProgressBar::default(),
            indicator: Region::hidden("uploadProgress"),
            analyze,
        }
    }
}

/// Result for one file: the created document id, or the error message.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub name: String,
    pub result: Result<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReport {
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// One entry of a batch: bytes already in memory, or a path read on its turn.
enum Source {
    Loaded(UploadFile),
    Path(String),
}

impl Source {
    fn name(&self) -> String {
        match self {
            Source::Loaded(file) => file.name.clone(),
            Source::Path(path) => path.clone(),
        }
    }

    async fn load(self) -> Result<UploadFile, ApiError> {
        match self {
            Source::Loaded(file) => Ok(file),
            Source::Path(path) => UploadFile::from_path(&path).await,
        }
    }
}

impl DocumentManager {
    /// Upload in-memory files.
    pub async fn upload_files(&mut self, files: Vec<UploadFile>) -> UploadReport {
        self.upload_batch(files.into_iter().map(Source::Loaded).collect())
            .await
    }

    /// Upload files from disk. Unreadable paths count as failed uploads.
    pub async fn upload_paths(&mut self, paths: &[String]) -> UploadReport {
        self.upload_batch(paths.iter().cloned().map(Source::Path).collect())
            .await
    }

    async fn upload_batch(&mut self, sources: Vec<Source>) -> UploadReport {
        let mut report = UploadReport::default();
        if sources.is_empty() {
            return report;
        }

        let analyze = self.upload.analyze;
        let total = sources.len();
        self.upload.indicator.show();

        for (i, source) in sources.into_iter().enumerate() {
            self.upload.progress.set((i + 1) as f64 / total as f64 * 100.0);

            let name = source.name();
            let result = match source.load().await {
                Ok(file) => self.api.upload_file(file, analyze).await,
                Err(e) => Err(e),
            };
            let result = match result {
                Ok(response) if response.success => {
                    info!(file = %name, analyze, "uploaded");
                    Ok(response.document.map(|d| d.id).unwrap_or_default())
                }
                Ok(response) => {
                    error!(file = %name, message = %response.message, "upload rejected");
                    Err(response.message)
                }
                Err(e) => {
                    error!(file = %name, error = %e, "Error uploading");
                    Err(e.to_string())
                }
            };
            report.outcomes.push(UploadOutcome { name, result });
        }

        self.upload.indicator.hide();

        let (succeeded, failed) = (report.success_count(), report.error_count());
        if succeeded > 0 {
            self.notifier
                .success(&format!("{succeeded} file(s) uploaded successfully!"));
            self.reload_all().await;
        }
        if failed > 0 {
            self.notifier.error(&format!("{failed} file(s) failed to upload"));
        }
        report
    }
}
