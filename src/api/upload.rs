use std::path::Path;
use tokio::fs;

use super::ApiError;

/// A file selected for upload, read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = guess_mime_type(&name);
        Self { name, mime_type, data }
    }

    /// Read a file from disk; `~` is expanded.
    pub async fn from_path(path: &str) -> Result<Self, ApiError> {
        let expanded = shellexpand::tilde(path).to_string();
        let abs = Path::new(&expanded);
        let data = fs::read(abs).await.map_err(|source| ApiError::Io {
            path: expanded.clone(),
            source,
        })?;
        let name = abs
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.bin")
            .to_string();
        Ok(Self::new(name, data))
    }

    /// Lowercased extension, empty when the name has none.
    pub fn extension(&self) -> String {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default()
    }
}

/// Guess MIME type from filename extension.
pub fn guess_mime_type(filename: &str) -> String {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_mime_type("Report.PDF"), "application/pdf");
        assert_eq!(guess_mime_type("photo.jpeg"), "image/jpeg");
        assert_eq!(guess_mime_type("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.TXT");
        std::fs::write(&path, b"hello").unwrap();

        let file = UploadFile::from_path(path.to_str().unwrap()).await.unwrap();
        assert_eq!(file.name, "notes.TXT");
        assert_eq!(file.extension(), "txt");
        assert_eq!(file.mime_type, "text/plain");
        assert_eq!(file.data, b"hello");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = UploadFile::from_path("/definitely/not/here.pdf").await.unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }
}
