use reqwest::StatusCode;
use thiserror::Error;

use super::schema::ErrorBody;

/// Message used when a failed response carries no usable `detail`.
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Connection failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Build a status error from a failed response body.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        Self::Status {
            status,
            message: detail_message(body),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Extract the server's `detail`, falling back to the generic message.
fn detail_message(body: &[u8]) -> String {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);
    match detail {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        // Validation errors arrive as a structured list
        Some(v) if !v.is_null() => v.to_string(),
        _ => GENERIC_FAILURE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_server_detail() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, br#"{"detail":"Document not found"}"#);
        assert_eq!(err.to_string(), "Document not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn falls_back_without_detail() {
        for body in [&b"<html>bad gateway</html>"[..], b"{}", b"", br#"{"detail":null}"#] {
            let err = ApiError::from_status(StatusCode::BAD_GATEWAY, body);
            assert_eq!(err.to_string(), GENERIC_FAILURE);
        }
    }

    #[test]
    fn structured_detail_is_stringified() {
        let err = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":[{"loc":["body","title"],"msg":"field required"}]}"#,
        );
        assert!(err.to_string().contains("field required"));
    }
}
