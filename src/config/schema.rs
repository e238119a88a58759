use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Remote document API location and endpoint paths.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ApiConfig {
    /// Scheme and host of the API, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EndpointsConfig {
    #[serde(default = "default_documents_path")]
    pub documents: String,
    #[serde(default = "default_analytics_path")]
    pub analytics: String,
    #[serde(default = "default_upload_path")]
    pub upload: String,
    #[serde(default = "default_upload_analyze_path")]
    pub upload_analyze: String,
}

/// Timings and limits of the interactive surfaces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UiConfig {
    /// How long a notification stays visible.
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    /// Length of the leaving phase before a notification is removed.
    #[serde(default = "default_toast_exit_ms")]
    pub toast_exit_ms: u64,
    /// Quiet period after the last search keystroke before fetching.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Number of tags shown in the tags chart.
    #[serde(default = "default_top_tags_limit")]
    pub top_tags_limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UploadConfig {
    /// Upload through the analyze endpoint by default.
    #[serde(default)]
    pub analyze: bool,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_documents_path() -> String {
    "/api/documents".to_string()
}
fn default_analytics_path() -> String {
    "/api/analytics/stats".to_string()
}
fn default_upload_path() -> String {
    "/api/documents/upload".to_string()
}
fn default_upload_analyze_path() -> String {
    "/api/documents/analyze-upload".to_string()
}
fn default_toast_duration_ms() -> u64 {
    3000
}
fn default_toast_exit_ms() -> u64 {
    200
}
fn default_search_debounce_ms() -> u64 {
    300
}
fn default_top_tags_limit() -> usize {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            documents: default_documents_path(),
            analytics: default_analytics_path(),
            upload: default_upload_path(),
            upload_analyze: default_upload_analyze_path(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration_ms(),
            toast_exit_ms: default_toast_exit_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            top_tags_limit: default_top_tags_limit(),
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}
