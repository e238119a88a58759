//! Configuration loading.
//!
//! A TOML file under the platform config directory, overridable by path,
//! with `DOCDESK_API_URL` taking precedence over `api.base_url`.

pub mod schema;

pub use schema::{ApiConfig, Config, EndpointsConfig, UiConfig, UploadConfig};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "DOCDESK_API_URL";

const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "docdesk").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from an explicit path or the default location, then apply
    /// environment overrides. A missing file yields the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(PathBuf::from(shellexpand::tilde(p).to_string())),
            None => Self::default_path(),
        };

        let mut config = match path {
            Some(ref p) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api = config.api.with_base_url(url.trim());
            }
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(raw).context("Failed to parse config")?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema of the config file.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("Failed to serialize config schema")
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl UiConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::ffi::OsString;

    // Tests that touch process environment run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets or clears a variable and restores the old value on drop.
    struct EnvVar {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVar {
        fn set(key: &'static str, value: Option<&str>) -> Self {
            let previous = std::env::var_os(key);
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
            Self { key, previous }
        }
    }

    impl Drop for EnvVar {
        fn drop(&mut self) {
            match &self.previous {
                Some(v) => std::env::set_var(self.key, v),
                None => std::env::remove_var(self.key),
            }
        }
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let _lock = ENV_LOCK.lock();
        let _url = EnvVar::set(API_URL_ENV, None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_reads_given_path() {
        let _lock = ENV_LOCK.lock();
        let _url = EnvVar::set(API_URL_ENV, None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://files.local:9000/\"\n").unwrap();

        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.api.base_url, "http://files.local:9000");
    }

    #[test]
    fn load_expands_tilde() {
        let _lock = ENV_LOCK.lock();
        let _url = EnvVar::set(API_URL_ENV, None);
        let home = tempfile::tempdir().unwrap();
        let _home = EnvVar::set("HOME", home.path().to_str());
        std::fs::write(home.path().join("docdesk.toml"), "[upload]\nanalyze = true\n").unwrap();

        let config = Config::load(Some("~/docdesk.toml")).unwrap();
        assert!(config.upload.analyze);
    }

    #[test]
    fn env_url_overrides_file() {
        let _lock = ENV_LOCK.lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://from-file:8000\"\n").unwrap();
        let _url = EnvVar::set(API_URL_ENV, Some(" https://from-env.example.com/ "));

        let config = Config::load(path.to_str()).unwrap();
        assert_eq!(config.api.base_url, "https://from-env.example.com");
        assert_eq!(config.api.endpoints.documents, "/api/documents");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.endpoints.upload_analyze, "/api/documents/analyze-upload");
        assert_eq!(config.ui.search_debounce(), Duration::from_millis(300));
        assert!(!config.upload.analyze);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_toml(
            r#"
            [api]
            base_url = "https://docs.example.com/"

            [ui]
            top_tags_limit = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://docs.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.endpoints.documents, "/api/documents");
        assert_eq!(config.ui.top_tags_limit, 5);
        assert_eq!(config.ui.toast_duration_ms, 3000);
    }

    #[test]
    fn loads_from_file_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.upload.analyze = true;
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert!(loaded.upload.analyze);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = Config::json_schema().unwrap();
        assert!(schema.contains("search_debounce_ms"));
        assert!(schema.contains("base_url"));
    }
}
