//! docdesk: document management front end for a remote REST API.
//!
//! Typed API client, formatting and view helpers, the analytics dashboard
//! and the document manager view-model. Rendering is a separate step over
//! typed state so every handler can run headless.

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod observability;
pub mod ui;

pub use api::{ApiError, DocumentApi, HttpDocumentApi};
pub use app::DocumentManager;
pub use config::Config;
pub use dashboard::Dashboard;
