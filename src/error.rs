//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by the dashboard core and its server plumbing.
///
/// None of these are fatal to the UI: callers report them and carry on.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("unexpected document: {0}")]
    InvalidDocument(String),

    #[error("at least one page is required")]
    LastPage,

    #[error("no page with id {0}")]
    UnknownPage(String),

    #[error("no widget with id {0}")]
    UnknownWidget(String),

    #[error("not connected to the control server")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, DashError>;
