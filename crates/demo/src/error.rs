//! Error types for the demo harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Server failed to start: {0}")]
    ServerStartup(String),

    #[error("{url} not reachable after {attempts} attempts")]
    Timeout {
        url: String,
        attempts: usize,
        #[source]
        last_error: Option<reqwest::Error>,
    },

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Recording failed: {0}")]
    Recording(String),

    #[error("API check failed: {0}")]
    ApiCheck(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type DemoResult<T> = Result<T, DemoError>;
