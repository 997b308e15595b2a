use std::{error::Error as _, path::PathBuf};

use thiserror::Error;

/// Errors that abort the normalize stage. Nothing is written when one of these happens.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("failed to serialize customer documents: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reading the handoff artifact. These abort the load stage.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in customer documents: {0}")]
    Json(#[from] serde_json::Error),

    #[error("customer documents must be a top-level JSON array")]
    NotAnArray,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid auth header {0:?}, expected `Name: value`")]
    InvalidAuthHeader(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// A network level failure for a single request. Never aborts a run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{detail}")]
pub struct TransportError {
    pub detail: String,
}

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Keeps the whole cause chain as `outer: inner: root`, reqwest's own message rarely says what
/// actually went wrong.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let mut detail = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let msg = cause.to_string();
            if !detail.ends_with(&msg) {
                detail.push_str(": ");
                detail.push_str(&msg);
            }
            source = cause.source();
        }

        Self::new(detail)
    }
}

#[derive(Error, Debug)]
pub enum BizseedError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}
