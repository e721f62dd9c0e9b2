use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("input directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("malformed source {file}: {reason}")]
    MalformedSource { file: String, reason: String },

    #[error("invalid identifier `{identifier}` in {file}: {reason}")]
    InvalidIdentifier {
        file: String,
        identifier: String,
        reason: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("io error at {}: {source}", path.display())]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tracing initialization failed: {0}")]
    Tracing(String),

    #[error("{failed} source file(s) failed to convert")]
    BatchFailed { failed: usize },
}

impl SeedError {
    pub fn malformed(file: impl Into<String>, reason: impl Into<String>) -> Self {
        SeedError::MalformedSource {
            file: file.into(),
            reason: reason.into(),
        }
    }

    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SeedError::IoAt {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;
