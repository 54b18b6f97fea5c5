use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DedupError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid input pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid record in '{path}': {message}")]
    InvalidRecord { path: PathBuf, message: String },

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl DedupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DedupError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        DedupError::Json {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the content of a single input file.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, DedupError::Json { .. } | DedupError::InvalidRecord { .. })
    }
}

pub type Result<T> = std::result::Result<T, DedupError>;
