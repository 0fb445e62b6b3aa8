use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid token key: {key}")]
    InvalidKey { key: String },

    #[error("Root path {path:?} is invalid: {error}")]
    RootPathInvalid {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token store lock poisoned")]
    Poisoned,
}
