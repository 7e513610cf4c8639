use std::path::PathBuf;

use thiserror::Error;

use crate::readers::ReaderState;

/// Result type local to fixedfile-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] fixedfile_core::Error),

    #[error("file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no current record")]
    NoCurrentRecord,

    #[error("cannot {op} a reader in state {state:?}")]
    InvalidState { op: &'static str, state: ReaderState },
}
