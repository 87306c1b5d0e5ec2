//! Error types shared by the library and the CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::edit::ValidationError;

#[derive(Debug, Error)]
pub enum DopeError {
    #[error("File System error: {0}")]
    Io(#[from] io::Error),
    #[error("(De)Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error in '{path}': {reason}")]
    Config { path: PathBuf, reason: String },
    #[error("Vault directory does not exist or is not a directory: {0}")]
    VaultNotFound(PathBuf),
    /// A `#edu/` tag with the wrong number of components.
    ///
    /// Unlike task tags, lesson tags are never repaired with defaults.
    #[error("Tag `{tag}` in `{note}`, line {line} has wrong number of components (got {found}, expected {expected})")]
    MalformedLessonTag {
        tag: String,
        note: String,
        line: usize,
        found: usize,
        expected: usize,
    },
    #[error("Edit rejected: {0}")]
    Edit(#[from] ValidationError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A bug in dope itself, not a problem in the notes.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DopeError>;
