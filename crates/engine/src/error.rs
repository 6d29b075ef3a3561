use std::{io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Request-level failures. Any of these aborts the run before a single
/// file is touched.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("directory not found or unreadable: {}", path.display())]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: Option<io::Error>,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AssignError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AssignError::InvalidInput(msg.into())
    }
}

/// Why a single file could not be stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Permission denied, file vanished, or any other I/O error.
    FileAccess,
    /// The filesystem cannot store one of the attributes.
    UnsupportedAttribute,
}
