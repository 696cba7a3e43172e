//! Typed error variants for configuration store operations.
//!
//! Every failure maps onto one of two kinds (see [`StoreErrorKind`]): the
//! persisted document could not be read, or the merged document could not be
//! written.  Both are fatal to the reconciliation step that triggered them;
//! callers convert to [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The persisted document is missing, corrupt, or unreadable.
    Read,
    /// The merged document could not be persisted.
    Write,
}

/// Errors that arise from loading or persisting a configuration document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The configuration file (or project directory) could not be read.
    #[error("cannot read configuration {}: {source}", .path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("corrupt configuration {}: {source}", .path.display())]
    Parse {
        /// Path of the corrupt file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file parsed, but its top level is not an object.
    #[error("corrupt configuration {}: top level must be an object", .path.display())]
    NotAnObject {
        /// Path of the offending file.
        path: PathBuf,
    },

    /// The merged document could not be written to disk.
    #[error("cannot write configuration {}: {source}", .path.display())]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The merged document could not be serialized.
    #[error("cannot serialize configuration {}: {source}", .path.display())]
    Serialize {
        /// Destination path of the document.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Classify this error as a read or a write failure.
    #[must_use]
    pub const fn kind(&self) -> StoreErrorKind {
        match self {
            Self::Read { .. } | Self::Parse { .. } | Self::NotAnObject { .. } => {
                StoreErrorKind::Read
            }
            Self::Write { .. } | Self::Serialize { .. } => StoreErrorKind::Write,
        }
    }
}
