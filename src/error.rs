//! Domain-specific error types for the reconciliation engine.
//!
//! Internal modules return typed errors ([`ConfigError`], [`StoreError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ModstateError
//! ├── Config(ConfigError)  : module list files
//! ├── Store(StoreError)    : reading / persisting the project configuration
//! ├── RootNotFound         : no project root could be determined
//! └── NoModules            : nothing to reconcile
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub use crate::store::{StoreError, StoreErrorKind};

/// Top-level error type for the engine.
#[derive(Error, Debug)]
pub enum ModstateError {
    /// Error loading the tool's own configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error reading or writing the project's configuration store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// No project root was given and none could be detected.
    #[error("cannot determine project root. Use --root or set MODSTATE_ROOT env var")]
    RootNotFound,

    /// No module names were supplied.
    #[error("no modules to reconcile: pass module names or --modules-file")]
    NoModules,
}

/// Errors that arise from loading a module list file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the expected layout.
    #[error("Invalid TOML in {}: {source}", .path.display())]
    InvalidSyntax {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The file lists an empty module name.
    #[error("Empty module name in {}", .path.display())]
    EmptyModuleName {
        /// Path to the offending file.
        path: PathBuf,
    },
}
