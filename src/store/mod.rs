//! Configuration store: the cached document for one project plus the writer
//! that persists merges back to disk.
pub mod document;
pub mod error;
pub mod writer;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

pub use document::{ConfigDocument, ModulesSection, Section};
pub use error::{StoreError, StoreErrorKind};
pub use writer::{DocumentWriter, JsonFileWriter};

/// Location of the configuration document relative to the project root.
pub const CONFIG_RELATIVE_PATH: &str = "app/etc/config.json";

/// Return the configuration file path for a project root.
#[must_use]
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_RELATIVE_PATH)
}

/// A loaded configuration document bound to a writer.
///
/// Reads are served from the in-memory document; writes go through the
/// [`DocumentWriter`] and the cached document is replaced with the merged
/// result before [`save_config`](Self::save_config) returns.
pub struct ConfigStore {
    document: ConfigDocument,
    writer: Box<dyn DocumentWriter + Send>,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Bind an already-loaded document to a writer.
    #[must_use]
    pub fn new(document: ConfigDocument, writer: Box<dyn DocumentWriter + Send>) -> Self {
        Self { document, writer }
    }

    /// Load the JSON document at `path` and bind it to a [`JsonFileWriter`]
    /// targeting the same file.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::Read`] error if the file is missing,
    /// unreadable, or corrupt.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = ConfigDocument::parse(path, &text)?;
        tracing::debug!("loaded {}", path.display());
        Ok(Self::new(
            document,
            Box::new(JsonFileWriter::new(path.to_path_buf())),
        ))
    }

    /// Resolve a `/`-separated key against the cached document.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Borrow the cached document.
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Merge `patch` into the persisted document and refresh the cache.
    ///
    /// # Errors
    ///
    /// Propagates any [`StoreError`] from the writer; the cached document is
    /// left unchanged in that case.
    pub fn save_config(&mut self, patch: &Section) -> Result<(), StoreError> {
        self.document = self.writer.save(patch)?;
        Ok(())
    }
}
