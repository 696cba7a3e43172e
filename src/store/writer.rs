//! Durable persistence of partial-document merges.
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use super::document::{ConfigDocument, Section};
use super::error::StoreError;

/// Persists partial documents by merging them into durable storage.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentWriter {
    /// Merge `patch` into the persisted document and write the result.
    ///
    /// Returns the merged document as persisted, so the caller can refresh
    /// its cached copy.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the current file cannot be read or the
    /// merged document cannot be written.  On error the persisted file is
    /// left exactly as it was.
    fn save(&self, patch: &Section) -> Result<ConfigDocument, StoreError>;
}

/// Writes a JSON configuration file atomically (temp file + rename).
///
/// The file is re-read immediately before each merge, so keys added by other
/// processes since the document was cached also survive.
#[derive(Debug, Clone)]
pub struct JsonFileWriter {
    path: PathBuf,
}

impl JsonFileWriter {
    /// Create a writer for the configuration file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_base(&self) -> Result<ConfigDocument, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => ConfigDocument::parse(&self.path, &text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfigDocument::default()),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl DocumentWriter for JsonFileWriter {
    fn save(&self, patch: &Section) -> Result<ConfigDocument, StoreError> {
        let mut merged = self.read_base()?;
        merged.merge(patch);
        let text = merged.to_json().map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        atomic_write(&self.path, text.as_bytes())?;
        tracing::debug!("wrote {}", self.path.display());
        Ok(merged)
    }
}

/// Write data to a file atomically using a temp sibling and rename.
///
/// The parent directory must already exist.
fn atomic_write(target: &Path, data: &[u8]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: target.to_path_buf(),
        source,
    };
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(data).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;
    Ok(())
}
