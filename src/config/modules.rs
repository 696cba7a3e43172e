//! Module list files: which modules a run should reconcile.
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::toml_loader::load_config;
use crate::error::ConfigError;

/// Contents of a module list file.
///
/// ```toml
/// modules = ["Magento_InventoryElasticsearch", "Magento_InventoryApi"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleList {
    /// Module names, in reconciliation order.
    #[serde(default)]
    pub modules: Vec<String>,
}

/// Load the module names listed in `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it lists an
/// empty name.
pub fn load(path: &Path) -> Result<Vec<String>, ConfigError> {
    let list: ModuleList = load_config(path)?;
    if list.modules.iter().any(|m| m.trim().is_empty()) {
        return Err(ConfigError::EmptyModuleName {
            path: path.to_path_buf(),
        });
    }
    Ok(list.modules)
}

/// Combine command-line names with file names, dropping duplicates while
/// keeping first-seen order.
#[must_use]
pub fn merge_names(cli: &[String], file: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    cli.iter()
        .cloned()
        .chain(file)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
