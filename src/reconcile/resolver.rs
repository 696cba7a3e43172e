//! Per-project configurator resolution and the document cache behind it.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Configurator;
use super::policy::{GATING_MODULE, ModuleDecisionPolicy};
use super::state::is_truthy;
use crate::store::{ConfigStore, ModulesSection, Section, StoreError, config_path};

/// A configuration store shared by every configurator resolved for the same
/// project.
pub type SharedStore = Arc<Mutex<ConfigStore>>;

/// Lock a shared store, recovering the guard if a previous holder panicked.
pub fn lock_store(store: &SharedStore) -> MutexGuard<'_, ConfigStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Loaded configuration stores keyed by canonical project path.
///
/// Entries are created on first access and live as long as the cache; they
/// are never re-read from disk.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: Mutex<HashMap<PathBuf, SharedStore>>,
}

impl DocumentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the store for `project_root`, loading it on first access.
    ///
    /// The cache key is the symlink-resolved project path, so different
    /// spellings of the same directory share one store.
    ///
    /// # Errors
    ///
    /// Returns a read error if the project directory cannot be resolved or
    /// its configuration file cannot be loaded.
    pub fn get_or_load(&self, project_root: &Path) -> Result<SharedStore, StoreError> {
        let key = dunce::canonicalize(project_root).map_err(|source| StoreError::Read {
            path: project_root.to_path_buf(),
            source,
        })?;

        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = entries.get(&key) {
            tracing::debug!("reusing cached configuration for {}", key.display());
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(Mutex::new(ConfigStore::open(&config_path(&key))?));
        entries.insert(key, Arc::clone(&store));
        Ok(store)
    }

    /// Number of projects currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return `true` if no project has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the right [`Configurator`] for a project.
#[derive(Debug, Default)]
pub struct ConfiguratorResolver {
    cache: DocumentCache,
    dry_run: bool,
}

impl ConfiguratorResolver {
    /// Create a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve policies that report decisions without persisting them.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The document cache owned by this resolver.
    #[must_use]
    pub const fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Return the configurator for the project at `project_root`.
    ///
    /// A document without a `modules` mapping yields [`Configurator::NoOp`].
    /// Otherwise the gating flag is read once from the current document and
    /// baked into the returned policy.
    ///
    /// # Errors
    ///
    /// Returns a read error if the configuration cannot be loaded.
    pub fn create_configurator(&self, project_root: &Path) -> Result<Configurator, StoreError> {
        let store = self.cache.get_or_load(project_root)?;
        let gating_enabled = match lock_store(&store).document().modules() {
            ModulesSection::Uninitialized => {
                tracing::debug!(
                    "{} has no modules section; reconciliation skipped",
                    project_root.display()
                );
                return Ok(Configurator::NoOp);
            }
            ModulesSection::Ready(modules) => gating_flag(modules),
        };
        tracing::debug!("{GATING_MODULE} enabled: {gating_enabled}");
        Ok(Configurator::Policy(
            ModuleDecisionPolicy::new(store, gating_enabled).with_dry_run(self.dry_run),
        ))
    }
}

/// Look up the gating module in the modules section; `false` if absent.
fn gating_flag(modules: &Section) -> bool {
    modules.get(GATING_MODULE).is_some_and(is_truthy)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::fs;

    fn project_with(config: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let etc = dir.path().join("app").join("etc");
        fs::create_dir_all(&etc).unwrap();
        fs::write(etc.join("config.json"), config).unwrap();
        dir
    }

    fn modules(value: Value) -> Section {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn gating_flag_defaults_to_false() {
        assert!(!gating_flag(&modules(json!({}))));
        assert!(!gating_flag(&modules(json!({"Foo": 1}))));
    }

    #[test]
    fn gating_flag_follows_gating_entry() {
        assert!(gating_flag(&modules(json!({"Magento_InventoryApi": 1}))));
        assert!(!gating_flag(&modules(json!({"Magento_InventoryApi": 0}))));
        assert!(!gating_flag(&modules(json!({"Magento_InventoryApi": null}))));
    }

    #[test]
    fn missing_modules_section_yields_noop() {
        let project = project_with(r#"{"db": {"host": "localhost"}}"#);
        let resolver = ConfiguratorResolver::new();
        let configurator = resolver.create_configurator(project.path()).unwrap();
        assert!(configurator.is_noop());
    }

    #[test]
    fn modules_section_yields_policy_with_gating_flag() {
        let project = project_with(r#"{"modules": {"Magento_InventoryApi": 1}}"#);
        let resolver = ConfiguratorResolver::new();
        let configurator = resolver.create_configurator(project.path()).unwrap();
        assert!(
            matches!(&configurator, Configurator::Policy(p) if p.gating_enabled()),
            "expected policy with gating enabled, got {configurator:?}"
        );
    }

    #[test]
    fn missing_project_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfiguratorResolver::new()
            .create_configurator(&dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }

    #[test]
    fn cache_is_keyed_by_canonical_path() {
        let project = project_with(r#"{"modules": {}}"#);
        let nested = project.path().join("app");
        let resolver = ConfiguratorResolver::new();

        resolver.create_configurator(project.path()).unwrap();
        resolver.create_configurator(&nested.join("..")).unwrap();
        assert_eq!(resolver.cache().len(), 1);
    }

    #[test]
    fn cache_does_not_reread_disk() {
        let project = project_with(r#"{"modules": {}}"#);
        let cache = DocumentCache::new();
        let first = cache.get_or_load(project.path()).unwrap();

        fs::write(
            project.path().join("app/etc/config.json"),
            r#"{"modules": {"Foo": 1}}"#,
        )
        .unwrap();
        let second = cache.get_or_load(project.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(lock_store(&second).get("modules/Foo"), None);
    }
}
