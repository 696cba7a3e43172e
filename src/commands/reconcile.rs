//! Command: reconcile module state for one project.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, ModuleArgs};
use crate::logging::{Log, Logger, ModuleStatus};
use crate::reconcile::{Configurator, ConfiguratorResolver, Decision, GATING_MODULE};
use crate::store::StoreError;

/// Run the reconcile command.
///
/// # Errors
///
/// Returns an error if the project root or module list cannot be determined,
/// the configuration cannot be loaded, or any write fails.
pub fn run(global: &GlobalOpts, args: &ModuleArgs, log: &Logger) -> Result<()> {
    let root = crate::config::resolve_root(global.root.as_deref())?;
    let modules = crate::config::collect_modules(&args.modules, args.modules_file.as_deref())?;

    let version = option_env!("MODSTATE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("modstate {version}"));

    log.stage("Loading configuration");
    log.info(&format!("project: {}", root.display()));
    let resolver = ConfiguratorResolver::new().with_dry_run(global.dry_run);
    let configurator = resolver
        .create_configurator(&root)
        .with_context(|| format!("loading configuration for {}", root.display()))?;
    if configurator.is_noop() {
        log.warn("configuration has no modules section; leaving it untouched");
    }

    log.stage("Reconciling modules");
    let result = reconcile_modules(&configurator, &modules, global.dry_run, log);
    log.print_summary();
    result.with_context(|| format!("reconciling modules in {}", root.display()))
}

/// Configure each module in order, recording every outcome on `log`.
///
/// Stops at the first store failure; modules after it are not processed.
///
/// # Errors
///
/// Returns the [`StoreError`] of the first failed write.
pub fn reconcile_modules(
    configurator: &Configurator,
    modules: &[String],
    dry_run: bool,
    log: &dyn Log,
) -> Result<(), StoreError> {
    for module in modules {
        let decision = configurator.configure(module, log)?;
        let (status, message) = outcome(decision, dry_run);
        log.record_module(module, status, message.as_deref());
    }
    Ok(())
}

fn outcome(decision: Option<Decision>, dry_run: bool) -> (ModuleStatus, Option<String>) {
    match decision {
        None => (ModuleStatus::Skipped, Some("no modules section".to_string())),
        Some(Decision::LeaveUnchanged(state)) => {
            (ModuleStatus::Kept, Some(state.label().to_string()))
        }
        Some(Decision::Enable) if dry_run => (ModuleStatus::DryRun, Some("would enable".into())),
        Some(Decision::Disable) if dry_run => {
            (ModuleStatus::DryRun, Some("would disable".into()))
        }
        Some(Decision::Enable) => (
            ModuleStatus::Enabled,
            Some(format!("{GATING_MODULE} is enabled")),
        ),
        Some(Decision::Disable) => (ModuleStatus::Disabled, None),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::test_helpers::CaptureLog;
    use crate::reconcile::resolver::lock_store;
    use crate::reconcile::{ModuleDecisionPolicy, ModuleState};
    use crate::store::document::module_patch;
    use crate::store::writer::MockDocumentWriter;
    use crate::store::{ConfigDocument, ConfigStore, StoreErrorKind};
    use serde_json::json;
    use std::fs;
    use std::sync::{Arc, Mutex};

    fn project_with(config: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let etc = dir.path().join("app").join("etc");
        fs::create_dir_all(&etc).unwrap();
        fs::write(etc.join("config.json"), config).unwrap();
        dir
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn outcome_maps_decisions() {
        assert_eq!(
            outcome(Some(Decision::LeaveUnchanged(ModuleState::Enabled)), false),
            (ModuleStatus::Kept, Some("enabled".to_string()))
        );
        assert_eq!(outcome(Some(Decision::Disable), false).0, ModuleStatus::Disabled);
        assert_eq!(outcome(Some(Decision::Enable), false).0, ModuleStatus::Enabled);
        assert_eq!(outcome(Some(Decision::Enable), true).0, ModuleStatus::DryRun);
        assert_eq!(outcome(None, false).0, ModuleStatus::Skipped);
    }

    #[test]
    fn gating_flag_is_fixed_for_the_run() {
        let project = project_with(r#"{"modules": {}}"#);
        let resolver = ConfiguratorResolver::new();
        let configurator = resolver.create_configurator(project.path()).unwrap();

        // Enable the gating module through the shared store after resolution.
        let store = resolver.cache().get_or_load(project.path()).unwrap();
        lock_store(&store)
            .save_config(&module_patch(GATING_MODULE, json!(1)))
            .unwrap();

        let log = CaptureLog::default();
        reconcile_modules(
            &configurator,
            &names(&["Magento_InventoryElasticsearch"]),
            false,
            &log,
        )
        .unwrap();

        assert_eq!(log.modules()[0].status, ModuleStatus::Disabled);
    }

    #[test]
    fn records_one_entry_per_module() {
        let project = project_with(
            r#"{"modules": {"Magento_InventoryApi": 1, "Foo": 0}}"#,
        );
        let resolver = ConfiguratorResolver::new();
        let configurator = resolver.create_configurator(project.path()).unwrap();
        let log = CaptureLog::default();

        reconcile_modules(
            &configurator,
            &names(&["Foo", "Magento_InventoryElasticsearch", "SomeUnlistedModule"]),
            false,
            &log,
        )
        .unwrap();

        let entries = log.modules();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].status, ModuleStatus::Kept);
        assert_eq!(entries[1].status, ModuleStatus::Enabled);
        assert_eq!(entries[2].status, ModuleStatus::Disabled);
    }

    #[test]
    fn noop_configurator_skips_every_module() {
        let project = project_with(r#"{"db": {}}"#);
        let resolver = ConfiguratorResolver::new();
        let configurator = resolver.create_configurator(project.path()).unwrap();
        let log = CaptureLog::default();

        reconcile_modules(&configurator, &names(&["Foo", "Bar"]), false, &log).unwrap();

        assert!(log.modules().iter().all(|m| m.status == ModuleStatus::Skipped));
        assert_eq!(
            fs::read_to_string(project.path().join("app/etc/config.json")).unwrap(),
            r#"{"db": {}}"#
        );
    }

    #[test]
    fn first_write_failure_stops_the_run() {
        let mut writer = MockDocumentWriter::new();
        writer.expect_save().times(1).returning(|_| {
            Err(StoreError::Write {
                path: "config.json".into(),
                source: std::io::Error::other("disk full"),
            })
        });
        let mut root = serde_json::Map::new();
        root.insert("modules".to_string(), json!({}));
        let store = Arc::new(Mutex::new(ConfigStore::new(
            ConfigDocument::from_section(root),
            Box::new(writer),
        )));
        let configurator = Configurator::Policy(ModuleDecisionPolicy::new(store, false));
        let log = CaptureLog::default();

        let err = reconcile_modules(&configurator, &names(&["A", "B"]), false, &log).unwrap_err();

        assert_eq!(err.kind(), StoreErrorKind::Write);
        assert!(log.modules().is_empty());
        assert_eq!(
            log.status_lines(),
            ["    ...Disabling A module for backward compatibility"]
        );
    }
}
