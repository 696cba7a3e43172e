//! Command: report recorded module state without changing anything.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, ModuleArgs};
use crate::logging::Logger;
use crate::reconcile::policy::module_key;
use crate::reconcile::resolver::lock_store;
use crate::reconcile::{DocumentCache, GATING_MODULE, ModuleState};
use crate::store::{ConfigStore, ModulesSection};

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the project root or module list cannot be determined
/// or the configuration cannot be loaded.
pub fn run(global: &GlobalOpts, args: &ModuleArgs, log: &Logger) -> Result<()> {
    let root = crate::config::resolve_root(global.root.as_deref())?;
    let modules = crate::config::collect_modules(&args.modules, args.modules_file.as_deref())?;

    let cache = DocumentCache::new();
    let shared = cache
        .get_or_load(&root)
        .with_context(|| format!("loading configuration for {}", root.display()))?;
    let store = lock_store(&shared);

    log.stage("Module status");
    log.info(&format!("project: {}", root.display()));
    if matches!(store.document().modules(), ModulesSection::Uninitialized) {
        log.warn("configuration has no modules section; reconcile would change nothing");
    }
    log.info(&format!(
        "gating module {GATING_MODULE}: {}",
        state_word(state_of(&store, GATING_MODULE))
    ));
    for (module, state) in describe(&store, &modules) {
        log.info(&format!("{module}: {}", state_word(state)));
    }
    Ok(())
}

/// Recorded state of each module, in the order given.
#[must_use]
pub fn describe<'a>(store: &ConfigStore, modules: &'a [String]) -> Vec<(&'a str, ModuleState)> {
    modules
        .iter()
        .map(|m| (m.as_str(), state_of(store, m)))
        .collect()
}

fn state_of(store: &ConfigStore, module: &str) -> ModuleState {
    ModuleState::from_value(store.get(&module_key(module)))
}

const fn state_word(state: ModuleState) -> &'static str {
    match state {
        ModuleState::Unset => "unset",
        ModuleState::Enabled => "enabled",
        ModuleState::Disabled => "disabled",
    }
}
