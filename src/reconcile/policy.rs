//! Decision policy for a single module: keep, cascade-enable, or disable.
use super::resolver::{SharedStore, lock_store};
use super::state::ModuleState;
use crate::logging::Log;
use crate::store::StoreError;
use crate::store::document::{MODULES_SECTION, PATH_SEPARATOR, module_patch};

/// Module whose enabled state gates the cascade-enable rule.
pub const GATING_MODULE: &str = "Magento_InventoryApi";

/// Modules that are enabled automatically when [`GATING_MODULE`] is enabled
/// and they have no recorded state yet.
pub const DEPENDENT_MODULES: [&str; 4] = [
    "Magento_InventoryDistanceBasedSourceSelection",
    "Magento_InventoryDistanceBasedSourceSelectionAdminUi",
    "Magento_InventoryDistanceBasedSourceSelectionApi",
    "Magento_InventoryElasticsearch",
];

/// Return `true` if `module` is eligible for cascade-enabling.
#[must_use]
pub fn is_dependent_module(module: &str) -> bool {
    DEPENDENT_MODULES.contains(&module)
}

/// Document key of a module's entry (`modules/<name>`).
#[must_use]
pub fn module_key(module: &str) -> String {
    format!("{MODULES_SECTION}{PATH_SEPARATOR}{module}")
}

/// Outcome of evaluating the policy for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The module already has a recorded state, which is kept.
    LeaveUnchanged(ModuleState),
    /// The module is enabled because the gating module is enabled.
    Enable,
    /// The module is disabled for backward compatibility.
    Disable,
}

impl Decision {
    /// Evaluate the rules in priority order: an existing entry wins, then
    /// cascade-enable, then default-disable.
    #[must_use]
    pub fn decide(current: ModuleState, gating_enabled: bool, module: &str) -> Self {
        if current != ModuleState::Unset {
            Self::LeaveUnchanged(current)
        } else if gating_enabled && is_dependent_module(module) {
            Self::Enable
        } else {
            Self::Disable
        }
    }

    /// State to persist, or `None` when nothing is written.
    #[must_use]
    pub const fn target_state(self) -> Option<ModuleState> {
        match self {
            Self::LeaveUnchanged(_) => None,
            Self::Enable => Some(ModuleState::Enabled),
            Self::Disable => Some(ModuleState::Disabled),
        }
    }

    /// Diagnostic line describing the decision for `module`.
    #[must_use]
    pub fn message(self, module: &str) -> String {
        match self {
            Self::LeaveUnchanged(state) => format!(
                "    ...Keep {module} module {} as in current configuration",
                state.label()
            ),
            Self::Enable => format!(
                "    ...Enabling {module} module because module {GATING_MODULE} is enabled."
            ),
            Self::Disable => {
                format!("    ...Disabling {module} module for backward compatibility")
            }
        }
    }
}

/// Reconciles modules against one project's configuration store.
///
/// The gating flag is captured at construction and never re-read, so writes
/// made by earlier `configure` calls cannot change later decisions.
#[derive(Debug)]
pub struct ModuleDecisionPolicy {
    store: SharedStore,
    gating_enabled: bool,
    dry_run: bool,
}

impl ModuleDecisionPolicy {
    /// Create a policy bound to `store`.
    #[must_use]
    pub const fn new(store: SharedStore, gating_enabled: bool) -> Self {
        Self {
            store,
            gating_enabled,
            dry_run: false,
        }
    }

    /// When `dry_run` is set, decisions are reported but never persisted.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether the gating module was enabled when this policy was resolved.
    #[must_use]
    pub const fn gating_enabled(&self) -> bool {
        self.gating_enabled
    }

    /// Decide the state of `module` and persist it if it has none yet.
    ///
    /// The store lock is held across the read, the decision and the write.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    pub fn configure(&self, module: &str, log: &dyn Log) -> Result<Decision, StoreError> {
        let mut store = lock_store(&self.store);
        let current = ModuleState::from_value(store.get(&module_key(module)));
        let decision = Decision::decide(current, self.gating_enabled, module);
        log.status(&decision.message(module));

        if let Some(target) = decision.target_state()
            && let Some(value) = target.to_value()
        {
            if self.dry_run {
                log.dry_run(&format!("would {} {module}", target.verb()));
            } else {
                store.save_config(&module_patch(module, value))?;
            }
        }
        Ok(decision)
    }
}
