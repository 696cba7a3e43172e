//! Module state reconciliation: decide, per module, whether to keep, enable,
//! or disable it, and persist the result.
//!
//! Callers obtain a [`Configurator`] from a [`ConfiguratorResolver`] and call
//! [`Configurator::configure`] once per module of interest.
pub mod policy;
pub mod resolver;
pub mod state;

pub use policy::{DEPENDENT_MODULES, Decision, GATING_MODULE, ModuleDecisionPolicy};
pub use resolver::{ConfiguratorResolver, DocumentCache, SharedStore};
pub use state::ModuleState;

use crate::logging::Log;
use crate::store::StoreError;

/// The configurator bound to one project.
#[derive(Debug)]
pub enum Configurator {
    /// The project has a module registry; decisions are made and persisted.
    Policy(ModuleDecisionPolicy),
    /// The project has no module registry yet; every call is a no-op.
    NoOp,
}

impl Configurator {
    /// Reconcile a single module.
    ///
    /// Returns the decision taken, or `None` for [`Configurator::NoOp`].
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if persisting the decision fails.
    pub fn configure(&self, module: &str, log: &dyn Log) -> Result<Option<Decision>, StoreError> {
        match self {
            Self::Policy(policy) => policy.configure(module, log).map(Some),
            Self::NoOp => {
                log.debug(&format!("no modules section; leaving {module} untouched"));
                Ok(None)
            }
        }
    }

    /// Return `true` for the no-op variant.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}
