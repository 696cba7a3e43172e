//! Core logging types: module entries, outcome status, and the [`Log`] trait.

/// Reconciliation outcome for one module, kept for summary reporting.
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    /// Module name.
    pub name: String,
    /// Outcome of reconciling the module.
    pub status: ModuleStatus,
    /// Optional detail message (e.g. the kept state).
    pub message: Option<String>,
}

/// Outcome of reconciling one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    /// The module already had a recorded state, which was kept.
    Kept,
    /// The module was enabled.
    Enabled,
    /// The module was disabled.
    Disabled,
    /// A change was decided but not written (dry run).
    DryRun,
    /// The project has no module registry; nothing was decided.
    Skipped,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) sends everything through `tracing`;
/// tests substitute capturing implementations so decision output can be
/// asserted without a global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a reconciliation decision line (status stream).
    fn status(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
    /// Record a module outcome for the summary.
    fn record_module(&self, name: &str, status: ModuleStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_status_equality() {
        assert_eq!(ModuleStatus::Kept, ModuleStatus::Kept);
        assert_ne!(ModuleStatus::Enabled, ModuleStatus::Disabled);
        assert_ne!(ModuleStatus::DryRun, ModuleStatus::Skipped);
    }

    #[test]
    fn module_entry_clone() {
        let entry = ModuleEntry {
            name: "Magento_InventoryApi".to_string(),
            status: ModuleStatus::Kept,
            message: Some("enabled".to_string()),
        };
        let cloned = entry.clone();
        assert_eq!(cloned.name, entry.name);
        assert_eq!(cloned.status, entry.status);
        assert_eq!(cloned.message, entry.message);
    }
}
