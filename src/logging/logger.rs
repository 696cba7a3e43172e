//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use super::types::{Log, ModuleEntry, ModuleStatus};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger backed by the global `tracing` subscriber.
///
/// All messages also reach the persistent log file at
/// `$XDG_CACHE_HOME/modstate/<command>.log` through the file layer installed
/// by [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug)]
pub struct Logger {
    modules: Mutex<Vec<ModuleEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary; the file
    /// itself is created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            modules: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded module entries.
    #[must_use]
    pub fn module_entries(&self) -> Vec<ModuleEntry> {
        self.modules
            .lock()
            .map_or_else(|_| vec![], |guard| guard.clone())
    }

    /// Count recorded modules with the given status.
    #[must_use]
    pub fn count(&self, status: ModuleStatus) -> usize {
        self.modules.lock().map_or(0, |guard| {
            guard.iter().filter(|m| m.status == status).count()
        })
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "modstate::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a reconciliation decision line; routed to stderr on the console.
    pub fn status(&self, msg: &str) {
        tracing::info!(target: "modstate::status", "{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "modstate::dry_run", "{msg}");
    }

    /// Record a module outcome for the summary.
    pub fn record_module(&self, name: &str, status: ModuleStatus, message: Option<&str>) {
        self.modules
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ModuleEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
    }

    /// Print the summary of all recorded modules.
    pub fn print_summary(&self) {
        let modules = self.module_entries();
        if modules.is_empty() {
            return;
        }

        self.stage("Summary");

        for module in &modules {
            let (icon, color) = match module.status {
                ModuleStatus::Kept => ("·", "\x1b[2m"),
                ModuleStatus::Enabled => ("✓", "\x1b[32m"),
                ModuleStatus::Disabled => ("○", "\x1b[33m"),
                ModuleStatus::DryRun => ("~", "\x1b[37m"),
                ModuleStatus::Skipped => ("-", "\x1b[2m"),
            };

            let suffix = module
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", module.name));
        }

        let kept = self.count(ModuleStatus::Kept);
        let enabled = self.count(ModuleStatus::Enabled);
        let disabled = self.count(ModuleStatus::Disabled);
        let dry_run = self.count(ModuleStatus::DryRun);
        let skipped = self.count(ModuleStatus::Skipped);
        self.info(&format!(
            "{} modules: \x1b[2m{kept} kept\x1b[0m, \x1b[32m{enabled} enabled\x1b[0m, \x1b[33m{disabled} disabled\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[2m{skipped} skipped\x1b[0m",
            modules.len()
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, status, debug, warn, error, dry_run);

    fn record_module(&self, name: &str, status: ModuleStatus, message: Option<&str>) {
        self.record_module(name, status, message);
    }
}
