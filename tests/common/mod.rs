// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project with an `app/etc/config.json`
// document, plus a capturing `Log` so decision lines can be asserted.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use modstate_cli::logging::{Log, ModuleEntry, ModuleStatus};
use modstate_cli::store::config_path;

/// An isolated project backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestProject {
    /// Temporary directory acting as the project root.
    pub root: tempfile::TempDir,
}

impl TestProject {
    /// Create a project whose configuration document is `config`.
    pub fn with_config(config: &str) -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let path = config_path(root.path());
        std::fs::create_dir_all(path.parent().expect("config parent")).expect("create app/etc");
        std::fs::write(&path, config).expect("write config.json");
        Self { root }
    }

    /// Create a project with an `app/etc` directory but no configuration file.
    pub fn without_config() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("app").join("etc")).expect("create app/etc");
        Self { root }
    }

    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the configuration document.
    pub fn config_file(&self) -> PathBuf {
        config_path(self.root.path())
    }

    /// Raw text of the configuration document.
    pub fn config_text(&self) -> String {
        std::fs::read_to_string(self.config_file()).expect("read config.json")
    }

    /// Parsed configuration document.
    pub fn config_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.config_text()).expect("parse config.json")
    }
}

/// A [`Log`] that records decision lines, dry-run lines, and module outcomes.
#[derive(Default)]
pub struct RecordingLog {
    status: Mutex<Vec<String>>,
    dry_run: Mutex<Vec<String>>,
    modules: Mutex<Vec<ModuleEntry>>,
}

impl RecordingLog {
    /// Decision lines in emission order.
    pub fn status_lines(&self) -> Vec<String> {
        self.status.lock().expect("status lock").clone()
    }

    /// Dry-run lines joined with newlines, in emission order.
    pub fn dry_run_text(&self) -> String {
        self.dry_run.lock().expect("dry-run lock").join("\n")
    }

    /// Recorded outcome statuses, in order.
    pub fn statuses(&self) -> Vec<ModuleStatus> {
        self.modules
            .lock()
            .expect("modules lock")
            .iter()
            .map(|m| m.status)
            .collect()
    }
}

impl Log for RecordingLog {
    fn stage(&self, _msg: &str) {}
    fn info(&self, _msg: &str) {}
    fn status(&self, msg: &str) {
        self.status.lock().expect("status lock").push(msg.to_string());
    }
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn dry_run(&self, msg: &str) {
        self.dry_run.lock().expect("dry-run lock").push(msg.to_string());
    }
    fn record_module(&self, name: &str, status: ModuleStatus, message: Option<&str>) {
        self.modules.lock().expect("modules lock").push(ModuleEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }
}

/// Convert string literals into owned module names.
pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}
