//! Top-level subcommand orchestration.
pub mod reconcile;
pub mod status;
pub mod version;
