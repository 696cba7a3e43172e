//! Module state reconciliation engine.
//!
//! Decides, for each module of a project, whether its recorded enabled or
//! disabled state is kept, enabled, or disabled, and merges the result back
//! into the project's JSON configuration document.
//!
//! The public API is organised into layers:
//!
//! - **[`store`]**: load, query, and merge-write the configuration document
//! - **[`reconcile`]**: per-module decision policy and configurator resolution
//! - **[`config`]**: project root discovery and module list loading
//! - **[`commands`]**: top-level subcommand orchestration (`reconcile`, `status`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod store;
