//! The tool's own configuration: module list files and project root
//! resolution.
pub mod modules;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use crate::error::ModstateError;
use crate::store::CONFIG_RELATIVE_PATH;

/// Environment variable naming the project root when `--root` is absent.
pub const ROOT_ENV_VAR: &str = "MODSTATE_ROOT";

/// Resolve the project root from an explicit path, the environment, or the
/// current directory.
///
/// The current directory is accepted only if it contains the directory that
/// holds the configuration file (`app/etc`).
///
/// # Errors
///
/// Returns [`ModstateError::RootNotFound`] if no candidate applies.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, ModstateError> {
    root_from(
        explicit,
        std::env::var(ROOT_ENV_VAR).ok(),
        std::env::current_dir().ok(),
    )
}

fn root_from(
    explicit: Option<&Path>,
    env_root: Option<String>,
    cwd: Option<PathBuf>,
) -> Result<PathBuf, ModstateError> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    if let Some(root) = env_root
        && !root.is_empty()
    {
        return Ok(PathBuf::from(root));
    }

    if let Some(cwd) = cwd
        && looks_like_project(&cwd)
    {
        return Ok(cwd);
    }

    Err(ModstateError::RootNotFound)
}

fn looks_like_project(dir: &Path) -> bool {
    Path::new(CONFIG_RELATIVE_PATH)
        .parent()
        .is_some_and(|etc| dir.join(etc).is_dir())
}

/// Build the final list of module names from positional arguments and an
/// optional module list file.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the resulting list is
/// empty.
pub fn collect_modules(cli: &[String], file: Option<&Path>) -> Result<Vec<String>, ModstateError> {
    let from_file = match file {
        Some(path) => modules::load(path)?,
        None => Vec::new(),
    };
    let names = modules::merge_names(cli, from_file);
    if names.is_empty() {
        return Err(ModstateError::NoModules);
    }
    Ok(names)
}
