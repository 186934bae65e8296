//! Runtime configuration resolved from flags and the environment.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Environment variable consulted when `--map` is not given.
pub const MAP_PATH_ENV: &str = "TILEPATH_MAP";

/// Resolve the map document path.
///
/// An explicit `--map` wins; otherwise [`MAP_PATH_ENV`] is used.
pub fn resolve_map_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env::var_os(MAP_PATH_ENV) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => bail!("no tile map given; pass --map <PATH> or set {MAP_PATH_ENV}"),
    }
}
