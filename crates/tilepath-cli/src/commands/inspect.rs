//! `inspect` subcommand: describe a tile map.

use std::path::Path;

use anyhow::{Context, Result};

use tilepath_lib::load_tile_map;

use tilepath_cli::config::resolve_map_path;
use tilepath_cli::output::{MapInfo, OutputFormat};

pub fn handle_inspect(map_arg: Option<&Path>, format: OutputFormat) -> Result<()> {
    let map_path = resolve_map_path(map_arg)?;
    let map = load_tile_map(&map_path)
        .with_context(|| format!("failed to load tile map from {}", map_path.display()))?;
    format.render_map_info(&MapInfo::from_map(&map))
}
