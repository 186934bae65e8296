//! Output formatting for route and map rendering.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use tilepath_lib::{
    render_grid, Orientation, PathFinder, RouteRenderMode, RouteSummary, TerrainRule, TileId,
    TileMap, TileMapSource,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable step list.
    #[default]
    Text,
    /// Single line of `x,y` pairs.
    Basic,
    /// Pretty-printed JSON.
    Json,
    /// ASCII map with the route drawn over it.
    Grid,
}

/// Serialisable description of a loaded map.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MapInfo {
    pub orientation: Orientation,
    pub width: i32,
    pub height: i32,
    pub layers: Vec<String>,
    pub tile_ids: Vec<TileId>,
}

impl MapInfo {
    pub fn from_map(map: &TileMap) -> Self {
        Self {
            orientation: map.orientation(),
            width: map.width(),
            height: map.height(),
            layers: map.layers(),
            tile_ids: map.distinct_tile_ids(),
        }
    }

    fn render_text(&self) -> String {
        let layers = if self.layers.is_empty() {
            "<none>".to_string()
        } else {
            self.layers.join(", ")
        };
        let tile_ids = self
            .tile_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "orientation: {}\nsize: {}x{}\nlayers: {}\ntile ids: {}\n",
            self.orientation, self.width, self.height, layers, tile_ids
        )
    }
}

impl OutputFormat {
    /// Render a route summary to stdout.
    pub fn render_route(
        self,
        finder: &PathFinder<'_, TileMap>,
        map: &TileMap,
        rule: &TerrainRule,
        summary: &RouteSummary,
    ) -> Result<()> {
        let rendered = match self {
            OutputFormat::Text => summary.render(RouteRenderMode::PlainText),
            OutputFormat::Basic => summary.render(RouteRenderMode::Compact),
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(summary)?),
            OutputFormat::Grid => render_grid(finder, map, rule, summary),
        };
        write_stdout(&rendered)
    }

    /// Render map metadata to stdout.
    pub fn render_map_info(self, info: &MapInfo) -> Result<()> {
        let rendered = match self {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(info)?),
            OutputFormat::Text | OutputFormat::Basic | OutputFormat::Grid => info.render_text(),
        };
        write_stdout(&rendered)
    }
}

fn write_stdout(rendered: &str) -> Result<()> {
    let mut handle = io::stdout().lock();
    handle.write_all(rendered.as_bytes())?;
    handle.flush()?;
    Ok(())
}
