//! Shared fixtures and assertions for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilepath_lib::{
    load_tile_map, Connectivity, Coordinate, Orientation, TerrainFilter, TerrainRule, TileId,
    TileMap, TileMapSource,
};

pub const GRASS: TileId = 1;
pub const WALL: TileId = 2;
pub const WATER: TileId = 3;
pub const ROAD: TileId = 4;

/// Path to the shared JSON map fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn fixture_map(name: &str) -> TileMap {
    load_tile_map(&fixtures_dir().join(name)).expect("fixture map loads")
}

/// Build a single-layer map named `ground` from text rows.
///
/// `.` grass, `#` wall, `~` water, `=` road, anything else empty.
#[allow(dead_code)]
pub fn grid(orientation: Orientation, rows: &[&str]) -> TileMap {
    let height = rows.len() as i32;
    let width = rows.first().map(|row| row.len()).unwrap_or(0) as i32;
    let tiles = rows
        .iter()
        .flat_map(|row| row.chars())
        .map(|cell| match cell {
            '.' => GRASS,
            '#' => WALL,
            '~' => WATER,
            '=' => ROAD,
            _ => 0,
        })
        .collect();
    TileMap::new(orientation, width, height)
        .and_then(|map| map.with_layer("ground", tiles))
        .expect("grid rows form a valid map")
}

/// Assert `route` runs from `start` to `goal` through adjacent cells.
#[allow(dead_code)]
pub fn assert_route(
    connectivity: &Connectivity,
    route: &[Coordinate],
    start: Coordinate,
    goal: Coordinate,
) {
    assert_eq!(route.first(), Some(&start), "route starts at {start}");
    assert_eq!(route.last(), Some(&goal), "route ends at {goal}");
    for pair in route.windows(2) {
        assert!(
            connectivity.is_adjacent(pair[0], pair[1]),
            "{} -> {} is not a single step",
            pair[0],
            pair[1]
        );
    }
}

/// Breadth-first reference distance in steps, honouring the same terrain
/// rule and goal exemption as the path finder.
#[allow(dead_code)]
pub fn bfs_distance(
    map: &TileMap,
    connectivity: &Connectivity,
    rule: &TerrainRule,
    start: Coordinate,
    goal: Coordinate,
) -> Option<usize> {
    if !map.contains(start) || !map.contains(goal) {
        return None;
    }
    let layers = map.layers();
    let terrain = TerrainFilter::new(map, &layers, rule, goal);
    let mut distance = HashMap::from([(start, 0usize)]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let steps = distance[&current];
        if current == goal {
            return Some(steps);
        }
        for next in connectivity.neighbors(current) {
            if terrain.is_traversable(next) && !distance.contains_key(&next) {
                distance.insert(next, steps + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Map of `width x height` grass with roughly `percent` walls.
#[allow(dead_code)]
pub fn scattered(
    orientation: Orientation,
    width: i32,
    height: i32,
    percent: u32,
    seed: u64,
) -> TileMap {
    let mut rng = StdRng::seed_from_u64(seed);
    let tiles = (0..width * height)
        .map(|_| {
            if rng.random_range(0..100u32) < percent {
                WALL
            } else {
                GRASS
            }
        })
        .collect();
    TileMap::new(orientation, width, height)
        .and_then(|map| map.with_layer("ground", tiles))
        .expect("valid scattered map")
}
