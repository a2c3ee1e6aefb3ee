#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scatters objects and enemies across the terrain grid.

use std::ops::RangeInclusive;

use glade_core::{CellCoord, CollisionMode, PlacementMode, Placements, TerrainGrid, TileSize};
use glam::Vec2;
use rand::Rng;

const OBJECT_COUNT: RangeInclusive<u32> = 1..=4;
const ENEMY_COUNT: RangeInclusive<u32> = 1..=3;

/// Draws allowed per entity before checked placement gives up on it.
pub const CHECKED_PLACEMENT_ATTEMPTS: u32 = 64;

/// Draws object and enemy positions from the caller's generator.
///
/// The object count is drawn first, then one cell per object (column before
/// row), then the enemy count and one cell per enemy. Positions are the upper
/// left corner of the chosen cell in unscaled tile pixels.
///
/// In [`PlacementMode::Checked`] a cell is accepted when it does not collide
/// under `collision`. An entity with no accepted cell after
/// [`CHECKED_PLACEMENT_ATTEMPTS`] draws is skipped, so a heavily flooded grid
/// can yield fewer entities than the drawn count, down to none.
pub fn place_entities<R: Rng + ?Sized>(
    grid: &TerrainGrid,
    tile_size: TileSize,
    mode: PlacementMode,
    collision: CollisionMode,
    rng: &mut R,
) -> Placements {
    let rule = Rule { mode, collision };
    let objects = scatter("object", OBJECT_COUNT, grid, tile_size, rule, rng);
    let enemies = scatter("enemy", ENEMY_COUNT, grid, tile_size, rule, rng);
    Placements { objects, enemies }
}

#[derive(Clone, Copy)]
struct Rule {
    mode: PlacementMode,
    collision: CollisionMode,
}

fn scatter<R: Rng + ?Sized>(
    label: &str,
    count: RangeInclusive<u32>,
    grid: &TerrainGrid,
    tile_size: TileSize,
    rule: Rule,
    rng: &mut R,
) -> Vec<Vec2> {
    let count = rng.gen_range(count);
    let mut positions = Vec::new();
    for index in 0..count {
        match draw_cell(grid, rule, rng) {
            Some(cell) => positions.push(cell_origin(cell, tile_size)),
            None => log::warn!(
                "skipping {label} {index}: no open cell after {CHECKED_PLACEMENT_ATTEMPTS} draws"
            ),
        }
    }
    positions
}

fn draw_cell<R: Rng + ?Sized>(
    grid: &TerrainGrid,
    rule: Rule,
    rng: &mut R,
) -> Option<CellCoord> {
    if grid.columns() == 0 || grid.rows() == 0 {
        return None;
    }

    let attempts = match rule.mode {
        PlacementMode::Unchecked => 1,
        PlacementMode::Checked => CHECKED_PLACEMENT_ATTEMPTS,
    };

    for _ in 0..attempts {
        let column = rng.gen_range(0..grid.columns());
        let row = rng.gen_range(0..grid.rows());
        let cell = CellCoord::new(column, row);
        let accepted = match rule.mode {
            PlacementMode::Unchecked => true,
            PlacementMode::Checked => grid
                .kind(cell)
                .is_some_and(|kind| !kind.is_collidable(rule.collision)),
        };
        if accepted {
            return Some(cell);
        }
    }

    None
}

fn cell_origin(cell: CellCoord, tile_size: TileSize) -> Vec2 {
    Vec2::new(
        cell.column() as f32 * tile_size.width as f32,
        cell.row() as f32 * tile_size.height as f32,
    )
}
