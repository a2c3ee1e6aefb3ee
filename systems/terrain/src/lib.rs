#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic procedural terrain generation.
//!
//! Water clusters are stamped onto an all-grass grid, then a single shoreline
//! pass outlines every grass cell touching water. All random draws come from
//! the caller's generator in a fixed order so that a seed fully determines the
//! resulting grid.

use std::ops::RangeInclusive;

use glade_core::{CellCoord, ClusterShapeMode, TerrainGrid, TileKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const CLUSTER_COUNT: RangeInclusive<u32> = 3..=5;
const SOLID_CLUSTER_SIZE: RangeInclusive<u32> = 2..=7;
const MIXED_CLUSTER_SIZE: RangeInclusive<u32> = 3..=7;
const CLUSTER_SIZE_RETRIES: u32 = 8;
const IRREGULAR_FILL_PROBABILITY: f64 = 0.8;

/// Number of cosmetic sprite variants available per tile kind.
pub const VARIANT_COUNT: u8 = 4;

const RNG_STREAM_VARIANTS: &str = "terrain-variants";
const RNG_STREAM_REGENERATION: &str = "terrain-regeneration";

/// Footprint fill strategy of a single water cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClusterShape {
    /// Every footprint cell becomes water.
    SolidBlock,
    /// Cells whose centre lies within half the footprint width of the
    /// footprint centre become water.
    CircularLake,
    /// Each footprint cell becomes water independently with probability 0.8.
    IrregularBlock,
}

impl ClusterShape {
    fn draw<R: Rng + ?Sized>(mode: ClusterShapeMode, rng: &mut R) -> Self {
        match mode {
            ClusterShapeMode::Solid => Self::SolidBlock,
            ClusterShapeMode::Mixed => {
                if rng.gen_bool(0.5) {
                    Self::CircularLake
                } else {
                    Self::IrregularBlock
                }
            }
        }
    }

    fn stamp<R: Rng + ?Sized>(
        self,
        grid: &mut TerrainGrid,
        anchor: CellCoord,
        size: u32,
        rng: &mut R,
    ) {
        let centre = size as f32 / 2.0;
        for row_offset in 0..size {
            for column_offset in 0..size {
                let water = match self {
                    Self::SolidBlock => true,
                    Self::CircularLake => {
                        let dx = column_offset as f32 + 0.5 - centre;
                        let dy = row_offset as f32 + 0.5 - centre;
                        (dx * dx + dy * dy).sqrt() < centre
                    }
                    Self::IrregularBlock => rng.gen_bool(IRREGULAR_FILL_PROBABILITY),
                };

                if water {
                    let cell = CellCoord::new(
                        anchor.column() + column_offset,
                        anchor.row() + row_offset,
                    );
                    let _ = grid.set_kind(cell, TileKind::Water);
                }
            }
        }
    }
}

/// Generates a `rows × columns` grid of grass, water clusters and shoreline.
///
/// Draw order per call: cluster count, then for each cluster its size, anchor
/// column, anchor row, shape and finally any per-cell fill draws.
pub fn generate<R: Rng + ?Sized>(
    rows: u32,
    columns: u32,
    mode: ClusterShapeMode,
    rng: &mut R,
) -> TerrainGrid {
    let mut grid = TerrainGrid::new(columns, rows);
    let largest_fit = rows.min(columns);
    if largest_fit == 0 {
        return grid;
    }

    let clusters = rng.gen_range(CLUSTER_COUNT);
    for _ in 0..clusters {
        let size = draw_cluster_size(mode, largest_fit, rng);
        let anchor = CellCoord::new(
            rng.gen_range(0..=columns - size),
            rng.gen_range(0..=rows - size),
        );
        let shape = ClusterShape::draw(mode, rng);
        log::debug!(
            "stamping {shape:?} of size {size} at ({}, {})",
            anchor.column(),
            anchor.row()
        );
        shape.stamp(&mut grid, anchor, size, rng);
    }

    outline_shores(&mut grid);
    grid
}

fn draw_cluster_size<R: Rng + ?Sized>(
    mode: ClusterShapeMode,
    largest_fit: u32,
    rng: &mut R,
) -> u32 {
    let range = match mode {
        ClusterShapeMode::Solid => SOLID_CLUSTER_SIZE,
        ClusterShapeMode::Mixed => MIXED_CLUSTER_SIZE,
    };

    for _ in 0..CLUSTER_SIZE_RETRIES {
        let size = rng.gen_range(range.clone());
        if size <= largest_fit {
            return size;
        }
    }

    log::debug!("no cluster size in {range:?} fit, clamping to {largest_fit}");
    largest_fit
}

/// Turns every grass cell 4-adjacent to water into shoreline.
///
/// Adjacency is read from a copy of the grid taken before the pass, so
/// shoreline cells created here never cause further outlining.
pub fn outline_shores(grid: &mut TerrainGrid) {
    let before = grid.clone();
    for (cell, tile) in before.iter() {
        if tile.kind() != TileKind::Grass {
            continue;
        }

        let touches_water = before
            .neighbors(cell)
            .any(|neighbor| before.kind(neighbor) == Some(TileKind::Water));
        if touches_water {
            let _ = grid.set_kind(cell, TileKind::ShoreOutline);
        }
    }
}

/// Assigns a cosmetic variant in `0..VARIANT_COUNT` to every cell.
///
/// Variants come from a stream derived from `seed`, so assigning them never
/// disturbs the generation stream.
pub fn assign_variants(grid: &mut TerrainGrid, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_labeled_seed(seed, RNG_STREAM_VARIANTS));
    let cells: Vec<CellCoord> = grid.iter().map(|(cell, _)| cell).collect();
    for cell in cells {
        let _ = grid.set_variant(cell, rng.gen_range(0..VARIANT_COUNT));
    }
}

/// Seed of the layout produced by the `generation`-th regeneration.
#[must_use]
pub fn regeneration_seed(base: u64, generation: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(RNG_STREAM_REGENERATION.as_bytes());
    hasher.update(generation.to_le_bytes());
    finalize_seed(hasher)
}

fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    finalize_seed(hasher)
}

fn finalize_seed(hasher: Sha256) -> u64 {
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_at(grid: &TerrainGrid, column: u32, row: u32) -> TileKind {
        grid.kind(CellCoord::new(column, row))
            .expect("cell inside the grid")
    }

    #[test]
    fn circular_lake_leaves_corners_dry() {
        let mut grid = TerrainGrid::new(5, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        ClusterShape::CircularLake.stamp(&mut grid, CellCoord::new(0, 0), 5, &mut rng);

        assert_eq!(kind_at(&grid, 0, 0), TileKind::Grass);
        assert_eq!(kind_at(&grid, 4, 4), TileKind::Grass);
        assert_eq!(kind_at(&grid, 2, 2), TileKind::Water);
        assert_eq!(kind_at(&grid, 0, 2), TileKind::Water);
        assert_eq!(grid.count(TileKind::Water), 21);
    }

    #[test]
    fn solid_block_fills_its_footprint() {
        let mut grid = TerrainGrid::new(6, 6);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        ClusterShape::SolidBlock.stamp(&mut grid, CellCoord::new(2, 1), 3, &mut rng);

        assert_eq!(grid.count(TileKind::Water), 9);
        assert_eq!(kind_at(&grid, 4, 3), TileKind::Water);
        assert_eq!(kind_at(&grid, 5, 3), TileKind::Grass);
    }

    #[test]
    fn irregular_block_stays_inside_its_footprint_with_gaps() {
        let mut grid = TerrainGrid::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let anchor = CellCoord::new(2, 3);
        ClusterShape::IrregularBlock.stamp(&mut grid, anchor, 6, &mut rng);

        let inside = |cell: CellCoord| {
            (2..8).contains(&cell.column()) && (3..9).contains(&cell.row())
        };
        for (cell, tile) in grid.iter() {
            if tile.kind() == TileKind::Water {
                assert!(inside(cell), "water stamped outside the footprint at {cell:?}");
            }
        }

        let water = grid.count(TileKind::Water);
        assert!(water > 0);
        assert!(water < 36, "an irregular block leaves grass gaps");
    }

    #[test]
    fn outline_does_not_cascade() {
        let mut grid = TerrainGrid::new(5, 1);
        assert!(grid.set_kind(CellCoord::new(0, 0), TileKind::Water));
        outline_shores(&mut grid);

        assert_eq!(kind_at(&grid, 1, 0), TileKind::ShoreOutline);
        assert_eq!(kind_at(&grid, 2, 0), TileKind::Grass);
    }

    #[test]
    fn oversized_clusters_clamp_to_the_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..32 {
            let size = draw_cluster_size(ClusterShapeMode::Mixed, 3, &mut rng);
            assert_eq!(size, 3);
        }
    }

    #[test]
    fn regeneration_seeds_differ_per_generation() {
        assert_ne!(regeneration_seed(11, 1), regeneration_seed(11, 2));
        assert_eq!(regeneration_seed(11, 1), regeneration_seed(11, 1));
    }
}
