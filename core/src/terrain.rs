//! Tile grid contracts shared by the generator, the world and the collision engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Collidable, CollisionMode, EntityKind};

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Terrain classification stored in every cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Walkable ground.
    Grass,
    /// Open water that blocks movement.
    Water,
    /// Grass bordering water, drawn as a shoreline edge.
    ShoreOutline,
}

impl TileKind {
    /// Reports whether the tile takes part in movement collision.
    ///
    /// Water always collides. Shoreline only collides under
    /// [`CollisionMode::Strict`], which is what lets tolerant actors graze
    /// the lake edges.
    #[must_use]
    pub const fn is_collidable(self, mode: CollisionMode) -> bool {
        match self {
            Self::Water => true,
            Self::ShoreOutline => matches!(mode, CollisionMode::Strict),
            Self::Grass => false,
        }
    }
}

/// Single grid cell: a terrain kind plus a cosmetic sprite variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    kind: TileKind,
    variant: u8,
}

impl Tile {
    /// Creates a tile of the provided kind using the first sprite variant.
    #[must_use]
    pub const fn new(kind: TileKind) -> Self {
        Self { kind, variant: 0 }
    }

    /// Terrain classification of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Sprite variant index. Has no effect on collision.
    #[must_use]
    pub const fn variant(&self) -> u8 {
        self.variant
    }
}

/// Pixel dimensions of a single unscaled tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileSize {
    /// Tile width in pixels.
    pub width: u32,
    /// Tile height in pixels.
    pub height: u32,
}

impl TileSize {
    /// Creates a new tile size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Dense `rows × columns` terrain grid stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TerrainGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl TerrainGrid {
    /// Creates a grid of the provided dimensions filled with grass.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            tiles: vec![Tile::new(TileKind::Grass); capacity],
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Returns the tile stored at the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
    }

    /// Returns the terrain kind stored at the provided cell.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> Option<TileKind> {
        self.tile(cell).map(|tile| tile.kind())
    }

    /// Overwrites the kind of a cell, keeping its variant.
    ///
    /// Returns `false` when the cell lies outside the grid.
    pub fn set_kind(&mut self, cell: CellCoord, kind: TileKind) -> bool {
        match self.slot_mut(cell) {
            Some(tile) => {
                tile.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Overwrites the sprite variant of a cell.
    ///
    /// Returns `false` when the cell lies outside the grid.
    pub fn set_variant(&mut self, cell: CellCoord, variant: u8) -> bool {
        match self.slot_mut(cell) {
            Some(tile) => {
                tile.variant = variant;
                true
            }
            None => false,
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        let columns = self.columns.max(1);
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *tile)
        })
    }

    /// Iterates over the in-bounds orthogonal neighbours of a cell.
    ///
    /// Neighbours are yielded north, south, west, east.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        let column = cell.column();
        let row = cell.row();
        let candidates = [
            row.checked_sub(1).map(|north| CellCoord::new(column, north)),
            row.checked_add(1).map(|south| CellCoord::new(column, south)),
            column.checked_sub(1).map(|west| CellCoord::new(west, row)),
            column.checked_add(1).map(|east| CellCoord::new(east, row)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Counts the cells of the provided kind.
    #[must_use]
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }

    fn slot_mut(&mut self, cell: CellCoord) -> Option<&mut Tile> {
        let index = self.index(cell)?;
        self.tiles.get_mut(index)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Collision footprint of a terrain cell scaled onto the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileCollider {
    cell: CellCoord,
    kind: TileKind,
    area: BoundingBox,
}

impl TileCollider {
    /// Places the cell on a play area divided into cells of `cell_size` pixels.
    #[must_use]
    pub fn new(cell: CellCoord, kind: TileKind, cell_size: Vec2) -> Self {
        let origin = Vec2::new(cell.column() as f32, cell.row() as f32) * cell_size;
        Self {
            cell,
            kind,
            area: BoundingBox::from_origin_and_size(origin, cell_size),
        }
    }

    /// Cell the collider covers.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Terrain kind of the covered cell.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }
}

impl Collidable for TileCollider {
    fn entity_kind(&self) -> EntityKind {
        EntityKind::Tile
    }

    fn collision_box(&self) -> Option<BoundingBox> {
        Some(self.area)
    }
}
