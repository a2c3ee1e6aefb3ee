//! Session configuration consumed by the world, the systems and the adapters.
//!
//! Every key is optional when deserialised; missing keys fall back to the
//! balance of the released game. [`SessionConfig::validate`] must succeed
//! before a session is created.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{default_catalog, BoxInset, TileSize, Weapon};

/// Smallest accepted grid dimension.
pub const MIN_GRID_DIMENSION: u32 = 3;
/// Largest accepted grid dimension.
pub const MAX_GRID_DIMENSION: u32 = 256;

/// How terrain tiles block a moving actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Any overlap with water or shoreline blocks the move.
    Strict,
    /// Only water collides, and only once the overlap count exceeds the threshold.
    #[default]
    Tolerant,
}

/// How placement treats cells that collide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Any cell may receive an entity.
    #[default]
    Unchecked,
    /// Cells that collide under the session's [`CollisionMode`] are re-drawn.
    Checked,
}

/// Shapes produced by the terrain generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterShapeMode {
    /// Every cluster fills its whole footprint.
    Solid,
    /// Clusters are circular lakes or irregular blocks.
    #[default]
    Mixed,
}

/// Fixed play-area size overriding the grid's pixel extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Viewport {
    /// Width of the play area in pixels.
    pub width: u32,
    /// Height of the play area in pixels.
    pub height: u32,
}

/// Player tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Upper-left corner of the sprite at session start.
    pub spawn: [f32; 2],
    /// Starting hit points.
    pub hp: i32,
    /// Pixels travelled per tick along each held axis.
    pub speed: f32,
    /// Sprite width and height in pixels.
    pub size: [f32; 2],
    /// Scales diagonal movement to unit length.
    pub normalize_diagonal: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 0.0],
            hp: 100,
            speed: 5.0,
            size: [60.0, 80.0],
            normalize_diagonal: false,
        }
    }
}

/// Complete configuration of a play session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Seed of the generation stream.
    pub seed: u64,
    /// Number of tile rows.
    pub grid_rows: u32,
    /// Number of tile columns.
    pub grid_cols: u32,
    /// Unscaled tile dimensions.
    pub tile_size: TileSize,
    /// Optional play-area override; defaults to the grid's pixel extent.
    pub viewport: Option<Viewport>,
    /// Terrain blocking rule.
    pub collision_mode: CollisionMode,
    /// Overlapping water cells tolerated before a move is blocked.
    pub overlap_threshold: u32,
    /// Inset turning the player sprite into its collision box.
    pub actor_inset: BoxInset,
    /// Placement rule for objects and enemies.
    pub placement_mode: PlacementMode,
    /// Cluster shapes used when the world is regenerated.
    pub cluster_shape_mode: ClusterShapeMode,
    /// Hit points every enemy starts with.
    pub enemy_hp: f32,
    /// Ticks a dead enemy stays in the world before removal.
    pub death_grace_ticks: u64,
    /// Player tuning.
    pub player: PlayerConfig,
    /// Weapons added to the inventory at session start, in slot order.
    pub weapons: Vec<Weapon>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 11,
            grid_rows: 20,
            grid_cols: 25,
            tile_size: TileSize::new(32, 32),
            viewport: None,
            collision_mode: CollisionMode::default(),
            overlap_threshold: 2,
            actor_inset: BoxInset::new(15.0, 60.0, 15.0, 10.0),
            placement_mode: PlacementMode::default(),
            cluster_shape_mode: ClusterShapeMode::default(),
            enemy_hp: 10.0,
            death_grace_ticks: 120,
            player: PlayerConfig::default(),
            weapons: default_catalog(),
        }
    }
}

impl SessionConfig {
    /// Checks every value a session depends on.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("rows", self.grid_rows)?;
        check_dimension("columns", self.grid_cols)?;

        if self.tile_size.width == 0 || self.tile_size.height == 0 {
            return Err(ConfigError::ZeroTileSize);
        }

        if let Some(viewport) = self.viewport {
            if viewport.width == 0 || viewport.height == 0 {
                return Err(ConfigError::ZeroViewport);
            }
        }

        if self.weapons.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        for weapon in &self.weapons {
            check_weapon(weapon)?;
        }

        let speed = self.player.speed;
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(speed));
        }

        if self.player.hp <= 0 {
            return Err(ConfigError::InvalidPlayerHp(self.player.hp));
        }

        if !self.enemy_hp.is_finite() || self.enemy_hp <= 0.0 {
            return Err(ConfigError::InvalidEnemyHp(self.enemy_hp));
        }

        let size = self.player_size();
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(ConfigError::InvalidPlayerSize {
                width: size.x,
                height: size.y,
            });
        }

        if !self.actor_inset.fits(size) {
            return Err(ConfigError::InsetTooLarge);
        }

        let bounds = self.bounds();
        if size.x > bounds.x || size.y > bounds.y {
            return Err(ConfigError::SpriteExceedsBounds {
                width: size.x,
                height: size.y,
                bounds_width: bounds.x,
                bounds_height: bounds.y,
            });
        }

        if !self.player_spawn().is_finite() {
            return Err(ConfigError::InvalidSpawn);
        }

        Ok(())
    }

    /// Size of the play area the player is clamped to, in pixels.
    #[must_use]
    pub fn bounds(&self) -> Vec2 {
        match self.viewport {
            Some(viewport) => Vec2::new(viewport.width as f32, viewport.height as f32),
            None => Vec2::new(
                self.grid_cols as f32 * self.tile_size.width as f32,
                self.grid_rows as f32 * self.tile_size.height as f32,
            ),
        }
    }

    /// Upper-left corner of the player sprite at session start.
    #[must_use]
    pub fn player_spawn(&self) -> Vec2 {
        Vec2::from_array(self.player.spawn)
    }

    /// Player sprite size.
    #[must_use]
    pub fn player_size(&self) -> Vec2 {
        Vec2::from_array(self.player.size)
    }

    /// Terrain blocking rule derived from the configuration.
    #[must_use]
    pub fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy {
            mode: self.collision_mode,
            overlap_threshold: self.overlap_threshold,
            actor_inset: self.actor_inset,
        }
    }
}

/// Terrain blocking rule applied by the collision engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionPolicy {
    /// Which tiles collide.
    pub mode: CollisionMode,
    /// Overlaps tolerated in [`CollisionMode::Tolerant`].
    pub overlap_threshold: u32,
    /// Inset applied to the actor sprite.
    pub actor_inset: BoxInset,
}

impl CollisionPolicy {
    /// Reports whether `overlaps` collidable tiles block the move.
    #[must_use]
    pub const fn blocks(&self, overlaps: u32) -> bool {
        match self.mode {
            CollisionMode::Strict => overlaps > 0,
            CollisionMode::Tolerant => overlaps > self.overlap_threshold,
        }
    }
}

/// Fatal configuration problems detected before a session starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A grid dimension falls outside the supported range.
    #[error("grid {axis} must lie within [3, 256], got {value}")]
    GridDimension {
        /// Offending axis.
        axis: &'static str,
        /// Configured value.
        value: u32,
    },
    /// Tile width or height is zero.
    #[error("tile size must be non-zero")]
    ZeroTileSize,
    /// Viewport width or height is zero.
    #[error("viewport must be non-zero")]
    ZeroViewport,
    /// No weapons were configured.
    #[error("weapon catalog is empty")]
    EmptyCatalog,
    /// A weapon carries unusable stats.
    #[error("weapon `{name}` is invalid: {reason}")]
    InvalidWeapon {
        /// Name of the offending weapon.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Player speed is negative or not finite.
    #[error("player speed must be a finite non-negative number, got {0}")]
    InvalidSpeed(f32),
    /// Player hit points are not positive.
    #[error("player hp must be positive, got {0}")]
    InvalidPlayerHp(i32),
    /// Enemy hit points are not positive.
    #[error("enemy hp must be a finite positive number, got {0}")]
    InvalidEnemyHp(f32),
    /// Player sprite has a non-positive or non-finite extent.
    #[error("player size {width}x{height} is invalid")]
    InvalidPlayerSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The collision inset consumes the whole sprite.
    #[error("actor inset leaves no collision area on the player sprite")]
    InsetTooLarge,
    /// The player sprite cannot fit inside the play area.
    #[error("player size {width}x{height} exceeds the {bounds_width}x{bounds_height} play area")]
    SpriteExceedsBounds {
        /// Sprite width.
        width: f32,
        /// Sprite height.
        height: f32,
        /// Play-area width.
        bounds_width: f32,
        /// Play-area height.
        bounds_height: f32,
    },
    /// Player spawn is not finite.
    #[error("player spawn must be finite")]
    InvalidSpawn,
}

fn check_dimension(axis: &'static str, value: u32) -> Result<(), ConfigError> {
    if (MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::GridDimension { axis, value })
    }
}

fn check_weapon(weapon: &Weapon) -> Result<(), ConfigError> {
    let reason = if !weapon.damage().is_finite() || weapon.damage() < 0.0 {
        Some("damage must be a finite non-negative number")
    } else if !weapon.range().is_finite() || weapon.range() < 0.0 {
        Some("range must be a finite non-negative number")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidWeapon {
            name: weapon.name().to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}
