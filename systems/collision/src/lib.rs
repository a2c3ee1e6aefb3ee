#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player movement resolution against terrain, objects and enemies.
//!
//! Terrain is the only thing that blocks. Objects and enemies are tested
//! separately after the move and only produce contact commands.

use glade_core::{
    BoundingBox, Collidable, CollisionPolicy, Command, EnemyView, FrameIntent,
    ObjectView, PlayerSnapshot, SessionConfig, TerrainGrid, TileCollider,
};
use glam::Vec2;

/// Outcome of resolving a single proposed displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveResolution {
    /// Position the actor ends up at.
    pub position: Vec2,
    /// Whether terrain rejected the move.
    pub blocked: bool,
    /// Collidable tiles overlapped at the proposed position.
    pub overlaps: u32,
}

/// Resolves actor displacements against a tile grid.
#[derive(Clone, Copy, Debug)]
pub struct CollisionEngine {
    policy: CollisionPolicy,
    actor_size: Vec2,
}

impl CollisionEngine {
    /// Creates an engine for an actor of the provided sprite size.
    #[must_use]
    pub const fn new(policy: CollisionPolicy, actor_size: Vec2) -> Self {
        Self { policy, actor_size }
    }

    /// Resolves `current + delta` against the grid scaled onto `bounds`.
    ///
    /// The proposed position is first clamped so the sprite stays inside
    /// `bounds`. Collidable tiles are then counted against the inset actor
    /// box; when the policy blocks, the actor stays at `current`.
    #[must_use]
    pub fn resolve_move(
        &self,
        current: Vec2,
        delta: Vec2,
        grid: &TerrainGrid,
        bounds: Vec2,
    ) -> MoveResolution {
        let proposed = self.clamp(current + delta, bounds);
        let overlaps = self.count_overlaps(self.collision_box(proposed), grid, bounds);
        let blocked = self.policy.blocks(overlaps);

        MoveResolution {
            position: if blocked { current } else { proposed },
            blocked,
            overlaps,
        }
    }

    /// Inset collision box of an actor whose sprite starts at `position`.
    #[must_use]
    pub fn collision_box(&self, position: Vec2) -> BoundingBox {
        BoundingBox::from_origin_and_size(position, self.actor_size).inset(self.policy.actor_inset)
    }

    fn clamp(&self, position: Vec2, bounds: Vec2) -> Vec2 {
        let max = (bounds - self.actor_size).max(Vec2::ZERO);
        position.clamp(Vec2::ZERO, max)
    }

    fn count_overlaps(&self, actor: BoundingBox, grid: &TerrainGrid, bounds: Vec2) -> u32 {
        if grid.columns() == 0 || grid.rows() == 0 {
            return 0;
        }

        let cell_size = bounds / Vec2::new(grid.columns() as f32, grid.rows() as f32);
        let overlaps = grid
            .iter()
            .map(|(cell, tile)| TileCollider::new(cell, tile.kind(), cell_size))
            .filter(|collider| collider.kind().is_collidable(self.policy.mode))
            .filter(|collider| touches(collider, &actor))
            .inspect(|collider| {
                log::trace!(
                    "{:?} cell ({}, {}) counted",
                    collider.kind(),
                    collider.cell().column(),
                    collider.cell().row()
                );
            })
            .count();
        u32::try_from(overlaps).unwrap_or(u32::MAX)
    }
}

/// Pure system turning movement intents into player commands.
#[derive(Clone, Copy, Debug)]
pub struct Collision {
    engine: CollisionEngine,
    speed: f32,
    normalize_diagonal: bool,
}

impl Collision {
    /// Creates a movement system around the provided engine.
    #[must_use]
    pub const fn new(engine: CollisionEngine, speed: f32, normalize_diagonal: bool) -> Self {
        Self {
            engine,
            speed,
            normalize_diagonal,
        }
    }

    /// Creates a movement system tuned by the session configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            CollisionEngine::new(config.collision_policy(), config.player_size()),
            config.player.speed,
            config.player.normalize_diagonal,
        )
    }

    /// Engine used to resolve moves.
    #[must_use]
    pub const fn engine(&self) -> &CollisionEngine {
        &self.engine
    }

    /// Displacement requested by the intent for a single tick.
    #[must_use]
    pub fn displacement(&self, intent: &FrameIntent) -> Vec2 {
        let axis = intent.movement_axis();
        let direction = if self.normalize_diagonal && axis.length_squared() > 1.0 {
            axis.normalize()
        } else {
            axis
        };
        direction * self.speed
    }

    /// Emits a [`Command::MovePlayer`] when the intent holds a movement key.
    pub fn handle(
        &self,
        intent: &FrameIntent,
        player: &PlayerSnapshot,
        grid: &TerrainGrid,
        bounds: Vec2,
        out: &mut Vec<Command>,
    ) {
        let facing = intent.facing();
        let delta = self.displacement(intent);
        if delta == Vec2::ZERO && facing.is_none() {
            return;
        }

        let resolution = self
            .engine
            .resolve_move(player.position, delta, grid, bounds);
        if resolution.blocked {
            log::debug!(
                "move from {:?} blocked by {} overlapping tiles",
                player.position,
                resolution.overlaps
            );
        }

        out.push(Command::MovePlayer {
            destination: resolution.position,
            facing,
            blocked: resolution.blocked,
        });
    }

    /// Emits contact commands for unopened objects and live enemies that
    /// overlap the player's full sprite.
    pub fn detect_contacts(
        &self,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        objects: &ObjectView,
        out: &mut Vec<Command>,
    ) {
        let Some(player_box) = player.collision_box() else {
            return;
        };

        for object in objects.iter().filter(|object| !object.collided) {
            if touches(object, &player_box) {
                out.push(Command::OpenObject { object: object.id });
            }
        }

        for enemy in enemies.alive() {
            if touches(enemy, &player_box) {
                out.push(Command::RecordEnemyContact { enemy: enemy.id });
            }
        }
    }
}

fn touches(entity: &impl Collidable, actor: &BoundingBox) -> bool {
    let touching = entity
        .collision_box()
        .is_some_and(|area| area.overlaps(actor));
    if touching {
        log::trace!("{:?} box overlaps the actor box", entity.entity_kind());
    }
    touching
}

#[cfg(test)]
mod tests {
    use super::*;
    use glade_core::{BoxInset, CollisionMode};

    #[test]
    fn diagonal_normalisation_keeps_speed() {
        let policy = CollisionPolicy {
            mode: CollisionMode::Strict,
            overlap_threshold: 0,
            actor_inset: BoxInset::NONE,
        };
        let engine = CollisionEngine::new(policy, Vec2::splat(32.0));
        let intent = FrameIntent {
            move_right: true,
            move_down: true,
            ..FrameIntent::idle()
        };

        let raw = Collision::new(engine, 5.0, false).displacement(&intent);
        assert_eq!(raw, Vec2::new(5.0, 5.0));

        let normalised = Collision::new(engine, 5.0, true).displacement(&intent);
        assert!((normalised.length() - 5.0).abs() < 1e-4);
    }
}
