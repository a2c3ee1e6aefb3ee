#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Glade simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable snapshots and
//! respond with [`Command`] values describing desired mutations, the world
//! executes those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what actually changed. Nothing outside the
//! world ever mutates terrain, the player, enemies or objects directly.

mod config;
mod entity;
mod geometry;
mod terrain;
mod weapons;

use glam::Vec2;

pub use config::{
    ClusterShapeMode, CollisionMode, CollisionPolicy, ConfigError, PlacementMode, PlayerConfig,
    SessionConfig, Viewport, MAX_GRID_DIMENSION, MIN_GRID_DIMENSION,
};
pub use entity::{
    looping_frame, Animated, Collidable, Damageable, EntityKind, Facing, ANIMATION_FRAME_TICKS,
};
pub use geometry::{BoundingBox, BoxInset};
pub use terrain::{CellCoord, TerrainGrid, Tile, TileCollider, TileKind, TileSize};
pub use weapons::{default_catalog, Weapon, WeaponSlot};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Glade.";

/// Simulation ticks per second of wall-clock time.
pub const TICKS_PER_SECOND: u32 = 60;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces terrain, enemies and objects with a freshly generated layout.
    InstallWorld {
        /// Seed the layout was generated from.
        seed: u64,
        /// Number of regenerations that preceded this layout.
        generation: u32,
        /// Terrain grid to install.
        terrain: TerrainGrid,
        /// Pixel positions of the objects and enemies to spawn.
        placements: Placements,
    },
    /// Advances the simulation clock by one tick.
    Tick,
    /// Moves the player to a position already resolved against collisions.
    MovePlayer {
        /// Upper-left corner of the player sprite after the move.
        destination: Vec2,
        /// New facing, or `None` to keep the current one.
        facing: Option<Facing>,
        /// Reports that the proposed move was rejected by terrain.
        blocked: bool,
    },
    /// Removes hit points from an enemy.
    StrikeEnemy {
        /// Enemy being struck.
        enemy: EnemyId,
        /// Hit points removed.
        damage: f32,
    },
    /// Starts the attack cooldown of the equipped weapon.
    BeginCooldown {
        /// Ticks the cooldown lasts.
        ticks: u32,
    },
    /// Equips the weapon stored in the provided inventory slot.
    EquipSlot {
        /// Slot to equip.
        slot: WeaponSlot,
    },
    /// Marks an object as touched by the player.
    OpenObject {
        /// Object that was touched.
        object: ObjectId,
    },
    /// Records that the player overlaps a live enemy.
    RecordEnemyContact {
        /// Enemy in contact with the player.
        enemy: EnemyId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that started.
        tick: u64,
    },
    /// Confirms that a generated layout replaced the previous one.
    WorldInstalled {
        /// Seed the layout was generated from.
        seed: u64,
        /// Number of regenerations that preceded this layout.
        generation: u32,
        /// Enemies spawned into the layout.
        enemies: usize,
        /// Objects spawned into the layout.
        objects: usize,
    },
    /// Confirms that the player changed position.
    PlayerMoved {
        /// Position before the move.
        from: Vec2,
        /// Position after the move.
        to: Vec2,
    },
    /// Reports that terrain rejected the player's proposed move.
    PlayerBlocked {
        /// Position the player stayed at.
        at: Vec2,
    },
    /// Confirms that an enemy lost hit points.
    EnemyDamaged {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Hit points removed.
        damage: f32,
        /// Hit points left after the strike.
        remaining_hp: f32,
    },
    /// Announces that an enemy's hit points dropped to zero or below.
    EnemyDied {
        /// Enemy that died.
        enemy: EnemyId,
    },
    /// Announces that a dead enemy left the world after its grace window.
    EnemyRemoved {
        /// Enemy that was removed.
        enemy: EnemyId,
    },
    /// Confirms that the attack cooldown started.
    CooldownStarted {
        /// Ticks the cooldown lasts.
        ticks: u32,
    },
    /// Announces that the attack cooldown ended.
    CooldownElapsed,
    /// Confirms that a weapon was equipped.
    WeaponEquipped {
        /// Slot the weapon was taken from.
        slot: WeaponSlot,
        /// Name of the equipped weapon.
        weapon: String,
    },
    /// Reports that a weapon switch addressed an empty slot.
    SlotEmpty {
        /// Slot that holds no item.
        slot: WeaponSlot,
    },
    /// Announces that the player touched an object for the first time.
    ObjectOpened {
        /// Object that was opened.
        object: ObjectId,
    },
    /// Reports that the player overlaps a live enemy.
    EnemyContact {
        /// Enemy in contact with the player.
        enemy: EnemyId,
    },
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Device-independent actions requested for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameIntent {
    /// Move toward decreasing x.
    pub move_left: bool,
    /// Move toward increasing x.
    pub move_right: bool,
    /// Move toward decreasing y.
    pub move_up: bool,
    /// Move toward increasing y.
    pub move_down: bool,
    /// Swing the equipped weapon.
    pub attack: bool,
    /// Equip the weapon in the provided slot.
    pub select_slot: Option<WeaponSlot>,
    /// Replace the current layout with a new one.
    pub regenerate: bool,
    /// End the session after this tick.
    pub quit: bool,
}

impl FrameIntent {
    /// Intent that requests nothing.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Held movement keys as a `-1/0/+1` axis per component.
    ///
    /// Opposite keys cancel out.
    #[must_use]
    pub fn movement_axis(&self) -> Vec2 {
        let axis = |negative: bool, positive: bool| -> f32 {
            f32::from(u8::from(positive)) - f32::from(u8::from(negative))
        };
        Vec2::new(
            axis(self.move_left, self.move_right),
            axis(self.move_up, self.move_down),
        )
    }

    /// Facing requested by the held horizontal keys.
    ///
    /// Right wins when both horizontal keys are held.
    #[must_use]
    pub const fn facing(&self) -> Option<Facing> {
        if self.move_right {
            Some(Facing::Right)
        } else if self.move_left {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Pixel positions produced by the placement generator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placements {
    /// Upper-left corners of the objects to spawn.
    pub objects: Vec<Vec2>,
    /// Upper-left corners of the enemies to spawn.
    pub enemies: Vec<Vec2>,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Upper-left corner of the sprite.
    pub position: Vec2,
    /// Sprite size.
    pub size: Vec2,
    /// Remaining hit points.
    pub hp: i32,
    /// Direction the sprite faces.
    pub facing: Facing,
    /// Weapon currently equipped, if any.
    pub equipped: Option<Weapon>,
    /// Slot the equipped weapon came from.
    pub equipped_slot: Option<WeaponSlot>,
    /// Number of items in the inventory.
    pub inventory_len: usize,
    /// Ticks left before the next swing is allowed.
    pub cooldown_remaining: u32,
}

impl PlayerSnapshot {
    /// Reports whether the attack cooldown is running.
    #[must_use]
    pub const fn cooldown_active(&self) -> bool {
        self.cooldown_remaining > 0
    }
}

impl Collidable for PlayerSnapshot {
    fn entity_kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn collision_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox::from_origin_and_size(self.position, self.size))
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier assigned to the enemy at installation.
    pub id: EnemyId,
    /// Upper-left corner of the sprite.
    pub position: Vec2,
    /// Sprite size.
    pub size: Vec2,
    /// Remaining hit points.
    pub hp: f32,
    /// Whether the enemy still takes part in collision and combat.
    pub alive: bool,
    /// Frame of the idle or death animation to draw.
    pub animation_frame: usize,
}

impl Collidable for EnemySnapshot {
    fn entity_kind(&self) -> EntityKind {
        EntityKind::Enemy
    }

    fn collision_box(&self) -> Option<BoundingBox> {
        self.alive
            .then(|| BoundingBox::from_origin_and_size(self.position, self.size))
    }
}

/// Read-only snapshot describing all enemies in the world.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the enemies that are still alive.
    pub fn alive(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.alive)
    }

    /// Looks up a single enemy.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Number of captured enemies, dead or alive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single object's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectSnapshot {
    /// Identifier assigned to the object at installation.
    pub id: ObjectId,
    /// Upper-left corner of the sprite.
    pub position: Vec2,
    /// Sprite size.
    pub size: Vec2,
    /// Whether the player has touched the object.
    pub collided: bool,
    /// Frame to draw: closed or opened.
    pub animation_frame: usize,
}

impl Collidable for ObjectSnapshot {
    fn entity_kind(&self) -> EntityKind {
        EntityKind::Chest
    }

    fn collision_box(&self) -> Option<BoundingBox> {
        Some(BoundingBox::from_origin_and_size(self.position, self.size))
    }
}

/// Read-only snapshot describing all objects in the world.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectView {
    snapshots: Vec<ObjectSnapshot>,
}

impl ObjectView {
    /// Creates a new object view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ObjectSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured object snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a single object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&ObjectSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Number of captured objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ObjectSnapshot> {
        self.snapshots
    }
}
