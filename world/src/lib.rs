#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Glade.
//!
//! The world owns the terrain grid, the player, the enemies and the objects.
//! It changes only through [`apply`]; everything else reads it through the
//! [`query`] module.

use glade_core::{
    looping_frame, Animated, Command, ConfigError, Damageable, EnemyId, Event, Facing, ObjectId,
    SessionConfig, TerrainGrid, TileSize, Weapon,
};
use glam::Vec2;

const ENEMY_SIZE: Vec2 = Vec2::new(60.0, 60.0);
const OBJECT_SIZE: Vec2 = Vec2::new(50.0, 50.0);
const IDLE_ANIMATION_FRAMES: usize = 4;
const DEATH_ANIMATION_FRAMES: usize = 2;
const OPENED_CHEST_FRAME: usize = 1;

/// Represents the authoritative Glade world state.
#[derive(Debug)]
pub struct World {
    seed: u64,
    generation: u32,
    terrain: TerrainGrid,
    tile_size: TileSize,
    bounds: Vec2,
    player: PlayerState,
    enemies: Vec<Enemy>,
    objects: Vec<Chest>,
    enemy_hp: f32,
    death_grace_ticks: u64,
    tick_index: u64,
}

impl World {
    /// Creates a world with an all-grass grid and no enemies or objects.
    ///
    /// The player holds the configured weapons with slot 1 equipped.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`SessionConfig::validate`].
    pub fn new(config: &SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = config.bounds();
        let size = config.player_size();
        let player = PlayerState {
            position: clamp_to_bounds(config.player_spawn(), size, bounds),
            size,
            hp: config.player.hp,
            facing: Facing::default(),
            inventory: config.weapons.clone(),
            equipped: (!config.weapons.is_empty()).then_some(0),
            cooldown_remaining: 0,
        };

        Ok(Self {
            seed: config.seed,
            generation: 0,
            terrain: TerrainGrid::new(config.grid_cols, config.grid_rows),
            tile_size: config.tile_size,
            bounds,
            player,
            enemies: Vec::new(),
            objects: Vec::new(),
            enemy_hp: config.enemy_hp,
            death_grace_ticks: config.death_grace_ticks,
            tick_index: 0,
        })
    }

    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    fn remove_expired_corpses(&mut self, out_events: &mut Vec<Event>) {
        let tick = self.tick_index;
        let grace = self.death_grace_ticks;
        self.enemies.retain(|enemy| match enemy.died_at {
            Some(died_at) if tick.saturating_sub(died_at) >= grace => {
                out_events.push(Event::EnemyRemoved { enemy: enemy.id });
                false
            }
            _ => true,
        });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::InstallWorld {
            seed,
            generation,
            terrain,
            placements,
        } => {
            let enemy_hp = world.enemy_hp;
            world.enemies = placements
                .enemies
                .iter()
                .zip(0_u32..)
                .map(|(position, index)| Enemy {
                    id: EnemyId::new(index),
                    position: *position,
                    hp: enemy_hp,
                    died_at: None,
                })
                .collect();
            world.objects = placements
                .objects
                .iter()
                .zip(0_u32..)
                .map(|(position, index)| Chest {
                    id: ObjectId::new(index),
                    position: *position,
                    collided: false,
                })
                .collect();
            world.terrain = terrain;
            world.seed = seed;
            world.generation = generation;

            log::info!(
                "installed layout {generation} from seed {seed}: {} enemies, {} objects",
                world.enemies.len(),
                world.objects.len()
            );
            out_events.push(Event::WorldInstalled {
                seed,
                generation,
                enemies: world.enemies.len(),
                objects: world.objects.len(),
            });
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });

            if world.player.cooldown_remaining > 0 {
                world.player.cooldown_remaining -= 1;
                if world.player.cooldown_remaining == 0 {
                    out_events.push(Event::CooldownElapsed);
                }
            }

            world.remove_expired_corpses(out_events);
        }
        Command::MovePlayer {
            destination,
            facing,
            blocked,
        } => {
            if let Some(facing) = facing {
                world.player.facing = facing;
            }

            let from = world.player.position;
            if blocked {
                out_events.push(Event::PlayerBlocked { at: from });
                return;
            }

            let to = clamp_to_bounds(destination, world.player.size, world.bounds);
            if to != from {
                world.player.position = to;
                out_events.push(Event::PlayerMoved { from, to });
            }
        }
        Command::StrikeEnemy { enemy, damage } => {
            let tick = world.tick_index;
            let Some(target) = world.enemy_mut(enemy) else {
                log::debug!("strike ignored: enemy {} does not exist", enemy.get());
                return;
            };

            if !target.is_alive() {
                log::debug!("strike ignored: enemy {} is already dead", enemy.get());
                return;
            }

            target.apply_damage(damage);
            out_events.push(Event::EnemyDamaged {
                enemy,
                damage,
                remaining_hp: target.hp,
            });

            if !target.is_alive() {
                target.died_at = Some(tick);
                out_events.push(Event::EnemyDied { enemy });
            }
        }
        Command::BeginCooldown { ticks } => {
            if world.player.cooldown_remaining > 0 {
                log::debug!("cooldown already running, ignoring restart");
                return;
            }

            if ticks > 0 {
                world.player.cooldown_remaining = ticks;
                out_events.push(Event::CooldownStarted { ticks });
            }
        }
        Command::EquipSlot { slot } => match world.player.inventory.get(slot.index()) {
            Some(weapon) => {
                world.player.equipped = Some(slot.index());
                out_events.push(Event::WeaponEquipped {
                    slot,
                    weapon: weapon.name().to_owned(),
                });
            }
            None => {
                log::info!("no item present in slot {}", slot.number());
                out_events.push(Event::SlotEmpty { slot });
            }
        },
        Command::OpenObject { object } => {
            if let Some(chest) = world.objects.iter_mut().find(|chest| chest.id == object) {
                if !chest.collided {
                    chest.collided = true;
                    out_events.push(Event::ObjectOpened { object });
                }
            }
        }
        Command::RecordEnemyContact { enemy } => {
            let touching_live_enemy = world
                .enemies
                .iter()
                .any(|candidate| candidate.id == enemy && candidate.is_alive());
            if touching_live_enemy {
                out_events.push(Event::EnemyContact { enemy });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glade_core::{
        Animated, EnemySnapshot, EnemyView, ObjectSnapshot, ObjectView, PlayerSnapshot,
        TerrainGrid, TileSize, WeaponSlot,
    };
    use glam::Vec2;

    use super::{World, ENEMY_SIZE, OBJECT_SIZE};

    /// Provides read-only access to the installed terrain grid.
    #[must_use]
    pub fn terrain(world: &World) -> &TerrainGrid {
        &world.terrain
    }

    /// Unscaled tile dimensions.
    #[must_use]
    pub fn tile_size(world: &World) -> TileSize {
        world.tile_size
    }

    /// Size of the play area the player is clamped to.
    #[must_use]
    pub fn bounds(world: &World) -> Vec2 {
        world.bounds
    }

    /// Seed of the installed layout.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Number of regenerations that preceded the installed layout.
    #[must_use]
    pub fn generation(world: &World) -> u32 {
        world.generation
    }

    /// Reports the number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        let equipped = player
            .equipped
            .and_then(|index| player.inventory.get(index).cloned());
        PlayerSnapshot {
            position: player.position,
            size: player.size,
            hp: player.hp,
            facing: player.facing,
            equipped,
            equipped_slot: player.equipped.and_then(WeaponSlot::from_index),
            inventory_len: player.inventory.len(),
            cooldown_remaining: player.cooldown_remaining,
        }
    }

    /// Captures a read-only view of the enemies, including those still
    /// inside their death grace window.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let tick = world.tick_index;
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.position,
                    size: ENEMY_SIZE,
                    hp: enemy.hp,
                    alive: enemy.died_at.is_none(),
                    animation_frame: enemy.animation_frame(tick),
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the objects.
    #[must_use]
    pub fn object_view(world: &World) -> ObjectView {
        let tick = world.tick_index;
        ObjectView::from_snapshots(
            world
                .objects
                .iter()
                .map(|chest| ObjectSnapshot {
                    id: chest.id,
                    position: chest.position,
                    size: OBJECT_SIZE,
                    collided: chest.collided,
                    animation_frame: chest.animation_frame(tick),
                })
                .collect(),
        )
    }
}

#[derive(Debug)]
struct PlayerState {
    position: Vec2,
    size: Vec2,
    hp: i32,
    facing: Facing,
    inventory: Vec<Weapon>,
    equipped: Option<usize>,
    cooldown_remaining: u32,
}

#[derive(Debug)]
struct Enemy {
    id: EnemyId,
    position: Vec2,
    hp: f32,
    died_at: Option<u64>,
}

impl Damageable for Enemy {
    fn hp(&self) -> f32 {
        self.hp
    }

    fn apply_damage(&mut self, amount: f32) {
        self.hp -= amount;
    }
}

impl Animated for Enemy {
    fn animation_frame(&self, tick: u64) -> usize {
        match self.died_at {
            Some(died_at) => looping_frame(tick.saturating_sub(died_at), DEATH_ANIMATION_FRAMES),
            None => looping_frame(tick, IDLE_ANIMATION_FRAMES),
        }
    }
}

#[derive(Debug)]
struct Chest {
    id: ObjectId,
    position: Vec2,
    collided: bool,
}

impl Animated for Chest {
    fn animation_frame(&self, _tick: u64) -> usize {
        if self.collided {
            OPENED_CHEST_FRAME
        } else {
            0
        }
    }
}

fn clamp_to_bounds(position: Vec2, size: Vec2, bounds: Vec2) -> Vec2 {
    let max = (bounds - size).max(Vec2::ZERO);
    position.clamp(Vec2::ZERO, max)
}
