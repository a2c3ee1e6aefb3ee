#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame loop that wires the world and the pure systems together.
//!
//! Each [`Session::tick`] runs the fixed order: input intake (regeneration
//! swap and the clock tick), combat, movement and collision, then object and
//! enemy contacts. The renderer reads the outcome through [`SceneView`].

mod driver;
mod scheduler;

use glade_core::{
    ClusterShapeMode, Command, ConfigError, EnemyView, Event, FrameIntent, ObjectView,
    PlayerSnapshot, SessionConfig, TerrainGrid, TileSize,
};
use glade_system_collision::Collision;
use glade_system_combat::Combat;
use glade_system_placement::place_entities;
use glade_system_terrain::{assign_variants, generate, regeneration_seed};
use glade_world::{self as world, query, World};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use driver::{run, IntentSource, Presenter, RunSummary};
pub use scheduler::FrameScheduler;

/// Whether the loop should keep going after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Run another tick.
    Continue,
    /// The tick carried a quit intent.
    Quit,
}

/// Read-only state handed to renderers after every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneView {
    /// Ticks processed so far.
    pub tick: u64,
    /// Seed of the installed layout.
    pub seed: u64,
    /// Number of regenerations that preceded the installed layout.
    pub generation: u32,
    /// Terrain kinds and variants per cell.
    pub terrain: TerrainGrid,
    /// Unscaled tile dimensions.
    pub tile_size: TileSize,
    /// Size of the play area in pixels.
    pub bounds: Vec2,
    /// Player state.
    pub player: PlayerSnapshot,
    /// Enemies, including corpses inside their grace window.
    pub enemies: EnemyView,
    /// Objects.
    pub objects: ObjectView,
}

/// A running play session.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    world: World,
    collision: Collision,
    combat: Combat,
    generation: u32,
    events: Vec<Event>,
}

impl Session {
    /// Validates the configuration and installs the initial layout.
    ///
    /// The initial layout always uses solid clusters; regenerations use the
    /// configured shape mode.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] found by [`SessionConfig::validate`].
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let world = World::new(&config)?;
        let collision = Collision::from_config(&config);
        let mut session = Self {
            config,
            world,
            collision,
            combat: Combat::default(),
            generation: 0,
            events: Vec::new(),
        };

        let seed = session.config.seed;
        let mut events = Vec::new();
        session.install(seed, ClusterShapeMode::Solid, &mut events);
        session.events = events;
        Ok(session)
    }

    /// Advances the session by one tick.
    pub fn tick(&mut self, intent: &FrameIntent) -> TickOutcome {
        let mut events = Vec::new();

        if intent.regenerate {
            self.generation = self.generation.saturating_add(1);
            let seed = regeneration_seed(self.config.seed, self.generation);
            log::info!("regenerating layout {} from seed {seed}", self.generation);
            self.install(seed, self.config.cluster_shape_mode, &mut events);
        }
        world::apply(&mut self.world, Command::Tick, &mut events);

        let mut commands = Vec::new();
        self.combat.handle(
            intent,
            &query::player(&self.world),
            &query::enemy_view(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.collision.handle(
            intent,
            &query::player(&self.world),
            query::terrain(&self.world),
            query::bounds(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.collision.detect_contacts(
            &query::player(&self.world),
            &query::enemy_view(&self.world),
            &query::object_view(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        for event in &events {
            log::debug!("tick {}: {event:?}", query::tick_index(&self.world));
        }
        self.events = events;

        if intent.quit {
            TickOutcome::Quit
        } else {
            TickOutcome::Continue
        }
    }

    /// Captures the scene for renderers.
    #[must_use]
    pub fn view(&self) -> SceneView {
        SceneView {
            tick: query::tick_index(&self.world),
            seed: query::seed(&self.world),
            generation: query::generation(&self.world),
            terrain: query::terrain(&self.world).clone(),
            tile_size: query::tile_size(&self.world),
            bounds: query::bounds(&self.world),
            player: query::player(&self.world),
            enemies: query::enemy_view(&self.world),
            objects: query::object_view(&self.world),
        }
    }

    /// Events produced by the most recent tick, or by installation before
    /// the first tick.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn install(&mut self, seed: u64, mode: ClusterShapeMode, events: &mut Vec<Event>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut terrain = generate(self.config.grid_rows, self.config.grid_cols, mode, &mut rng);
        let placements = place_entities(
            &terrain,
            self.config.tile_size,
            self.config.placement_mode,
            self.config.collision_mode,
            &mut rng,
        );
        assign_variants(&mut terrain, seed);
        if placements.objects.is_empty() || placements.enemies.is_empty() {
            log::warn!(
                "layout {} from seed {seed} is short: {} chests, {} enemies",
                self.generation,
                placements.objects.len(),
                placements.enemies.len()
            );
        }

        world::apply(
            &mut self.world,
            Command::InstallWorld {
                seed,
                generation: self.generation,
                terrain,
                placements,
            },
            events,
        );
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }
    }
}
