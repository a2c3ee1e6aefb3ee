use glade_core::{
    BoxInset, CellCoord, CollisionMode, CollisionPolicy, Command, Facing, FrameIntent, Placements,
    SessionConfig, TerrainGrid, TileKind,
};
use glade_system_collision::{Collision, CollisionEngine};
use glade_world::{self as world, query, World};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn engine(mode: CollisionMode) -> CollisionEngine {
    CollisionEngine::new(
        CollisionPolicy {
            mode,
            overlap_threshold: 2,
            actor_inset: BoxInset::NONE,
        },
        Vec2::splat(32.0),
    )
}

fn flood(grid: &mut TerrainGrid, cells: &[(u32, u32)], kind: TileKind) {
    for (column, row) in cells {
        assert!(grid.set_kind(CellCoord::new(*column, *row), kind));
    }
}

#[test]
fn moving_past_the_left_edge_clamps_to_zero() {
    let config = SessionConfig::default();
    let engine = CollisionEngine::new(config.collision_policy(), config.player_size());
    let grid = TerrainGrid::new(25, 20);

    let resolution = engine.resolve_move(
        Vec2::new(0.0, 50.0),
        Vec2::new(-5.0, 0.0),
        &grid,
        config.bounds(),
    );

    assert_eq!(resolution.position, Vec2::new(0.0, 50.0));
    assert!(!resolution.blocked, "clamping is not a rejection");
}

#[test]
fn tolerant_mode_permits_two_overlaps_and_blocks_three() {
    let engine = engine(CollisionMode::Tolerant);
    let bounds = Vec2::splat(128.0);
    let current = Vec2::new(20.0, 16.0);
    let delta = Vec2::new(-4.0, 0.0);

    let mut grid = TerrainGrid::new(4, 4);
    flood(&mut grid, &[(0, 0), (1, 0)], TileKind::Water);
    let permitted = engine.resolve_move(current, delta, &grid, bounds);
    assert_eq!(permitted.overlaps, 2);
    assert!(!permitted.blocked);
    assert_eq!(permitted.position, Vec2::new(16.0, 16.0));

    flood(&mut grid, &[(0, 1)], TileKind::Water);
    let blocked = engine.resolve_move(current, delta, &grid, bounds);
    assert_eq!(blocked.overlaps, 3);
    assert!(blocked.blocked);
    assert_eq!(blocked.position, current);
}

#[test]
fn shoreline_blocks_only_in_strict_mode() {
    let bounds = Vec2::splat(128.0);
    let mut grid = TerrainGrid::new(4, 4);
    flood(&mut grid, &[(2, 2)], TileKind::ShoreOutline);

    let current = Vec2::new(32.0, 64.0);
    let delta = Vec2::new(5.0, 0.0);

    let strict = engine(CollisionMode::Strict).resolve_move(current, delta, &grid, bounds);
    assert!(strict.blocked);
    assert_eq!(strict.position, current);

    let tolerant = engine(CollisionMode::Tolerant).resolve_move(current, delta, &grid, bounds);
    assert!(!tolerant.blocked);
    assert_eq!(tolerant.overlaps, 0);
}

#[test]
fn touching_a_water_edge_does_not_block() {
    let bounds = Vec2::splat(128.0);
    let mut grid = TerrainGrid::new(4, 4);
    flood(&mut grid, &[(2, 0)], TileKind::Water);

    let resolution =
        engine(CollisionMode::Strict).resolve_move(Vec2::ZERO, Vec2::new(32.0, 0.0), &grid, bounds);
    assert!(!resolution.blocked);
    assert_eq!(resolution.position, Vec2::new(32.0, 0.0));
}

#[test]
fn tiles_scale_to_the_play_area() {
    let mut grid = TerrainGrid::new(4, 4);
    flood(&mut grid, &[(1, 0)], TileKind::Water);

    // On a 256 pixel play area each cell spans 64 pixels, so x = 40 already
    // reaches into cell (1, 0).
    let resolution = engine(CollisionMode::Strict).resolve_move(
        Vec2::ZERO,
        Vec2::new(40.0, 0.0),
        &grid,
        Vec2::splat(256.0),
    );
    assert!(resolution.blocked);
}

#[test]
fn resolved_positions_always_stay_in_bounds() {
    let config = SessionConfig {
        collision_mode: CollisionMode::Strict,
        ..SessionConfig::default()
    };
    let engine = CollisionEngine::new(config.collision_policy(), config.player_size());
    let bounds = config.bounds();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut grid = TerrainGrid::new(25, 20);
    flood(&mut grid, &[(5, 5), (6, 5), (12, 10), (20, 3)], TileKind::Water);

    let mut position = Vec2::new(100.0, 100.0);
    for _ in 0..2_000 {
        let delta = Vec2::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));
        position = engine.resolve_move(position, delta, &grid, bounds).position;
        assert!(position.x >= 0.0 && position.x <= bounds.x - 60.0, "{position:?}");
        assert!(position.y >= 0.0 && position.y <= bounds.y - 80.0, "{position:?}");
    }
}

#[test]
fn movement_intent_emits_resolved_move_with_facing() {
    let config = SessionConfig::default();
    let collision = Collision::from_config(&config);
    let world = World::new(&config).expect("default config is valid");
    let player = query::player(&world);
    let intent = FrameIntent {
        move_left: true,
        move_down: true,
        ..FrameIntent::idle()
    };

    let mut commands = Vec::new();
    collision.handle(
        &intent,
        &player,
        query::terrain(&world),
        query::bounds(&world),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::MovePlayer {
            destination: Vec2::new(0.0, 5.0),
            facing: Some(Facing::Left),
            blocked: false,
        }]
    );
}

#[test]
fn idle_intent_emits_nothing() {
    let config = SessionConfig::default();
    let collision = Collision::from_config(&config);
    let world = World::new(&config).expect("default config is valid");

    let mut commands = Vec::new();
    collision.handle(
        &FrameIntent::idle(),
        &query::player(&world),
        query::terrain(&world),
        query::bounds(&world),
        &mut commands,
    );
    assert!(commands.is_empty());
    assert_eq!(collision.engine().collision_box(Vec2::ZERO).size(), Vec2::new(30.0, 10.0));
}

#[test]
fn contacts_open_fresh_objects_and_ignore_dead_enemies() {
    let config = SessionConfig::default();
    let collision = Collision::from_config(&config);
    let mut world = World::new(&config).expect("default config is valid");
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::InstallWorld {
            seed: 11,
            generation: 0,
            terrain: TerrainGrid::new(25, 20),
            placements: Placements {
                objects: vec![Vec2::new(32.0, 32.0), Vec2::new(400.0, 400.0)],
                enemies: vec![Vec2::new(0.0, 64.0), Vec2::new(20.0, 0.0)],
            },
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::StrikeEnemy {
            enemy: glade_core::EnemyId::new(1),
            damage: 100.0,
        },
        &mut events,
    );

    let mut commands = Vec::new();
    collision.detect_contacts(
        &query::player(&world),
        &query::enemy_view(&world),
        &query::object_view(&world),
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![
            Command::OpenObject {
                object: glade_core::ObjectId::new(0)
            },
            Command::RecordEnemyContact {
                enemy: glade_core::EnemyId::new(0)
            },
        ]
    );

    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let mut repeated = Vec::new();
    collision.detect_contacts(
        &query::player(&world),
        &query::enemy_view(&world),
        &query::object_view(&world),
        &mut repeated,
    );
    assert!(
        !repeated
            .iter()
            .any(|command| matches!(command, Command::OpenObject { .. })),
        "opened objects are not reported twice"
    );
}
