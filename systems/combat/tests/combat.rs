use glade_core::{
    Command, EnemyId, Event, FrameIntent, Placements, PlayerConfig, SessionConfig, TerrainGrid,
    WeaponSlot,
};
use glade_system_combat::Combat;
use glade_world::{self as world, query, World};
use glam::Vec2;

fn arena(enemies: Vec<Vec2>) -> World {
    let config = SessionConfig {
        seed: 11,
        grid_rows: 20,
        grid_cols: 25,
        player: PlayerConfig {
            spawn: [50.0, 50.0],
            ..PlayerConfig::default()
        },
        ..SessionConfig::default()
    };
    let mut world = World::new(&config).expect("config is valid");
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::InstallWorld {
            seed: config.seed,
            generation: 0,
            terrain: TerrainGrid::new(config.grid_cols, config.grid_rows),
            placements: Placements {
                objects: Vec::new(),
                enemies,
            },
        },
        &mut events,
    );
    world
}

fn run(world: &mut World, intent: FrameIntent) -> (Vec<Command>, Vec<Event>) {
    let mut commands = Vec::new();
    Combat::default().handle(
        &intent,
        &query::player(world),
        &query::enemy_view(world),
        &mut commands,
    );

    let mut events = Vec::new();
    for command in commands.clone() {
        world::apply(world, command, &mut events);
    }
    (commands, events)
}

fn tick(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
    events
}

fn attack() -> FrameIntent {
    FrameIntent {
        attack: true,
        ..FrameIntent::idle()
    }
}

fn select(number: u8) -> FrameIntent {
    FrameIntent {
        select_slot: WeaponSlot::new(number),
        ..FrameIntent::idle()
    }
}

fn hp(world: &World, id: u32) -> f32 {
    query::enemy_view(world)
        .get(EnemyId::new(id))
        .map(|enemy| enemy.hp)
        .expect("enemy exists")
}

#[test]
fn sword_swing_damages_adjacent_enemy_and_starts_cooldown() {
    let mut world = arena(vec![Vec2::new(55.0, 50.0)]);

    let (commands, _) = run(&mut world, attack());

    assert_eq!(
        commands,
        vec![
            Command::StrikeEnemy {
                enemy: EnemyId::new(0),
                damage: 1.0
            },
            Command::BeginCooldown { ticks: 25 },
        ]
    );
    assert!((hp(&world, 0) - 9.0).abs() < f32::EPSILON);
    let player = query::player(&world);
    assert!(player.cooldown_active());
    assert_eq!(player.cooldown_remaining, 25);
}

#[test]
fn cooldown_lasts_exactly_the_weapon_ticks() {
    let mut world = arena(vec![Vec2::new(55.0, 50.0)]);
    let _ = run(&mut world, attack());

    for step in 1..25 {
        let _ = tick(&mut world);
        assert!(
            query::player(&world).cooldown_active(),
            "cooldown ended early after {step} ticks"
        );
        let (commands, _) = run(&mut world, attack());
        assert!(commands.is_empty(), "attacked during cooldown at tick {step}");
    }

    let events = tick(&mut world);
    assert!(events.contains(&Event::CooldownElapsed));
    assert!(!query::player(&world).cooldown_active());

    let (commands, _) = run(&mut world, attack());
    assert!(commands.contains(&Command::BeginCooldown { ticks: 25 }));
    assert!((hp(&world, 0) - 8.0).abs() < f32::EPSILON);
}

#[test]
fn one_swing_hits_every_enemy_in_reach_and_spares_the_rest() {
    let mut world = arena(vec![
        Vec2::new(55.0, 50.0),
        Vec2::new(10.0, 90.0),
        Vec2::new(200.0, 50.0),
        Vec2::new(110.0, 50.0),
    ]);

    let _ = run(&mut world, attack());

    assert!((hp(&world, 0) - 9.0).abs() < f32::EPSILON);
    assert!((hp(&world, 1) - 9.0).abs() < f32::EPSILON);
    assert!((hp(&world, 2) - 10.0).abs() < f32::EPSILON);
    assert!(
        (hp(&world, 3) - 10.0).abs() < f32::EPSILON,
        "enemies on the reach border are out of range"
    );
}

#[test]
fn swing_without_targets_still_starts_cooldown() {
    let mut world = arena(vec![Vec2::new(500.0, 500.0)]);

    let (commands, events) = run(&mut world, attack());

    assert_eq!(commands, vec![Command::BeginCooldown { ticks: 25 }]);
    assert_eq!(events, vec![Event::CooldownStarted { ticks: 25 }]);
}

#[test]
fn enemies_die_at_zero_hp_and_stop_taking_hits() {
    let mut world = arena(vec![Vec2::new(55.0, 50.0)]);
    let _ = run(&mut world, select(2));

    let mut died = false;
    for _ in 0..4 {
        let (_, events) = run(&mut world, attack());
        died |= events.contains(&Event::EnemyDied {
            enemy: EnemyId::new(0),
        });
        for _ in 0..60 {
            let _ = tick(&mut world);
        }
    }

    assert!(died, "four mace hits must kill a 10 hp enemy");

    let (commands, _) = run(&mut world, attack());
    assert_eq!(commands, vec![Command::BeginCooldown { ticks: 60 }]);

    let enemy = *query::enemy_view(&world)
        .get(EnemyId::new(0))
        .expect("corpse stays during the grace window");
    assert!(!enemy.alive);
    assert!((enemy.hp + 2.0).abs() < f32::EPSILON, "dead enemies take no further damage");
}

#[test]
fn switching_to_an_empty_slot_reports_it_and_keeps_the_weapon() {
    let mut world = arena(Vec::new());
    let slot = WeaponSlot::new(5).expect("slot five is addressable");

    let (commands, events) = run(&mut world, select(5));

    assert_eq!(commands, vec![Command::EquipSlot { slot }]);
    assert_eq!(events, vec![Event::SlotEmpty { slot }]);
    assert_eq!(query::player(&world).equipped_slot, WeaponSlot::new(1));
}

#[test]
fn switching_keeps_a_running_cooldown() {
    let mut world = arena(vec![Vec2::new(55.0, 50.0)]);
    let _ = run(&mut world, attack());
    let _ = tick(&mut world);

    let (commands, _) = run(&mut world, select(4));

    assert_eq!(
        commands,
        vec![Command::EquipSlot {
            slot: WeaponSlot::new(4).expect("slot four exists")
        }]
    );
    let player = query::player(&world);
    assert_eq!(player.cooldown_remaining, 24);
    assert_eq!(
        player.equipped.map(|weapon| weapon.name().to_owned()),
        Some("Knife".to_owned())
    );
}

#[test]
fn attack_resolves_before_a_same_tick_switch() {
    let mut world = arena(vec![Vec2::new(55.0, 50.0)]);
    let intent = FrameIntent {
        attack: true,
        select_slot: WeaponSlot::new(2),
        ..FrameIntent::idle()
    };

    let _ = run(&mut world, intent);

    assert!((hp(&world, 0) - 9.0).abs() < f32::EPSILON, "sword damage applies");
    let player = query::player(&world);
    assert_eq!(player.cooldown_remaining, 25);
    assert_eq!(player.equipped_slot, WeaponSlot::new(2));
}
