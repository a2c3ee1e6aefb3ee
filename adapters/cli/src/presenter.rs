use std::io::Write;

use anyhow::{Context, Result};
use glade_core::{CellCoord, Event, TileKind};
use glade_session::{Presenter, SceneView};
use glam::Vec2;

/// Writes notable events as one line each.
#[derive(Debug)]
pub(crate) struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, scene: &SceneView, events: &[Event]) -> Result<()> {
        for event in events {
            if let Some(line) = describe(event) {
                writeln!(self.out, "[{:>5}] {line}", scene.tick)
                    .context("failed to write event")?;
            }
        }
        Ok(())
    }
}

fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::TimeAdvanced { .. } | Event::PlayerMoved { .. } | Event::EnemyContact { .. } => {
            return None
        }
        Event::WorldInstalled {
            seed,
            generation,
            enemies,
            objects,
        } => format!(
            "world {generation} installed from seed {seed}: {enemies} enemies, {objects} chests"
        ),
        Event::PlayerBlocked { at } => format!("blocked at ({:.0}, {:.0})", at.x, at.y),
        Event::EnemyDamaged {
            enemy,
            damage,
            remaining_hp,
        } => format!(
            "enemy {} hit for {damage} ({remaining_hp} hp left)",
            enemy.get()
        ),
        Event::EnemyDied { enemy } => format!("enemy {} died", enemy.get()),
        Event::EnemyRemoved { enemy } => format!("enemy {} removed", enemy.get()),
        Event::CooldownStarted { ticks } => format!("cooldown started ({ticks} ticks)"),
        Event::CooldownElapsed => "cooldown elapsed".to_owned(),
        Event::WeaponEquipped { slot, weapon } => {
            format!("equipped {weapon} from slot {}", slot.number())
        }
        Event::SlotEmpty { slot } => format!("no item present in slot {}", slot.number()),
        Event::ObjectOpened { object } => format!("chest {} opened", object.get()),
    };
    Some(line)
}

/// Draws the scene as text, one character per cell.
///
/// `.` grass, `~` water, `,` shoreline, `@` player, `E` enemy, `x` corpse,
/// `C` closed chest and `c` opened chest. Entities are placed by the centre
/// of their sprite.
pub(crate) fn render_map(scene: &SceneView) -> String {
    let columns = scene.terrain.columns();
    let rows = scene.terrain.rows();
    let mut cells: Vec<Vec<char>> = (0..rows)
        .map(|row| {
            (0..columns)
                .map(|column| {
                    let cell = CellCoord::new(column, row);
                    match scene.terrain.kind(cell) {
                        Some(TileKind::Water) => '~',
                        Some(TileKind::ShoreOutline) => ',',
                        Some(TileKind::Grass) | None => '.',
                    }
                })
                .collect()
        })
        .collect();

    let cell_size = Vec2::new(
        scene.bounds.x / columns.max(1) as f32,
        scene.bounds.y / rows.max(1) as f32,
    );
    let mut mark = |position: Vec2, size: Vec2, glyph: char| {
        let centre = (position + size / 2.0) / cell_size;
        if centre.x < 0.0 || centre.y < 0.0 {
            return;
        }
        let (column, row) = (centre.x as usize, centre.y as usize);
        if let Some(slot) = cells.get_mut(row).and_then(|line| line.get_mut(column)) {
            *slot = glyph;
        }
    };

    for object in scene.objects.iter() {
        mark(
            object.position,
            object.size,
            if object.collided { 'c' } else { 'C' },
        );
    }
    for enemy in scene.enemies.iter() {
        mark(enemy.position, enemy.size, if enemy.alive { 'E' } else { 'x' });
    }
    mark(scene.player.position, scene.player.size, '@');

    let mut map = String::with_capacity((columns as usize + 1) * rows as usize);
    for line in cells {
        map.extend(line);
        map.push('\n');
    }
    map
}
