#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Melee combat resolution and weapon switching.

use glade_core::{Command, EnemyView, FrameIntent, PlayerSnapshot};
use glam::Vec2;

/// Pure system that converts attack and slot intents into combat commands.
#[derive(Debug, Default)]
pub struct Combat;

impl Combat {
    /// Emits the commands requested by the intent.
    ///
    /// An attack is resolved before a slot switch made during the same tick,
    /// so the swing always uses the weapon that was equipped when the tick
    /// started. Slot switches are forwarded unchecked; the world reports
    /// empty slots.
    pub fn handle(
        &self,
        intent: &FrameIntent,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if intent.attack {
            self.attack(player, enemies, out);
        }

        if let Some(slot) = intent.select_slot {
            log::debug!("switch to slot {} requested", slot.number());
            out.push(Command::EquipSlot { slot });
        }
    }

    fn attack(&self, player: &PlayerSnapshot, enemies: &EnemyView, out: &mut Vec<Command>) {
        let Some(weapon) = player.equipped.as_ref() else {
            log::info!("attack ignored: no weapon equipped");
            return;
        };

        if player.cooldown_active() {
            log::info!(
                "attack ignored: {} is cooling down for {} more ticks",
                weapon.name(),
                player.cooldown_remaining
            );
            return;
        }

        let mut hits = 0_usize;
        for enemy in enemies.alive() {
            if in_reach(player.position, enemy.position, weapon.range()) {
                hits += 1;
                out.push(Command::StrikeEnemy {
                    enemy: enemy.id,
                    damage: weapon.damage(),
                });
            }
        }

        log::debug!("{} swing hit {hits} enemies", weapon.name());
        out.push(Command::BeginCooldown {
            ticks: weapon.cooldown_ticks(),
        });
    }

}

/// Reports whether `target` lies strictly inside the square of half-width
/// `range` centred on `wielder`.
#[must_use]
pub fn in_reach(wielder: Vec2, target: Vec2, range: f32) -> bool {
    let offset = (target - wielder).abs();
    offset.x < range && offset.y < range
}
