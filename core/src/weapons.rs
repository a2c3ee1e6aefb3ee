//! Immutable weapon records and the default catalog.

use serde::{Deserialize, Serialize};

/// Combat stats of a melee weapon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weapon {
    name: String,
    damage: f32,
    cooldown_ticks: u32,
    range: f32,
    visual_scale: u32,
}

impl Weapon {
    /// Creates a weapon record.
    #[must_use]
    pub fn new<T>(name: T, damage: f32, cooldown_ticks: u32, range: f32, visual_scale: u32) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            damage,
            cooldown_ticks,
            range,
            visual_scale,
        }
    }

    /// Display name of the weapon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hit points removed from every enemy struck by one swing.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Ticks that must elapse before the weapon can swing again.
    #[must_use]
    pub const fn cooldown_ticks(&self) -> u32 {
        self.cooldown_ticks
    }

    /// Half-width of the square reach around the wielder, in pixels.
    #[must_use]
    pub const fn range(&self) -> f32 {
        self.range
    }

    /// Sprite edge length used by renderers.
    #[must_use]
    pub const fn visual_scale(&self) -> u32 {
        self.visual_scale
    }
}

/// Weapons handed to the player at session start, in slot order.
#[must_use]
pub fn default_catalog() -> Vec<Weapon> {
    vec![
        Weapon::new("Sword", 1.0, 25, 60.0, 50),
        Weapon::new("Mace", 3.0, 60, 25.0, 50),
        Weapon::new("Spear", 2.0, 40, 100.0, 60),
        Weapon::new("Knife", 0.75, 17, 50.0, 50),
    ]
}

/// One-based inventory slot addressed by a weapon switch intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeaponSlot(u8);

impl WeaponSlot {
    /// Creates a slot from its one-based number. Slot zero does not exist.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number == 0 {
            None
        } else {
            Some(Self(number))
        }
    }

    /// Creates the slot addressing the provided zero-based inventory index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let number = index.checked_add(1)?;
        u8::try_from(number).ok().map(Self)
    }

    /// One-based slot number.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.0
    }

    /// Zero-based inventory index addressed by the slot.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize - 1
    }
}
