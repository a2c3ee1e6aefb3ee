//! Entity tags and the capability traits composed onto entity records.

use crate::BoundingBox;

/// Ticks each animation frame stays on screen (200 ms at 60 Hz).
pub const ANIMATION_FRAME_TICKS: u64 = 12;

/// Kind tag carried by every simulated entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The controllable character.
    Player,
    /// A hostile creature that can be struck.
    Enemy,
    /// A pickup that opens on first contact.
    Chest,
    /// A terrain cell taking part in collision.
    Tile,
}

/// Horizontal direction the player sprite faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Facing toward decreasing x.
    Left,
    /// Facing toward increasing x.
    #[default]
    Right,
}

/// Entities that carry hit points.
pub trait Damageable {
    /// Remaining hit points.
    fn hp(&self) -> f32;

    /// Removes `amount` hit points.
    fn apply_damage(&mut self, amount: f32);

    /// Entities stay alive while they hold a positive amount of hit points.
    fn is_alive(&self) -> bool {
        self.hp() > 0.0
    }
}

/// Entities that expose an axis-aligned collision box.
pub trait Collidable {
    /// Kind tag of the entity behind the box.
    fn entity_kind(&self) -> EntityKind;

    /// Current collision box, or `None` when the entity no longer collides.
    fn collision_box(&self) -> Option<BoundingBox>;
}

/// Entities whose sprite cycles through frames.
pub trait Animated {
    /// Frame index to draw at the provided simulation tick.
    fn animation_frame(&self, tick: u64) -> usize;
}

/// Maps an elapsed tick count onto a looping animation of `frames` frames.
#[must_use]
pub fn looping_frame(elapsed_ticks: u64, frames: usize) -> usize {
    if frames == 0 {
        return 0;
    }

    let step = elapsed_ticks / ANIMATION_FRAME_TICKS;
    (step % frames as u64) as usize
}
