//! Axis-aligned boxes used for every collision test in the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle expressed in world pixels.
///
/// Boxes are derived from positions every tick and never stored on entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    origin: Vec2,
    size: Vec2,
}

impl BoundingBox {
    /// Constructs a box from its upper-left corner and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Upper-left corner of the box.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Width and height of the box.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Lower-right corner of the box.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    /// Reports whether the two boxes share interior area.
    ///
    /// Boxes that merely touch along an edge do not overlap, and boxes with a
    /// non-positive extent never overlap anything.
    #[must_use]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        let self_max = self.max();
        let other_max = other.max();
        self.origin.x < other_max.x
            && self_max.x > other.origin.x
            && self.origin.y < other_max.y
            && self_max.y > other.origin.y
    }

    /// Shrinks the box by the provided inset on each side.
    #[must_use]
    pub fn inset(&self, inset: BoxInset) -> Self {
        Self {
            origin: self.origin + Vec2::new(inset.left, inset.top),
            size: self.size - Vec2::new(inset.left + inset.right, inset.top + inset.bottom),
        }
    }

    fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

/// Amount trimmed from each side of a sprite to form its collision box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoxInset {
    /// Pixels removed from the left edge.
    pub left: f32,
    /// Pixels removed from the top edge.
    pub top: f32,
    /// Pixels removed from the right edge.
    pub right: f32,
    /// Pixels removed from the bottom edge.
    pub bottom: f32,
}

impl BoxInset {
    /// Inset that keeps the full sprite bounds.
    pub const NONE: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new inset from per-side amounts.
    #[must_use]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Reports whether applying the inset to `size` leaves a positive area.
    #[must_use]
    pub fn fits(&self, size: Vec2) -> bool {
        let sides = [self.left, self.top, self.right, self.bottom];
        if sides.iter().any(|side| !side.is_finite() || *side < 0.0) {
            return false;
        }

        size.x - self.left - self.right > 0.0 && size.y - self.top - self.bottom > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> BoundingBox {
        BoundingBox::from_origin_and_size(Vec2::new(x, y), Vec2::new(width, height))
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let left = rect(0.0, 0.0, 32.0, 32.0);
        let right = rect(32.0, 0.0, 32.0, 32.0);
        assert!(!left.overlaps(&right));
        assert!(!right.overlaps(&left));
    }

    #[test]
    fn partial_overlap_is_detected_in_both_directions() {
        let first = rect(10.0, 10.0, 20.0, 20.0);
        let second = rect(25.0, 5.0, 20.0, 10.0);
        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));
    }

    #[test]
    fn zero_sized_boxes_never_overlap() {
        let point = rect(5.0, 5.0, 0.0, 0.0);
        let area = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!point.overlaps(&area));
    }

    #[test]
    fn inset_shrinks_towards_the_feet() {
        let sprite = rect(100.0, 40.0, 60.0, 80.0);
        let feet = sprite.inset(BoxInset::new(15.0, 60.0, 15.0, 10.0));
        assert_eq!(feet.origin(), Vec2::new(115.0, 100.0));
        assert_eq!(feet.size(), Vec2::new(30.0, 10.0));
    }

    #[test]
    fn inset_must_leave_positive_area() {
        let size = Vec2::new(60.0, 80.0);
        assert!(BoxInset::new(15.0, 60.0, 15.0, 10.0).fits(size));
        assert!(!BoxInset::new(30.0, 0.0, 30.0, 0.0).fits(size));
        assert!(!BoxInset::new(-1.0, 0.0, 0.0, 0.0).fits(size));
    }
}
