//! Axis-aligned collision detection and contact classification
//!
//! Everything in this game is an axis-aligned box. Vertical contacts are
//! classified by comparing the moving box's pre-step edges against the
//! platform's edges: if the bottom edge was at or above the platform top
//! before the step, the overlap is a landing, and mirrored for the
//! ceiling. Any remaining overlap is a horizontal contact on the side of
//! travel, with no pre-step condition, so even a pre-existing overlap
//! resolves once the box moves. A box moving fast enough to start and end
//! a step on opposite sides of a thin platform produces no overlap and
//! passes through; that is accepted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict AABB overlap test (touching edges do not overlap)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Which side of a platform the moving box struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Came down onto the platform top
    Landing,
    /// Rose into the platform underside
    Ceiling,
    /// Struck the platform while moving right (wall on the right)
    WallRight,
    /// Struck the platform while moving left (wall on the left)
    WallLeft,
}

/// Classify an overlap between a moved box and a platform.
///
/// `moved` is the box after integration this step and `step` is the
/// displacement just applied, so `moved.pos - step` recovers the pre-step
/// position. Vertical contacts are checked first; anything else is a wall
/// hit on the side of travel, and only a horizontally stationary overlap
/// classifies as no contact.
pub fn classify_contact(moved: &Rect, step: Vec2, platform: &Rect) -> Option<Contact> {
    if step.y > 0.0 && moved.bottom() - step.y <= platform.top() {
        Some(Contact::Landing)
    } else if step.y < 0.0 && moved.top() - step.y >= platform.bottom() {
        Some(Contact::Ceiling)
    } else if step.x > 0.0 {
        Some(Contact::WallRight)
    } else if step.x < 0.0 {
        Some(Contact::WallLeft)
    } else {
        None
    }
}
