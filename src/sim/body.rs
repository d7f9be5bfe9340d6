//! Shared physics state for dynamic entities
//!
//! Player and enemy both move through the same integration and collision
//! pipeline; the only shared behavior is this body plus the resolver in
//! `collision`, so composition replaces any deeper hierarchy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, MAX_FALL_SPEED};

use super::rect::Rect;

/// Position, velocity and contact state shared by all dynamic bodies.
///
/// The rectangle is pixel-aligned; velocity is continuous and only its
/// truncation toward zero is applied to the rectangle each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub vel: Vec2,
    /// Set when the last vertical resolution pushed the body up onto a solid
    pub on_ground: bool,
    pub dead: bool,
}

impl Body {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            vel: Vec2::ZERO,
            on_ground: false,
            dead: false,
        }
    }

    /// Accumulate gravity, clamped to terminal fall speed
    pub fn apply_gravity(&mut self) {
        self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL_SPEED);
    }
}
