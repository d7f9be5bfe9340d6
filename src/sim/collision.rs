//! Separated-axis AABB movement resolution
//!
//! The whole platformer feel hangs on this one function: each axis is moved
//! and resolved independently, horizontal first. Resolving per-axis instead
//! of sweeping avoids corner snagging, and the pass order is a tie-break at
//! corners that must not change.

use super::body::Body;
use super::rect::Rect;

/// Apply the body's velocity to its rectangle and clamp against solids.
///
/// Horizontal pass: translate by the truncated horizontal velocity, then for
/// every overlapping solid clamp the leading edge flush against it and zero
/// the horizontal velocity. Vertical pass runs the same way afterwards;
/// landing on a solid sets `on_ground`.
///
/// Clamps only tighten the position toward the nearest non-overlapping
/// placement along the axis, so iteration order over `solids` does not
/// matter for the final position.
pub fn resolve_move(body: &mut Body, solids: &[Rect]) {
    // Horizontal
    body.rect.x += body.vel.x as i32;
    for solid in solids {
        if !body.rect.overlaps(solid) {
            continue;
        }
        if body.vel.x > 0.0 {
            body.rect.x = solid.left() - body.rect.w;
        } else if body.vel.x < 0.0 {
            body.rect.x = solid.right();
        }
        body.vel.x = 0.0;
    }

    // Vertical
    body.rect.y += body.vel.y as i32;
    body.on_ground = false;
    for solid in solids {
        if !body.rect.overlaps(solid) {
            continue;
        }
        if body.vel.y > 0.0 {
            body.rect.y = solid.top() - body.rect.h;
            body.on_ground = true;
        } else if body.vel.y < 0.0 {
            body.rect.y = solid.bottom();
        }
        body.vel.y = 0.0;
    }
}
