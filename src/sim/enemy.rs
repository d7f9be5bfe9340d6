//! Enemy patrol controller
//!
//! Enemies walk at a fixed speed and reverse at walls and ledges. The ledge
//! check probes a body-sized rectangle ahead of the facing edge and below
//! the feet; no pathfinding, enemies are local hazards.

use serde::{Deserialize, Serialize};

use crate::consts::{
    ENEMY_HEIGHT, ENEMY_PROBE_AHEAD, ENEMY_PROBE_DOWN, ENEMY_SPEED, ENEMY_WIDTH,
};

use super::body::Body;
use super::collision::resolve_move;
use super::rect::Rect;

/// A patrolling enemy. Spawned at level load, removed for good when stomped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    /// Facing direction, -1 or 1
    pub dir: i32,
    pub speed: f32,
}

impl Enemy {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            body: Body::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
            dir: -1,
            speed: ENEMY_SPEED,
        }
    }

    /// Advance one tick: walk in the facing direction, fall, and flip when
    /// blocked by a wall or when there is no ground ahead.
    pub fn update(&mut self, solids: &[Rect]) {
        self.body.vel.x = self.dir as f32 * self.speed;
        self.body.apply_gravity();
        resolve_move(&mut self.body, solids);

        let probe = self
            .body
            .rect
            .shifted(self.dir * ENEMY_PROBE_AHEAD, ENEMY_PROBE_DOWN);
        let ground_ahead = solids.iter().any(|s| probe.overlaps(s));
        // vel.x was just set nonzero, so zero here means the resolver hit a wall
        if self.body.vel.x == 0.0 || !ground_ahead {
            self.dir = -self.dir;
        }
    }
}
