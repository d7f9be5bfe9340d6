//! Player controller
//!
//! Input-driven horizontal motion with friction, gravity and jumping, plus
//! the grow/shrink power state and damage/respawn handling. All movement
//! goes through the shared resolver in `collision`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    BIG_DURATION_SECS, BIG_HEIGHT_DELTA, BIG_JUMP_SCALE, GROUND_FRICTION, GROW_SCORE, JUMP_SPEED,
    MAX_RUN_SPEED, PLAYER_HEIGHT, PLAYER_WIDTH, RUN_ACCEL, START_LIVES, STOP_EPSILON,
};

use super::body::Body;
use super::collision::resolve_move;
use super::rect::Rect;

/// The player: shared body plus run stats and the big-mode power state.
///
/// Created once per run; repositioned to its spawn point on death or level
/// (re)start rather than recreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Respawn position, refreshed on every level load
    pub spawn: (i32, i32),
    pub coins: u32,
    pub score: u32,
    pub lives: u32,
    pub big: bool,
    /// Seconds of big mode remaining; shrinks back at zero
    pub big_timer: f32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            spawn: (x, y),
            coins: 0,
            score: 0,
            lives: START_LIVES,
            big: false,
            big_timer: 0.0,
        }
    }

    /// Advance one tick: accelerate, integrate, resolve, apply friction and
    /// run down the big-mode timer.
    pub fn update(&mut self, left: bool, right: bool, solids: &[Rect], dt: f32) {
        let mut accel = 0.0;
        if left {
            accel -= RUN_ACCEL;
        }
        if right {
            accel += RUN_ACCEL;
        }
        self.body.vel.x = (self.body.vel.x + accel).clamp(-MAX_RUN_SPEED, MAX_RUN_SPEED);

        self.body.apply_gravity();
        resolve_move(&mut self.body, solids);

        // Friction only bites on the ground; snap to rest below the epsilon
        // so the body doesn't creep forever.
        if self.body.on_ground && self.body.vel.x != 0.0 {
            self.body.vel.x *= GROUND_FRICTION;
            if self.body.vel.x.abs() < STOP_EPSILON {
                self.body.vel.x = 0.0;
            }
        }

        if self.big {
            self.big_timer -= dt;
            if self.big_timer <= 0.0 {
                self.shrink();
            }
        }
    }

    /// Jump if grounded. Big bodies jump slightly lower.
    pub fn jump(&mut self) {
        if self.body.on_ground {
            self.body.vel.y = if self.big {
                JUMP_SPEED * BIG_JUMP_SCALE
            } else {
                JUMP_SPEED
            };
        }
    }

    /// Enter big mode: the rect grows upward so the feet stay planted, the
    /// timer re-arms and a score bonus lands. No-op if already big.
    pub fn grow(&mut self) {
        if self.big {
            return;
        }
        self.big = true;
        self.body.rect.h += BIG_HEIGHT_DELTA;
        self.body.rect.y -= BIG_HEIGHT_DELTA;
        self.big_timer = BIG_DURATION_SECS;
        self.score += GROW_SCORE;
    }

    /// Leave big mode, restoring the original height with the feet planted.
    /// No-op if not big.
    pub fn shrink(&mut self) {
        if !self.big {
            return;
        }
        self.big = false;
        self.body.rect.h -= BIG_HEIGHT_DELTA;
        self.body.rect.y += BIG_HEIGHT_DELTA;
    }

    /// Lose a life and respawn: the rect is rebuilt at the spawn point at
    /// base size, velocity zeroed and big state dropped.
    pub fn kill(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.body.rect = Rect::new(self.spawn.0, self.spawn.1, PLAYER_WIDTH, PLAYER_HEIGHT);
        self.body.vel = Vec2::ZERO;
        self.big = false;
        self.big_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SIM_DT, TILE};

    fn floor() -> Vec<Rect> {
        vec![Rect::new(-1000, 200, 4000, TILE)]
    }

    fn grounded_player() -> Player {
        let mut player = Player::new(0, 200 - PLAYER_HEIGHT);
        // Two settling ticks: gravity needs to accumulate a whole pixel of
        // motion before the landing sets on_ground
        for _ in 0..2 {
            player.update(false, false, &floor(), SIM_DT);
        }
        assert!(player.body.on_ground);
        player
    }

    #[test]
    fn accelerates_and_clamps_horizontal_speed() {
        let mut player = grounded_player();
        for _ in 0..60 {
            player.update(false, true, &floor(), SIM_DT);
        }
        // Friction runs after the clamp, so the cruise speed sits just below it
        assert!(player.body.vel.x > 0.0);
        assert!(player.body.vel.x <= MAX_RUN_SPEED);
    }

    #[test]
    fn opposite_intents_cancel() {
        let mut player = grounded_player();
        player.update(true, true, &floor(), SIM_DT);
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn friction_snaps_to_rest() {
        let mut player = grounded_player();
        player.body.vel.x = 1.0;
        for _ in 0..60 {
            player.update(false, false, &floor(), SIM_DT);
        }
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn jump_requires_ground() {
        let mut player = Player::new(0, 0);
        player.jump();
        assert_eq!(player.body.vel.y, 0.0);

        let mut player = grounded_player();
        player.jump();
        assert_eq!(player.body.vel.y, JUMP_SPEED);
    }

    #[test]
    fn big_jump_is_reduced() {
        let mut player = grounded_player();
        player.grow();
        player.jump();
        assert_eq!(player.body.vel.y, JUMP_SPEED * BIG_JUMP_SCALE);
    }

    #[test]
    fn grow_shrink_round_trip_restores_rect() {
        let mut player = Player::new(30, 400);
        let before = player.body.rect;
        player.grow();
        assert!(player.big);
        assert_eq!(player.body.rect.h, before.h + BIG_HEIGHT_DELTA);
        assert_eq!(player.body.rect.bottom(), before.bottom());
        player.shrink();
        assert!(!player.big);
        assert_eq!(player.body.rect, before);
    }

    #[test]
    fn grow_is_idempotent() {
        let mut player = Player::new(0, 0);
        player.grow();
        let after_first = (player.body.rect, player.big_timer, player.score);
        player.big_timer = 5.0;
        player.grow();
        assert_eq!(player.body.rect, after_first.0);
        assert_eq!(player.big_timer, 5.0);
        assert_eq!(player.score, after_first.2);
    }

    #[test]
    fn shrink_is_idempotent() {
        let mut player = Player::new(0, 0);
        let before = player.body.rect;
        player.shrink();
        assert_eq!(player.body.rect, before);
    }

    #[test]
    fn big_mode_times_out() {
        let mut player = grounded_player();
        player.grow();
        let ticks = (BIG_DURATION_SECS / SIM_DT) as i32 + 2;
        for _ in 0..ticks {
            player.update(false, false, &floor(), SIM_DT);
        }
        assert!(!player.big);
        assert_eq!(player.body.rect.h, PLAYER_HEIGHT);
    }

    #[test]
    fn kill_respawns_at_base_size() {
        let mut player = grounded_player();
        player.grow();
        player.body.vel = glam::Vec2::new(4.0, -3.0);
        let lives = player.lives;
        player.kill();
        assert_eq!(player.lives, lives - 1);
        assert_eq!(
            player.body.rect,
            Rect::new(player.spawn.0, player.spawn.1, PLAYER_WIDTH, PLAYER_HEIGHT)
        );
        assert_eq!(player.body.vel, glam::Vec2::ZERO);
        assert!(!player.big);
    }
}
