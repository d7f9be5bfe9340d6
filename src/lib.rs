//! Blockhop - a retro side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `levels`: Built-in campaign, described as tile grids
//! - `render`: Terminal rendering (crossterm)

pub mod levels;
pub mod render;
pub mod sim;

/// Game configuration constants
///
/// Tuned values live here rather than at call sites so the game feel can be
/// adjusted in one place.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Viewport dimensions in world pixels
    pub const VIEW_WIDTH: i32 = 960;
    pub const VIEW_HEIGHT: i32 = 540;

    /// Tile edge length in world pixels
    pub const TILE: i32 = 48;

    /// Player body size (slightly narrower and shorter than a tile)
    pub const PLAYER_WIDTH: i32 = TILE - 12;
    pub const PLAYER_HEIGHT: i32 = TILE - 8;
    /// Horizontal position the spawn-point drop scan starts from
    pub const SPAWN_X: i32 = 60;

    /// Horizontal acceleration per tick while a direction is held
    pub const RUN_ACCEL: f32 = 0.9;
    /// Horizontal speed clamp (pixels per tick)
    pub const MAX_RUN_SPEED: f32 = 6.0;
    /// Multiplicative friction applied per tick while grounded
    pub const GROUND_FRICTION: f32 = 0.82;
    /// Below this horizontal speed, friction snaps the body to a stop
    pub const STOP_EPSILON: f32 = 0.1;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.6;
    /// Terminal fall speed (pixels per tick)
    pub const MAX_FALL_SPEED: f32 = 20.0;
    /// Jump impulse (negative is up)
    pub const JUMP_SPEED: f32 = -12.0;
    /// Jump impulse scale while big (heavier body, slightly lower jump)
    pub const BIG_JUMP_SCALE: f32 = 0.95;

    /// Seconds of big mode granted by a power-up
    pub const BIG_DURATION_SECS: f32 = 12.0;
    /// Height gained while big; the top edge moves up by the same amount
    pub const BIG_HEIGHT_DELTA: i32 = TILE / 2;

    /// Enemy body size and placement inset within its spawn tile
    pub const ENEMY_WIDTH: i32 = TILE - 14;
    pub const ENEMY_HEIGHT: i32 = TILE - 16;
    pub const ENEMY_INSET_X: i32 = 6;
    pub const ENEMY_INSET_Y: i32 = 8;
    /// Patrol speed (pixels per tick)
    pub const ENEMY_SPEED: f32 = 1.2;
    /// Ledge probe offsets: ahead of the facing edge, and down past the feet
    pub const ENEMY_PROBE_AHEAD: i32 = 4;
    pub const ENEMY_PROBE_DOWN: i32 = 2 + TILE / 2;

    /// Max distance between player bottom and enemy top that still counts
    /// as a stomp rather than a side hit
    pub const STOMP_TOLERANCE: i32 = 16;
    /// Bounce impulse after a stomp, as a fraction of the jump impulse
    pub const STOMP_BOUNCE_SCALE: f32 = 0.6;

    /// Score bonuses
    pub const COIN_SCORE: u32 = 100;
    pub const STOMP_SCORE: u32 = 200;
    pub const GROW_SCORE: u32 = 500;

    /// Lives at the start of a run
    pub const START_LIVES: u32 = 3;
    /// Level countdown in seconds; expiry costs a life and re-arms
    pub const LEVEL_TIME_SECS: f32 = 300.0;
    /// How far below the viewport the player must fall to die
    pub const FALL_KILL_MARGIN: i32 = 200;
}
