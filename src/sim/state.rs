//! Game state and mode machine
//!
//! One explicit value holds the whole simulation: mode, campaign position,
//! player and the current level session. `tick` mutates it; nothing lives in
//! globals. Levels are reloaded by rebuilding the session from its grid, so
//! a restart never has to un-mutate anything.

use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_TIME_SECS, VIEW_WIDTH};
use crate::levels;

use super::level::{LevelSession, build_level, find_spawn};
use super::player::Player;

/// Top-level mode. Every non-Playing mode has its own screen and its own
/// confirm-input effect, which is why these are one enum rather than flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Title,
    Playing,
    LevelClear,
    GameOver,
    Win,
}

/// Complete game state for one process: campaign, player, current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    /// Campaign grids, in play order
    pub levels: Vec<Vec<String>>,
    /// Index into `levels` of the current session
    pub level_index: usize,
    pub player: Player,
    pub session: LevelSession,
    /// Seconds left on the level countdown
    pub time_left: f32,
    /// Coins picked up in the current level (the player also keeps a total)
    pub level_coins: u32,
    /// Set when a quit intent (or the win screen) asks the frontend to exit
    #[serde(skip)]
    pub exit_requested: bool,
}

impl GameState {
    /// Fresh state on the title screen, with the built-in campaign loaded.
    pub fn new() -> Self {
        Self::with_levels(levels::builtin())
    }

    /// Fresh state over a custom campaign. The first level is built so the
    /// title screen has something to show behind it.
    pub fn with_levels(levels: Vec<Vec<String>>) -> Self {
        let session = build_level(levels.first().map_or(&[][..], Vec::as_slice));
        let (sx, sy) = find_spawn(&session.solids);
        let player = Player::new(sx, sy);
        Self {
            mode: GameMode::Title,
            levels,
            level_index: 0,
            player,
            session,
            time_left: LEVEL_TIME_SECS,
            level_coins: 0,
            exit_requested: false,
        }
    }

    /// Begin a new run: fresh player stats, first level, playing.
    pub fn start_run(&mut self) {
        self.player = Player::new(0, 0);
        self.start_level(0);
        self.mode = GameMode::Playing;
        log::info!("run started");
    }

    /// Load a level by index: rebuild the session, move the player to the
    /// spawn point and re-arm the countdown. Player stats (score, coins,
    /// lives, big state) are untouched so they carry across levels.
    pub fn start_level(&mut self, index: usize) {
        self.level_index = index;
        self.session = build_level(
            self.levels
                .get(index)
                .map_or(&[][..], Vec::as_slice),
        );
        let (sx, sy) = find_spawn(&self.session.solids);
        self.player.spawn = (sx, sy);
        self.player.body.rect.x = sx;
        self.player.body.rect.y = sy;
        self.player.body.vel = glam::Vec2::ZERO;
        self.level_coins = 0;
        self.time_left = LEVEL_TIME_SECS;
        log::info!("level {} loaded", index + 1);
    }

    /// Reload the current level in place. Lives are floored at one so a
    /// restart can't be used to continue a finished run.
    pub fn restart_level(&mut self) {
        self.player.lives = self.player.lives.max(1);
        let index = self.level_index;
        self.start_level(index);
    }

    /// Horizontal camera offset: keep the player centered, clamped to the
    /// world edges.
    pub fn camera_x(&self) -> i32 {
        let target = self.player.body.rect.center_x() - VIEW_WIDTH / 2;
        target.min(self.session.world_width - VIEW_WIDTH).max(0)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
