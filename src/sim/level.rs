//! Level construction from tile grids
//!
//! A level is described as text rows, top to bottom, one character per tile:
//!
//! - `X` solid block
//! - `=` solid ground
//! - `t` thin ground cap (half-height solid in the lower half of its tile)
//! - `C` coin
//! - `E` enemy spawn
//! - `M` power-up
//! - `F` goal flag
//!
//! Anything else is empty. Building is deterministic: the same grid always
//! yields an equal, freshly allocated session, so reloading a level is a
//! rebuild rather than a mutation of the previous one.

use serde::{Deserialize, Serialize};

use crate::consts::{
    ENEMY_INSET_X, ENEMY_INSET_Y, PLAYER_HEIGHT, PLAYER_WIDTH, SPAWN_X, TILE, VIEW_HEIGHT,
};

use super::enemy::Enemy;
use super::rect::Rect;

/// Everything level-specific: geometry, pickups, enemies and the goal.
/// Replaced wholesale on every level (re)load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSession {
    pub solids: Vec<Rect>,
    pub coins: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Rect>,
    pub goal: Option<Rect>,
    pub world_width: i32,
}

/// Parse a tile grid into a fresh session.
///
/// Unknown characters are treated as empty. If a grid contains more than one
/// goal marker the first one wins and the rest are ignored with a warning.
pub fn build_level<S: AsRef<str>>(rows: &[S]) -> LevelSession {
    let mut session = LevelSession {
        solids: Vec::new(),
        coins: Vec::new(),
        enemies: Vec::new(),
        powerups: Vec::new(),
        goal: None,
        world_width: rows.first().map_or(0, |r| r.as_ref().len() as i32) * TILE,
    };

    for (j, row) in rows.iter().enumerate() {
        for (i, ch) in row.as_ref().chars().enumerate() {
            let x = i as i32 * TILE;
            let y = j as i32 * TILE;
            match ch {
                'X' | '=' => session.solids.push(Rect::new(x, y, TILE, TILE)),
                // Half-height cap in the lower half of the tile: the strip
                // reads as thin but still stops a falling body.
                't' => session
                    .solids
                    .push(Rect::new(x, y + TILE / 2, TILE, TILE / 2)),
                'C' => session
                    .coins
                    .push(Rect::new(x + TILE / 4, y + TILE / 4, TILE / 2, TILE / 2)),
                'E' => session
                    .enemies
                    .push(Enemy::new(x + ENEMY_INSET_X, y + ENEMY_INSET_Y)),
                'M' => session
                    .powerups
                    .push(Rect::new(x + 12, y + 12, TILE - 24, TILE - 24)),
                'F' => {
                    // Tall flagpole trigger spanning four tiles above the cell
                    let flag = Rect::new(x + TILE / 2 - 6, y - 4 * TILE, 12, 4 * TILE);
                    if session.goal.is_none() {
                        session.goal = Some(flag);
                    } else {
                        log::warn!("duplicate goal marker at column {i}, row {j}; ignoring");
                    }
                }
                _ => {}
            }
        }
    }

    session
}

/// Find the spawn point by dropping a player-sized probe from the top of the
/// world at the spawn column until it rests on a solid.
pub fn find_spawn(solids: &[Rect]) -> (i32, i32) {
    let mut probe = Rect::new(SPAWN_X, 0, PLAYER_WIDTH, PLAYER_HEIGHT);
    let mut fall = 0;
    loop {
        fall += 1;
        probe.y += fall;
        let landing = solids
            .iter()
            .filter(|s| probe.overlaps(s))
            .map(|s| s.top())
            .min();
        if let Some(top) = landing {
            probe.y = top - probe.h;
            break;
        }
        if probe.y > VIEW_HEIGHT {
            break;
        }
    }
    (probe.x, probe.y)
}
