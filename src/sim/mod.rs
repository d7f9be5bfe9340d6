//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (solids and entities in build order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod enemy;
pub mod level;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::resolve_move;
pub use enemy::Enemy;
pub use level::{LevelSession, build_level, find_spawn};
pub use player::Player;
pub use rect::Rect;
pub use state::{GameMode, GameState};
pub use tick::{TickInput, tick};
