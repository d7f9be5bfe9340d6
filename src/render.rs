//! Rendering layer - all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands. World pixels map onto character cells at
//! half a tile per column and one tile per row.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use crate::consts::{TILE, VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::{GameMode, GameState, Rect};

/// World pixels per character cell, horizontally
const CELL_W: i32 = TILE / 2;
/// World pixels per character cell, vertically
const CELL_H: i32 = TILE;
/// Viewport size in cells
const VIEW_COLS: i32 = VIEW_WIDTH / CELL_W;
const VIEW_ROWS: i32 = VIEW_HEIGHT / CELL_H + 1;
/// Screen row where the world starts (row 0 is the HUD)
const WORLD_TOP: i32 = 1;

// Colour palette
const C_HUD: Color = Color::White;
const C_BLOCK: Color = Color::DarkYellow;
const C_CAP: Color = Color::Green;
const C_COIN: Color = Color::Yellow;
const C_POWERUP: Color = Color::Magenta;
const C_ENEMY: Color = Color::Red;
const C_PLAYER: Color = Color::Cyan;
const C_PLAYER_BIG: Color = Color::Magenta;
const C_FLAG: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Render one complete frame for the current mode.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.mode {
        GameMode::Title => draw_title(out)?,
        GameMode::Playing => draw_playing(out, state)?,
        GameMode::LevelClear => draw_banner(
            out,
            "COURSE CLEAR!",
            &format!(
                "Score: {:06}    Coins: {:02}    Lives: {}",
                state.player.score, state.player.coins, state.player.lives
            ),
            "Press Enter to continue",
        )?,
        GameMode::GameOver => draw_banner(
            out,
            "GAME OVER",
            &format!("Final Score: {:06}", state.player.score),
            "Press Enter to restart, Esc to quit",
        )?,
        GameMode::Win => draw_banner(
            out,
            "YOU WIN!",
            &format!(
                "Final Score: {:06}    Coins: {:02}",
                state.player.score, state.player.coins
            ),
            "Thanks for playing! Press Enter to exit",
        )?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, (VIEW_ROWS + WORLD_TOP) as u16 + 1))?;
    out.flush()
}

// ── Playing ──────────────────────────────────────────────────────────────────

fn draw_playing<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let camx = state.camera_x();

    draw_hud(out, state)?;

    for solid in &state.session.solids {
        // Ground caps fill only the lower half of their tile
        let (glyph, color) = if solid.h < TILE {
            ('▄', C_CAP)
        } else {
            ('█', C_BLOCK)
        };
        draw_rect(out, solid, camx, glyph, color)?;
    }

    for coin in &state.session.coins {
        draw_rect(out, coin, camx, 'o', C_COIN)?;
    }
    for item in &state.session.powerups {
        draw_rect(out, item, camx, '♦', C_POWERUP)?;
    }
    if let Some(goal) = state.session.goal {
        draw_rect(out, &goal, camx, '║', C_FLAG)?;
        if let Some((col, row)) = cell_at(goal.center_x(), goal.top(), camx) {
            put(out, col, row, '▶', C_FLAG)?;
        }
    }
    for enemy in &state.session.enemies {
        draw_rect(out, &enemy.body.rect, camx, 'Ö', C_ENEMY)?;
    }

    let player_color = if state.player.big { C_PLAYER_BIG } else { C_PLAYER };
    draw_rect(out, &state.player.body.rect, camx, '@', player_color)?;

    out.queue(cursor::MoveTo(0, (VIEW_ROWS + WORLD_TOP) as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D move   Z/Space jump   R restart   Esc quit"))?;
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "LEVEL {}    SCORE {:06}    COINS {:02}    LIVES {}    TIME {:03}",
        state.level_index + 1,
        state.player.score,
        state.level_coins,
        state.player.lives,
        state.time_left as i32
    )))?;
    if state.player.big {
        out.queue(style::SetForegroundColor(C_POWERUP))?;
        out.queue(Print("    BIG!"))?;
    }
    Ok(())
}

/// Stamp a glyph over every cell a world rect covers, clipped to the view.
fn draw_rect<W: Write>(
    out: &mut W,
    rect: &Rect,
    camx: i32,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    let col_start = (rect.left() - camx).div_euclid(CELL_W);
    let col_end = (rect.right() - 1 - camx).div_euclid(CELL_W);
    let row_start = rect.top().div_euclid(CELL_H);
    let row_end = (rect.bottom() - 1).div_euclid(CELL_H);
    for row in row_start..=row_end {
        if row < 0 || row >= VIEW_ROWS {
            continue;
        }
        for col in col_start..=col_end {
            if col < 0 || col >= VIEW_COLS {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, (row + WORLD_TOP) as u16))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

/// Cell coordinates for a world position, if it is inside the view.
fn cell_at(x: i32, y: i32, camx: i32) -> Option<(u16, u16)> {
    let col = (x - camx).div_euclid(CELL_W);
    let row = y.div_euclid(CELL_H);
    if col < 0 || col >= VIEW_COLS || row < 0 || row >= VIEW_ROWS {
        return None;
    }
    Some((col as u16, (row + WORLD_TOP) as u16))
}

fn put<W: Write>(out: &mut W, col: u16, row: u16, glyph: char, color: Color) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Screens ──────────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W) -> std::io::Result<()> {
    let lines: [(&str, Color); 5] = [
        ("B L O C K H O P", Color::Cyan),
        ("A small retro platformer", C_HUD),
        ("Collect coins, grab power-ups, stomp enemies, reach the flag", C_HINT),
        ("← → / A D move   Z/Space jump   R restart   Esc quit", C_HINT),
        ("Press Enter to start", C_HUD),
    ];
    draw_centered(out, &lines)
}

fn draw_banner<W: Write>(
    out: &mut W,
    headline: &str,
    stats: &str,
    hint: &str,
) -> std::io::Result<()> {
    let lines: [(&str, Color); 3] = [
        (headline, Color::Yellow),
        (stats, C_HUD),
        (hint, C_HINT),
    ];
    draw_centered(out, &lines)
}

fn draw_centered<W: Write>(out: &mut W, lines: &[(&str, Color)]) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let top = (height / 2).saturating_sub(lines.len() as u16);
    for (i, (text, color)) in lines.iter().enumerate() {
        let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, top + 2 * i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    Ok(())
}
