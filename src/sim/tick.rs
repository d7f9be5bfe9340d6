//! Fixed timestep simulation tick
//!
//! Advances the whole game by one step: mode transitions, player and enemy
//! movement, pickups, stomp-vs-damage resolution, the level countdown and
//! the goal check. Anomalies are absorbed into next-tick state; nothing in
//! here panics or returns an error.

use crate::consts::{
    COIN_SCORE, FALL_KILL_MARGIN, JUMP_SPEED, LEVEL_TIME_SECS, STOMP_BOUNCE_SCALE, STOMP_SCORE,
    STOMP_TOLERANCE, VIEW_HEIGHT,
};

use super::state::{GameMode, GameState};

/// Input intents for a single tick.
///
/// `left`/`right` reflect held keys; the rest are one-shot and cleared by
/// the caller after the tick they were delivered on. Intents that make no
/// sense in the current mode are ignored.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub confirm: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Quit works from any mode and is observed before anything else moves
    if input.quit {
        state.exit_requested = true;
        return;
    }

    match state.mode {
        GameMode::Title => {
            if input.confirm {
                state.start_run();
            }
        }
        GameMode::Playing => playing_tick(state, input, dt),
        GameMode::LevelClear => {
            if input.confirm {
                let next = state.level_index + 1;
                if next >= state.levels.len() {
                    state.mode = GameMode::Win;
                    log::info!("campaign complete");
                } else {
                    state.start_level(next);
                    state.mode = GameMode::Playing;
                }
            }
        }
        GameMode::GameOver => {
            // A game over restarts the whole run, not just the level
            if input.confirm {
                state.start_run();
            }
        }
        GameMode::Win => {
            if input.confirm {
                state.exit_requested = true;
            }
        }
    }
}

fn playing_tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart_level();
        return;
    }

    if input.jump {
        state.player.jump();
    }
    state
        .player
        .update(input.left, input.right, &state.session.solids, dt);

    collect_coins(state);
    collect_powerups(state);

    {
        let session = &mut state.session;
        let solids = &session.solids;
        for enemy in &mut session.enemies {
            enemy.update(solids);
        }
    }

    resolve_enemy_contacts(state);

    // Falling far below the viewport costs a life
    if state.player.body.rect.top() > VIEW_HEIGHT + FALL_KILL_MARGIN {
        state.player.kill();
        check_lives(state);
    }

    // Level countdown: expiry is a kill and a fresh timer, not a game over
    state.time_left -= dt;
    if state.time_left <= 0.0 {
        state.player.kill();
        state.time_left = LEVEL_TIME_SECS;
        check_lives(state);
    }

    // Goal last: effects already applied this tick stand
    if let Some(goal) = state.session.goal {
        if state.player.body.rect.overlaps(&goal) {
            state.mode = GameMode::LevelClear;
            log::info!("level {} clear", state.level_index + 1);
        }
    }
}

/// Two-phase coin pickup: gather overlapping coins, then remove them.
fn collect_coins(state: &mut GameState) {
    let picked: Vec<usize> = state
        .session
        .coins
        .iter()
        .enumerate()
        .filter(|(_, coin)| state.player.body.rect.overlaps(coin))
        .map(|(i, _)| i)
        .collect();
    for i in picked.into_iter().rev() {
        state.session.coins.remove(i);
        state.player.coins += 1;
        state.level_coins += 1;
        state.player.score += COIN_SCORE;
    }
}

fn collect_powerups(state: &mut GameState) {
    let picked: Vec<usize> = state
        .session
        .powerups
        .iter()
        .enumerate()
        .filter(|(_, item)| state.player.body.rect.overlaps(item))
        .map(|(i, _)| i)
        .collect();
    for i in picked.into_iter().rev() {
        state.session.powerups.remove(i);
        state.player.grow();
    }
}

/// Stomp or get hurt. A falling player whose feet are within the stomp
/// tolerance of an enemy's head destroys it and bounces; any other contact
/// is a hit, which shrinks a big player or costs a small one a life.
fn resolve_enemy_contacts(state: &mut GameState) {
    let mut stomped: Vec<usize> = Vec::new();
    let mut lives_out = false;

    for (i, enemy) in state.session.enemies.iter().enumerate() {
        if !state.player.body.rect.overlaps(&enemy.body.rect) {
            continue;
        }
        let falling = state.player.body.vel.y > 0.0;
        let gap = state.player.body.rect.bottom() - enemy.body.rect.top();
        if falling && gap < STOMP_TOLERANCE {
            stomped.push(i);
            state.player.body.vel.y = JUMP_SPEED * STOMP_BOUNCE_SCALE;
            state.player.score += STOMP_SCORE;
        } else if state.player.big {
            state.player.shrink();
        } else {
            state.player.kill();
            if state.player.lives == 0 {
                lives_out = true;
            }
        }
    }

    for i in stomped.into_iter().rev() {
        state.session.enemies.remove(i);
    }
    if lives_out {
        state.mode = GameMode::GameOver;
        log::info!("out of lives");
    }
}

fn check_lives(state: &mut GameState) {
    if state.player.lives == 0 {
        state.mode = GameMode::GameOver;
        log::info!("out of lives");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SIM_DT, START_LIVES};
    use crate::sim::rect::Rect;

    fn campaign(grids: &[&[&str]]) -> Vec<Vec<String>> {
        grids
            .iter()
            .map(|g| g.iter().map(|r| r.to_string()).collect())
            .collect()
    }

    fn one_level() -> Vec<Vec<String>> {
        campaign(&[&[
            "                              ",
            "                              ",
            "                       F      ",
            "==============================",
        ]])
    }

    fn playing_state() -> GameState {
        let mut state = GameState::with_levels(one_level());
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.mode, GameMode::Playing);
        state
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn title_waits_for_confirm() {
        let mut state = GameState::with_levels(one_level());
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.mode, GameMode::Title);
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn quit_requests_exit_from_any_mode() {
        let mut state = GameState::with_levels(one_level());
        tick(&mut state, &TickInput { quit: true, ..Default::default() }, SIM_DT);
        assert!(state.exit_requested);

        let mut state = playing_state();
        tick(&mut state, &TickInput { quit: true, ..Default::default() }, SIM_DT);
        assert!(state.exit_requested);
    }

    #[test]
    fn coin_pickup_scores_once() {
        let mut state = playing_state();
        // Drop a coin onto the player
        let coin = state.player.body.rect;
        state.session.coins = vec![coin];
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.session.coins.is_empty());
        assert_eq!(state.player.coins, 1);
        assert_eq!(state.level_coins, 1);
        assert_eq!(state.player.score, COIN_SCORE);

        // The same spot ticks again without any further effect
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.player.coins, 1);
        assert_eq!(state.player.score, COIN_SCORE);
    }

    #[test]
    fn powerup_triggers_grow() {
        let mut state = playing_state();
        state.session.powerups = vec![state.player.body.rect];
        tick(&mut state, &idle(), SIM_DT);
        assert!(state.session.powerups.is_empty());
        assert!(state.player.big);
        assert_eq!(state.player.score, crate::consts::GROW_SCORE);
    }

    #[test]
    fn stomp_destroys_enemy_and_bounces() {
        let mut state = playing_state();
        let player_rect = state.player.body.rect;
        // Enemy directly under the player's feet, head just overlapping
        let enemy = crate::sim::Enemy::new(player_rect.x, player_rect.bottom() - 4);
        state.session.enemies = vec![enemy];
        state.player.body.vel.y = 5.0;

        resolve_enemy_contacts(&mut state);
        assert!(state.session.enemies.is_empty());
        assert_eq!(state.player.body.vel.y, JUMP_SPEED * STOMP_BOUNCE_SCALE);
        assert_eq!(state.player.score, STOMP_SCORE);
        assert_eq!(state.player.lives, START_LIVES);
    }

    #[test]
    fn side_contact_kills_small_player() {
        let mut state = playing_state();
        let player_rect = state.player.body.rect;
        let enemy = crate::sim::Enemy::new(player_rect.x + 10, player_rect.y);
        state.session.enemies = vec![enemy];
        state.player.body.vel.y = 0.0;

        resolve_enemy_contacts(&mut state);
        assert_eq!(state.session.enemies.len(), 1);
        assert_eq!(state.player.lives, START_LIVES - 1);
        assert_eq!(
            (state.player.body.rect.x, state.player.body.rect.y),
            state.player.spawn
        );
        assert_eq!(state.player.body.vel, glam::Vec2::ZERO);
    }

    #[test]
    fn falling_outside_stomp_tolerance_is_still_damage() {
        let mut state = playing_state();
        let player_rect = state.player.body.rect;
        // Deep overlap: the player's feet are well past the enemy's head
        let enemy = crate::sim::Enemy::new(
            player_rect.x,
            player_rect.bottom() - STOMP_TOLERANCE - 8,
        );
        state.session.enemies = vec![enemy];
        state.player.body.vel.y = 5.0;

        resolve_enemy_contacts(&mut state);
        assert_eq!(state.session.enemies.len(), 1);
        assert_eq!(state.player.lives, START_LIVES - 1);
    }

    #[test]
    fn side_contact_shrinks_big_player() {
        let mut state = playing_state();
        state.player.grow();
        let player_rect = state.player.body.rect;
        let enemy = crate::sim::Enemy::new(player_rect.x + 10, player_rect.bottom() - 20);
        state.session.enemies = vec![enemy];
        state.player.body.vel.y = 0.0;

        resolve_enemy_contacts(&mut state);
        // Enemy survives, player downgraded but alive
        assert_eq!(state.session.enemies.len(), 1);
        assert!(!state.player.big);
        assert_eq!(state.player.lives, START_LIVES);
    }

    #[test]
    fn falling_out_of_the_world_costs_a_life() {
        let mut state = playing_state();
        state.player.body.rect.y = VIEW_HEIGHT + FALL_KILL_MARGIN + 1;
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.player.lives, START_LIVES - 1);
        assert_eq!(
            (state.player.body.rect.x, state.player.body.rect.y),
            state.player.spawn
        );
    }

    #[test]
    fn countdown_expiry_respawns_and_rearms() {
        let mut state = playing_state();
        state.time_left = SIM_DT / 2.0;
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.player.lives, START_LIVES - 1);
        assert!(state.time_left > LEVEL_TIME_SECS - 1.0);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn last_life_triggers_game_over_exactly_once() {
        let mut state = playing_state();
        state.player.lives = 1;
        state.player.body.rect.y = VIEW_HEIGHT + FALL_KILL_MARGIN + 1;
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn goal_contact_clears_the_level() {
        let mut state = playing_state();
        let goal = state.session.goal.expect("level has a goal");
        state.player.body.rect.x = goal.x;
        state.player.body.rect.y = goal.bottom() - state.player.body.rect.h;
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.mode, GameMode::LevelClear);
    }

    #[test]
    fn level_clear_confirm_wins_on_last_level() {
        let mut state = playing_state();
        state.mode = GameMode::LevelClear;
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.mode, GameMode::Win);
    }

    #[test]
    fn level_clear_confirm_advances_and_keeps_stats() {
        let grids = one_level();
        let two = vec![grids[0].clone(), grids[0].clone()];
        let mut state = GameState::with_levels(two);
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        state.player.score = 450;
        state.player.lives = 2;
        state.mode = GameMode::LevelClear;

        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.player.score, 450);
        assert_eq!(state.player.lives, 2);
    }

    #[test]
    fn game_over_confirm_restarts_the_run() {
        let mut state = playing_state();
        state.player.score = 1234;
        state.player.lives = 0;
        state.mode = GameMode::GameOver;
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.lives, START_LIVES);
    }

    #[test]
    fn win_confirm_requests_exit() {
        let mut state = playing_state();
        state.mode = GameMode::Win;
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        assert!(state.exit_requested);
    }

    #[test]
    fn restart_reloads_level_in_place() {
        let mut state = playing_state();
        let coins_before = state.session.coins.len();
        state.session.coins.push(Rect::new(0, 0, 10, 10));
        state.player.lives = 0;
        tick(&mut state, &TickInput { restart: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.session.coins.len(), coins_before);
        assert_eq!(state.player.lives, 1);
    }

    #[test]
    fn confirm_is_ignored_while_playing() {
        let mut state = playing_state();
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.level_index, 0);
    }

    #[test]
    fn enemies_patrol_during_play() {
        let grids = campaign(&[&[
            "                              ",
            "                              ",
            "            E          F      ",
            "==============================",
        ]]);
        let mut state = GameState::with_levels(grids);
        tick(&mut state, &TickInput { confirm: true, ..Default::default() }, SIM_DT);
        let start_x = state.session.enemies[0].body.rect.x;
        for _ in 0..30 {
            tick(&mut state, &idle(), SIM_DT);
        }
        assert_ne!(state.session.enemies[0].body.rect.x, start_x);
    }
}
