//! Per-frame simulation tick
//!
//! Advances the world exactly once per animation frame. Movement only runs
//! while the session is in `Playing`; the other phases just wait on their
//! start/dismiss inputs.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;

use super::arena::{DROP_ZONE, PICKUP_ZONE};
use super::collision::is_blocked;
use super::input::InputState;
use super::quest::QuestStep;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Advance the game state by one tick.
///
/// Takes the input mutably: the one-shot latches are consumed here (in every
/// phase, so a stale press can never fire later), and modal dismissal and
/// session reset release all held keys.
pub fn tick(state: &mut GameState, input: &mut InputState) {
    let start = input.take_start();
    let dismiss = input.take_dismiss();

    match state.phase {
        GamePhase::Title => {
            if start {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Completed => {
            if start {
                state.reset();
                input.clear();
            }
            return;
        }
        GamePhase::GoalInfo => {
            if dismiss {
                advance_quest(state);
                input.clear();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    // Raw axis deltas: aliases collapse per direction, opposite keys cancel.
    let axis = input.axis();
    state.moving = axis != Vec2::ZERO;

    let mut delta = axis * state.player.speed;
    if axis.x != 0.0 && axis.y != 0.0 {
        // Normalize diagonal speed to the cardinal magnitude
        delta *= FRAC_1_SQRT_2;
    }

    // Axis-separated resolution: X first, then Y against the accepted X,
    // so the free axis still slides when the diagonal is blocked.
    let player = &mut state.player;
    let nx = player.pos.x + delta.x;
    if !is_blocked(nx, player.pos.y, player.size) {
        player.pos.x = nx;
    }
    let ny = player.pos.y + delta.y;
    if !is_blocked(player.pos.x, ny, player.size) {
        player.pos.y = ny;
    }

    // Zone triggers, checked against the resolved position. Level-sensitive
    // but idempotent: the step changes on the first in-range tick.
    let center = state.player.center();
    match state.quest.step {
        QuestStep::Pickup => {
            if center.distance(PICKUP_ZONE.pos) < ZONE_TRIGGER_RADIUS {
                state.player.held_goal = state.quest.active_goal().map(|g| g.id);
                state.quest.step = QuestStep::Deliver;
            }
        }
        QuestStep::Deliver => {
            if center.distance(DROP_ZONE.pos) < ZONE_TRIGGER_RADIUS {
                state.player.held_goal = None;
                state.phase = GamePhase::GoalInfo;
            }
        }
    }
}

/// Roster advance on modal dismissal: next goal, or completion after the last
fn advance_quest(state: &mut GameState) {
    if state.quest.on_last_goal() {
        state.phase = GamePhase::Completed;
    } else {
        state.quest.index += 1;
        state.quest.step = QuestStep::Pickup;
        state.phase = GamePhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::KeyCode;
    use crate::sim::quest::GOALS;
    use proptest::prelude::*;

    fn playing_state() -> (GameState, InputState) {
        let mut state = GameState::new();
        state.phase = GamePhase::Playing;
        (state, InputState::new())
    }

    /// Put the player's box center exactly on `point`
    fn center_player_on(state: &mut GameState, point: Vec2) {
        state.player.pos = point - Vec2::splat(state.player.size / 2.0);
    }

    #[test]
    fn test_start_input_begins_session() {
        let mut state = GameState::new();
        let mut input = InputState::new();
        input.key_down(KeyCode::ArrowUp);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_wasd_does_not_start_session() {
        let mut state = GameState::new();
        let mut input = InputState::new();
        input.key_down(KeyCode::KeyW);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::Title);
    }

    #[test]
    fn test_title_does_not_move_player() {
        let mut state = GameState::new();
        let mut input = InputState::new();
        let spawn = state.player.pos;
        input.key_down(KeyCode::KeyD);
        tick(&mut state, &mut input);
        assert_eq!(state.player.pos, spawn);
    }

    #[test]
    fn test_diagonal_speed_matches_cardinal() {
        let (mut state, mut input) = playing_state();
        state.player.pos = Vec2::new(400.0, 300.0);
        let from = state.player.pos;
        input.key_down(KeyCode::ArrowRight);
        tick(&mut state, &mut input);
        let cardinal = state.player.pos.distance(from);

        let (mut state, mut input) = playing_state();
        state.player.pos = Vec2::new(400.0, 300.0);
        let from = state.player.pos;
        input.key_down(KeyCode::ArrowRight);
        input.key_down(KeyCode::ArrowUp);
        tick(&mut state, &mut input);
        let diagonal = state.player.pos.distance(from);

        assert!((cardinal - PLAYER_SPEED).abs() < 1e-3);
        assert!((cardinal - diagonal).abs() < 1e-3);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let (mut state, mut input) = playing_state();
        let from = state.player.pos;
        input.key_down(KeyCode::ArrowLeft);
        input.key_down(KeyCode::KeyD);
        tick(&mut state, &mut input);
        assert_eq!(state.player.pos, from);
        assert!(!state.moving);
    }

    #[test]
    fn test_pickup_trigger_hands_over_ball() {
        let (mut state, mut input) = playing_state();
        center_player_on(&mut state, PICKUP_ZONE.pos);
        tick(&mut state, &mut input);
        assert_eq!(state.player.held_goal, Some(GOALS[0].id));
        assert_eq!(state.quest.step, QuestStep::Deliver);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_deliver_trigger_opens_goal_info() {
        let (mut state, mut input) = playing_state();
        state.quest.step = QuestStep::Deliver;
        state.player.held_goal = Some(GOALS[0].id);
        center_player_on(&mut state, DROP_ZONE.pos);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::GoalInfo);
        assert!(state.player.held_goal.is_none());
    }

    #[test]
    fn test_dismiss_advances_roster() {
        let (mut state, mut input) = playing_state();
        state.phase = GamePhase::GoalInfo;
        input.key_down(KeyCode::Enter);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.quest.index, 1);
        assert_eq!(state.quest.step, QuestStep::Pickup);
    }

    #[test]
    fn test_dismiss_on_last_goal_completes() {
        let (mut state, mut input) = playing_state();
        state.phase = GamePhase::GoalInfo;
        state.quest.index = GOALS.len() - 1;
        input.key_down(KeyCode::Space);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::Completed);
        assert_eq!(state.quest.index, GOALS.len() - 1);
    }

    #[test]
    fn test_stale_press_cannot_dismiss_modal() {
        let (mut state, mut input) = playing_state();
        // The key goes down during play and stays held
        input.key_down(KeyCode::ArrowRight);
        tick(&mut state, &mut input);
        state.phase = GamePhase::GoalInfo;
        // No fresh press: the modal stays up
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::GoalInfo);
    }

    #[test]
    fn test_restart_from_completed() {
        let (mut state, mut input) = playing_state();
        state.phase = GamePhase::Completed;
        state.quest.index = GOALS.len() - 1;
        state.player.pos = Vec2::new(100.0, 100.0);
        input.key_down(KeyCode::ArrowLeft);
        tick(&mut state, &mut input);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.quest.index, 0);
        assert_eq!(state.quest.step, QuestStep::Pickup);
        assert_eq!(
            state.player.pos,
            Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)
        );
        assert!(state.player.held_goal.is_none());
        assert_eq!(input.axis(), Vec2::ZERO);
    }

    #[test]
    fn test_wall_blocks_axis_but_slides_other() {
        // Approaching the top bench (300, 120, 180, 40) from below, moving
        // up and right: Y is blocked, X keeps sliding.
        let (mut state, mut input) = playing_state();
        state.player.pos = Vec2::new(360.0, 140.0);
        input.key_down(KeyCode::ArrowUp);
        input.key_down(KeyCode::ArrowRight);
        tick(&mut state, &mut input);
        assert_eq!(state.player.pos.y, 140.0);
        assert!(state.player.pos.x > 360.0);
    }

    proptest! {
        /// Random play sweeps never break the quest invariants: the roster
        /// index is monotone and bounded, the step only falls back to Pickup
        /// via an advance or a full reset, and while playing the player is
        /// never blocked and holds exactly what the step requires.
        #[test]
        fn prop_random_play_keeps_invariants(
            ops in proptest::collection::vec((0u8..16, any::<bool>()), 1..300)
        ) {
            let dir_keys = [
                KeyCode::ArrowUp,
                KeyCode::ArrowDown,
                KeyCode::ArrowLeft,
                KeyCode::ArrowRight,
            ];
            let mut state = GameState::new();
            let mut input = InputState::new();

            for (bits, press_enter) in ops {
                for (i, key) in dir_keys.iter().enumerate() {
                    if bits & (1 << i) != 0 {
                        input.key_down(*key);
                    } else {
                        input.key_up(*key);
                    }
                }
                input.key_up(KeyCode::Enter);
                if press_enter {
                    input.key_down(KeyCode::Enter);
                }

                let prev_phase = state.phase;
                let prev = state.quest;
                tick(&mut state, &mut input);

                prop_assert!(state.quest.index < GOALS.len());
                if state.phase == GamePhase::Title && prev_phase == GamePhase::Completed {
                    prop_assert_eq!(state.quest.index, 0);
                } else {
                    prop_assert!(state.quest.index >= prev.index);
                }
                if prev.step == QuestStep::Deliver && state.quest.step == QuestStep::Pickup {
                    let reset = state.phase == GamePhase::Title;
                    prop_assert!(reset || state.quest.index == prev.index + 1);
                }
                if state.phase == GamePhase::Playing {
                    prop_assert!(!is_blocked(
                        state.player.pos.x,
                        state.player.pos.y,
                        state.player.size
                    ));
                    match state.quest.step {
                        QuestStep::Pickup => prop_assert!(state.player.held_goal.is_none()),
                        QuestStep::Deliver => prop_assert_eq!(
                            state.player.held_goal,
                            state.quest.active_goal().map(|g| g.id)
                        ),
                    }
                }
            }
        }
    }
}
