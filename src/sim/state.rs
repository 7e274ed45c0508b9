//! Game state and core simulation types

use glam::Vec2;

use crate::consts::*;

use super::quest::QuestProgress;

/// Top-level session phase. Only `Playing` runs the movement simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a start input
    Title,
    /// Active gameplay
    Playing,
    /// Goal-info modal shown after a delivery; simulation paused
    GoalInfo,
    /// Every goal delivered; waiting for a restart input
    Completed,
}

/// The player character
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Top-left corner of the sprite box, canvas coordinates
    pub pos: Vec2,
    /// Sprite box edge length
    pub size: f32,
    /// Pixels moved per tick along an active axis
    pub speed: f32,
    /// Id of the goal ball being carried, if any
    pub held_goal: Option<u32>,
}

impl Player {
    /// A fresh player at center court, empty-handed
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            held_goal: None,
        }
    }

    /// Center of the sprite box (used for zone distance checks)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Complete game state, owned by the driver and mutated only by `tick`
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub quest: QuestProgress,
    /// Any directional key was active this tick (animation only)
    pub moving: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Title,
            player: Player::spawn(),
            quest: QuestProgress::new(),
            moving: false,
        }
    }

    /// Full reset: respawn the player, restart the roster, back to the
    /// title screen. The start trigger is required again.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::quest::QuestStep;

    #[test]
    fn test_new_state_starts_on_title() {
        let state = GameState::new();
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.quest.index, 0);
        assert_eq!(state.quest.step, QuestStep::Pickup);
        assert!(state.player.held_goal.is_none());
    }

    #[test]
    fn test_player_center() {
        let player = Player::spawn();
        assert_eq!(
            player.center(),
            Vec2::new(
                PLAYER_SPAWN_X + PLAYER_SIZE / 2.0,
                PLAYER_SPAWN_Y + PLAYER_SIZE / 2.0
            )
        );
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut state = GameState::new();
        state.phase = GamePhase::Completed;
        state.player.pos = Vec2::new(10.0, 10.0);
        state.player.held_goal = Some(3);
        state.quest.index = 2;
        state.quest.step = QuestStep::Deliver;
        state.reset();
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
        assert!(state.player.held_goal.is_none());
        assert_eq!(state.quest, QuestProgress::new());
    }
}
