//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, fixed per-tick speed
//! - No rendering or platform dependencies
//! - All state mutation happens inside `tick`; event handlers only touch
//!   the `InputState` they own

pub mod arena;
pub mod collision;
pub mod input;
pub mod quest;
pub mod state;
pub mod tick;

pub use arena::{DROP_ZONE, PICKUP_ZONE, WALLS, Wall, Zone};
pub use collision::is_blocked;
pub use input::{InputState, KeyCode};
pub use quest::{GOALS, QuestGoal, QuestProgress, QuestStep};
pub use state::{GamePhase, GameState, Player};
pub use tick::tick;
