//! Court Runner - a top-down basketball-court fetch quest
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collision, quest sequencing)
//! - `render`: Canvas-2D presentation and DOM overlays (wasm only)
//! - `genai`: Generative backdrop/insight provider (wasm only)

pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod genai;
#[cfg(target_arch = "wasm32")]
pub mod render;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (canvas pixels)
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 700.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    /// Movement speed in pixels per tick (one tick per animation frame)
    pub const PLAYER_SPEED: f32 = 7.0;
    /// Spawn position (top-left of the player box), center court
    pub const PLAYER_SPAWN_X: f32 = 500.0;
    pub const PLAYER_SPAWN_Y: f32 = 350.0;

    /// Radius around a zone point within which its trigger fires
    pub const ZONE_TRIGGER_RADIUS: f32 = 45.0;

    /// Footprint box used for wall/bounds tests: a shrunk rectangle at the
    /// character's feet so the sprite's upper body may overlap walls visually.
    pub const FOOTPRINT_WIDTH_RATIO: f32 = 0.6;
    pub const FOOTPRINT_HEIGHT_RATIO: f32 = 0.3;
    /// Gap between the footprint's bottom edge and the box's bottom edge
    pub const FOOTPRINT_LIFT: f32 = 2.0;

    /// Abort the backdrop/insight fetch after this long
    pub const GENAI_TIMEOUT_MS: i32 = 20_000;
}
