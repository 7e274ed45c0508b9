//! Keyboard input state
//!
//! Event handlers own nothing but this: key-down/key-up calls mutate the
//! pressed map, the tick reads it synchronously once per frame. Down events
//! are idempotent so browser auto-repeat cannot re-fire the one-shot
//! start/dismiss latches.

use glam::Vec2;

/// The fixed key vocabulary the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    Enter,
    Space,
    Escape,
}

impl KeyCode {
    const COUNT: usize = 11;

    /// Map a DOM `KeyboardEvent.code` string to a known key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "KeyW" => Some(Self::KeyW),
            "KeyA" => Some(Self::KeyA),
            "KeyS" => Some(Self::KeyS),
            "KeyD" => Some(Self::KeyD),
            "Enter" => Some(Self::Enter),
            "Space" => Some(Self::Space),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Keys that start a session from the title screen (and restart after
    /// completion): arrows, Enter, Space.
    pub fn starts_session(self) -> bool {
        !matches!(
            self,
            Self::KeyW | Self::KeyA | Self::KeyS | Self::KeyD | Self::Escape
        )
    }

    /// Keys that dismiss the goal-info modal: the start set plus Escape.
    pub fn dismisses_info(self) -> bool {
        self.starts_session() || self == Self::Escape
    }
}

/// Pressed/released state per key, the facing flag, and two one-shot
/// latches consumed by the tick.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: [bool; KeyCode::COUNT],
    /// Sprite faces left; updated only on left/right key-downs
    pub facing_left: bool,
    start_latch: bool,
    dismiss_latch: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key-down. Idempotent: a key already held changes nothing,
    /// so auto-repeat events neither flip facing nor re-arm the latches.
    pub fn key_down(&mut self, key: KeyCode) {
        let idx = key.index();
        if self.pressed[idx] {
            return;
        }
        self.pressed[idx] = true;

        match key {
            KeyCode::ArrowLeft | KeyCode::KeyA => self.facing_left = true,
            KeyCode::ArrowRight | KeyCode::KeyD => self.facing_left = false,
            _ => {}
        }
        if key.starts_session() {
            self.start_latch = true;
        }
        if key.dismisses_info() {
            self.dismiss_latch = true;
        }
    }

    /// Register a key-up
    pub fn key_up(&mut self, key: KeyCode) {
        self.pressed[key.index()] = false;
    }

    /// Release every key and drop the latches (facing is retained)
    pub fn clear(&mut self) {
        self.pressed = [false; KeyCode::COUNT];
        self.start_latch = false;
        self.dismiss_latch = false;
    }

    fn is_down(&self, key: KeyCode) -> bool {
        self.pressed[key.index()]
    }

    pub fn up(&self) -> bool {
        self.is_down(KeyCode::ArrowUp) || self.is_down(KeyCode::KeyW)
    }

    pub fn down(&self) -> bool {
        self.is_down(KeyCode::ArrowDown) || self.is_down(KeyCode::KeyS)
    }

    pub fn left(&self) -> bool {
        self.is_down(KeyCode::ArrowLeft) || self.is_down(KeyCode::KeyA)
    }

    pub fn right(&self) -> bool {
        self.is_down(KeyCode::ArrowRight) || self.is_down(KeyCode::KeyD)
    }

    /// Raw movement axis, -1/0/1 per component. Aliases collapse to one
    /// boolean per direction; opposite directions cancel to zero.
    pub fn axis(&self) -> Vec2 {
        let x = (self.right() as i8 - self.left() as i8) as f32;
        let y = (self.down() as i8 - self.up() as i8) as f32;
        Vec2::new(x, y)
    }

    /// Consume the start latch (title screen / completion restart)
    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start_latch)
    }

    /// Consume the dismiss latch (goal-info modal)
    pub fn take_dismiss(&mut self) -> bool {
        std::mem::take(&mut self.dismiss_latch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_combines_aliases() {
        let mut input = InputState::new();
        input.key_down(KeyCode::ArrowRight);
        input.key_down(KeyCode::KeyD);
        assert_eq!(input.axis(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.key_down(KeyCode::ArrowLeft);
        input.key_down(KeyCode::KeyD);
        assert_eq!(input.axis(), Vec2::ZERO);
    }

    #[test]
    fn test_facing_tracks_horizontal_downs_only() {
        let mut input = InputState::new();
        input.key_down(KeyCode::KeyA);
        assert!(input.facing_left);
        input.key_up(KeyCode::KeyA);
        // Releasing does not flip facing back
        assert!(input.facing_left);
        input.key_down(KeyCode::ArrowUp);
        assert!(input.facing_left);
        input.key_down(KeyCode::ArrowRight);
        assert!(!input.facing_left);
    }

    #[test]
    fn test_auto_repeat_does_not_rearm_latches() {
        let mut input = InputState::new();
        input.key_down(KeyCode::Enter);
        assert!(input.take_start());
        // Held key repeats: no fresh press, no latch
        input.key_down(KeyCode::Enter);
        assert!(!input.take_start());
        input.key_up(KeyCode::Enter);
        input.key_down(KeyCode::Enter);
        assert!(input.take_start());
    }

    #[test]
    fn test_escape_dismisses_but_does_not_start() {
        let mut input = InputState::new();
        input.key_down(KeyCode::Escape);
        assert!(!input.take_start());
        assert!(input.take_dismiss());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputState::new();
        input.key_down(KeyCode::ArrowLeft);
        input.key_down(KeyCode::Space);
        input.clear();
        assert_eq!(input.axis(), Vec2::ZERO);
        assert!(!input.take_start());
        assert!(!input.take_dismiss());
        // Facing survives a clear
        assert!(input.facing_left);
    }
}
