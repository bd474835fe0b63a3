//! Input state management
//!
//! Polls the keyboard (macroquad) and gamepad (gilrs) and answers chord
//! queries through the [`InputSource`] trait.

use macroquad::prelude::is_key_down;

use super::gamepad::Gamepad;
use super::{InputId, InputSource};

/// Unified input state covering keyboard and gamepad.
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
        }
    }

    /// Call once per frame before resolving bindings.
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Check if any gamepad is connected.
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl InputSource for InputState {
    fn down(&self, id: &InputId) -> bool {
        match id {
            InputId::Key(key) => is_key_down(*key),
            InputId::Pad(button) => self.gamepad.is_button_down(*button),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
