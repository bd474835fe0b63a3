//! Gamepad support
//!
//! Native: gilrs-backed polling of the first connected pad.
//! WASM: stub that reports nothing pressed (keyboard still works).
//!
//! Besides the physical buttons, the left analog stick is exposed as four
//! virtual direction buttons so bindings can treat it like a d-pad.

use macroquad::prelude::Vec2;

// Standard gamepad button indices (Web Gamepad API standard mapping,
// Xbox layout). Indices 17..=20 are virtual: they resolve from the left
// analog stick rounded to a direction.
pub mod button {
    pub const A: u32 = 0; // ActionDown / South
    pub const B: u32 = 1; // ActionRight / East
    pub const X: u32 = 2; // ActionLeft / West
    pub const Y: u32 = 3; // ActionUp / North
    pub const LB: u32 = 4;
    pub const RB: u32 = 5;
    pub const LT: u32 = 6;
    pub const RT: u32 = 7;
    pub const SELECT: u32 = 8;
    pub const START: u32 = 9;
    pub const L3: u32 = 10;
    pub const R3: u32 = 11;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
    pub const GUIDE: u32 = 16;

    // Virtual stick-as-dpad directions
    pub const STICK_UP: u32 = 17;
    pub const STICK_DOWN: u32 = 18;
    pub const STICK_LEFT: u32 = 19;
    pub const STICK_RIGHT: u32 = 20;
}

// ============================================================================
// WASM Implementation (stub)
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};

    pub struct Gamepad {
        gilrs: Gilrs,
        deadzone: f32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            Self {
                gilrs: Gilrs::new().unwrap(),
                deadzone: 0.15,
            }
        }

        pub fn poll(&mut self) {
            // Drain gilrs events so pad state stays current
            while let Some(_event) = self.gilrs.next_event() {}
        }

        pub fn has_gamepad(&self) -> bool {
            self.gilrs.gamepads().next().is_some()
        }

        fn active_gamepad(&self) -> Option<gilrs::Gamepad> {
            self.gilrs.gamepads().next().map(|(_, gp)| gp)
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            // Virtual directions come from the rounded left stick, so an
            // analog pad works with digital direction bindings.
            if (button::STICK_UP..=button::STICK_RIGHT).contains(&button) {
                let stick = self.left_stick().round();
                return match button {
                    button::STICK_UP => stick.y > 0.0,
                    button::STICK_DOWN => stick.y < 0.0,
                    button::STICK_LEFT => stick.x < 0.0,
                    button::STICK_RIGHT => stick.x > 0.0,
                    _ => false,
                };
            }

            let Some(gp) = self.active_gamepad() else {
                return false;
            };
            let mapped = match button {
                button::A => GilrsButton::South,
                button::B => GilrsButton::East,
                button::X => GilrsButton::West,
                button::Y => GilrsButton::North,
                button::LB => GilrsButton::LeftTrigger,
                button::RB => GilrsButton::RightTrigger,
                button::LT => GilrsButton::LeftTrigger2,
                button::RT => GilrsButton::RightTrigger2,
                button::SELECT => GilrsButton::Select,
                button::START => GilrsButton::Start,
                button::L3 => GilrsButton::LeftThumb,
                button::R3 => GilrsButton::RightThumb,
                button::DPAD_UP => GilrsButton::DPadUp,
                button::DPAD_DOWN => GilrsButton::DPadDown,
                button::DPAD_LEFT => GilrsButton::DPadLeft,
                button::DPAD_RIGHT => GilrsButton::DPadRight,
                button::GUIDE => GilrsButton::Mode,
                _ => return false,
            };
            gp.is_pressed(mapped)
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active_gamepad() else {
                return Vec2::ZERO;
            };
            let x = gp.value(Axis::LeftStickX);
            let y = gp.value(Axis::LeftStickY);
            apply_deadzone(x, y, self.deadzone)
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

// ============================================================================
// Shared utilities
// ============================================================================

/// Apply radial deadzone with linear rescaling
fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

pub use platform::Gamepad;
