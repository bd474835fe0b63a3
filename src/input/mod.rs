//! Input handling with gamepad support
//!
//! Entities carry lists of [`Chord`] bindings (one or more physical inputs
//! mapped to a value); systems resolve them each frame against an
//! [`InputSource`]. The real source is [`InputState`], which polls macroquad
//! keys and the gilrs-backed gamepad; tests pass plain closures.

mod gamepad;
mod state;

pub use gamepad::{button, Gamepad};
pub use state::InputState;

use macroquad::prelude::KeyCode;

/// A single physical input: a keyboard key or a gamepad button index
/// (see [`button`] for the indices, including the virtual stick directions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputId {
    Key(KeyCode),
    Pad(u32),
}

/// One or more inputs that together trigger a value.
#[derive(Debug, Clone)]
pub struct Chord<T> {
    pub inputs: Vec<InputId>,
    pub data: T,
}

impl<T> Chord<T> {
    pub fn key(key: KeyCode, data: T) -> Self {
        Self {
            inputs: vec![InputId::Key(key)],
            data,
        }
    }

    pub fn pad(button: u32, data: T) -> Self {
        Self {
            inputs: vec![InputId::Pad(button)],
            data,
        }
    }
}

/// Something that can answer "is this input held down right now?".
pub trait InputSource {
    fn down(&self, id: &InputId) -> bool;
}

impl<F: Fn(&InputId) -> bool> InputSource for F {
    fn down(&self, id: &InputId) -> bool {
        self(id)
    }
}

/// True when every input validates the predicate. Vacuously true for an
/// empty list.
pub fn are_all(inputs: &[InputId], down: impl Fn(&InputId) -> bool) -> bool {
    inputs.iter().all(down)
}

/// True when at least one input validates the predicate.
pub fn is_any(inputs: &[InputId], down: impl Fn(&InputId) -> bool) -> bool {
    inputs.iter().any(down)
}

/// Values of every chord whose inputs are all held.
pub fn all_triggered<T: Clone>(chords: &[Chord<T>], source: &impl InputSource) -> Vec<T> {
    chords
        .iter()
        .filter(|c| are_all(&c.inputs, |id| source.down(id)))
        .map(|c| c.data.clone())
        .collect()
}

/// Value of the first chord whose inputs are all held. First match wins.
pub fn first_triggered<T: Clone>(chords: &[Chord<T>], source: &impl InputSource) -> Option<T> {
    chords
        .iter()
        .find(|c| are_all(&c.inputs, |id| source.down(id)))
        .map(|c| c.data.clone())
}
