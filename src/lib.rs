//! SKIRMISH: small game prototypes on macroquad + hecs
//!
//! Two runnable prototypes sharing one toolbox of per-frame systems:
//! - `rps`: an autonomous rock-paper-scissors arena where entities chase the
//!   nearest member of their prey faction and convert it on contact
//! - `shooter`: a top-down shooter with keyboard/gamepad movement, sprite
//!   animation, fire-rate gun logic and frame-scheduled bullet expiry
//!
//! Rendering, timing and input polling live in macroquad; entity storage and
//! queries live in hecs. Everything here is sequential single-threaded state
//! mutation driven once per engine frame.

pub mod animator;
pub mod components;
pub mod entities;
pub mod input;
pub mod map;
pub mod particles;
pub mod render;
pub mod settings;
pub mod systems;

pub use components::*;
pub use render::{tile, TileRef};
