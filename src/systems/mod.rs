//! Per-frame systems
//!
//! Each system is a single sequential pass over the entities matching a
//! component signature. Systems never fail; an entity missing an expected
//! component is simply skipped. Run order within a frame is up to the
//! binary wiring them together.

pub mod animation;
pub mod gun;
pub mod input;
pub mod lifetime;
pub mod movement;
pub mod targeting;
