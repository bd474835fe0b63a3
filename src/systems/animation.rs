//! Animation state selection
//!
//! Picks "walking" while an entity's resolved direction is non-zero and
//! "idle" otherwise. Frame advancement itself happens at draw time in
//! [`crate::render::draw_entities`].

use hecs::World;
use macroquad::prelude::Vec2;

use crate::components::{Direction, Presenter};

pub const ANIM_IDLE: &str = "idle";
pub const ANIM_WALKING: &str = "walking";

/// Switch animated entities between idle and walking based on direction.
pub fn select_animations(world: &mut World) {
    for (_entity, (direction, presenter)) in world.query_mut::<(&Direction, &mut Presenter)>() {
        let Presenter::Animated(animator) = presenter else {
            continue;
        };
        let name = if direction.0 == Vec2::ZERO {
            ANIM_IDLE
        } else {
            ANIM_WALKING
        };
        animator.play(name, false);
    }
}
