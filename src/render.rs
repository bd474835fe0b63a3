//! Drawing helpers
//!
//! World space uses a centered origin with +y up; one world unit maps to
//! `camera_scale` pixels. Entities are drawn centered on their position with
//! a size derived from their tile's aspect ratio (one unit wide).

use macroquad::prelude::{
    draw_texture_ex, screen_height, screen_width, vec2, DrawTextureParams, Rect, Texture2D, Vec2,
    WHITE,
};

use crate::components::{Position, Presenter};

/// A rectangular region of the sprite atlas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRef {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl TileRef {
    /// World-unit draw size for this tile: one unit wide, aspect-correct tall.
    pub fn world_size(&self) -> Vec2 {
        vec2(1.0, self.h / self.w)
    }
}

/// Shorthand constructor for atlas tiles.
pub fn tile(x: f32, y: f32, w: f32, h: f32) -> TileRef {
    TileRef { x, y, w, h }
}

/// Convert a world position to screen pixels (centered origin, +y up).
pub fn world_to_screen(pos: Vec2, camera_scale: f32) -> Vec2 {
    vec2(
        screen_width() / 2.0 + pos.x * camera_scale,
        screen_height() / 2.0 - pos.y * camera_scale,
    )
}

/// Half extent of the visible world in world units.
pub fn world_half_extent(camera_scale: f32) -> Vec2 {
    vec2(screen_width(), screen_height()) / (2.0 * camera_scale)
}

/// Draw one atlas tile centered at a world position.
pub fn draw_tile(atlas: &Texture2D, t: TileRef, pos: Vec2, size: Vec2, camera_scale: f32) {
    let px = size * camera_scale;
    let screen = world_to_screen(pos, camera_scale) - px / 2.0;
    draw_texture_ex(
        atlas,
        screen.x,
        screen.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(px),
            source: Some(Rect::new(t.x, t.y, t.w, t.h)),
            ..Default::default()
        },
    );
}

/// Draw every entity with a position and a presenter.
///
/// Animated presenters advance their current animation here; a finished
/// non-looping animation draws nothing.
pub fn draw_entities(world: &mut hecs::World, atlas: &Texture2D, camera_scale: f32, now: f64) {
    for (_entity, (position, presenter)) in world.query_mut::<(&Position, &mut Presenter)>() {
        let current = match presenter {
            Presenter::Tile(t) => Some(*t),
            Presenter::Animated(animator) => animator.current_tile(now),
        };
        if let Some(t) = current {
            draw_tile(atlas, t, position.0, t.world_size(), camera_scale);
        }
    }
}
