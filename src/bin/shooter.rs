//! Top-down shooter
//!
//! Walk around a tiled level with keyboard or gamepad, shoot in three
//! directions, watch bullets pop into particles when their time is up.

use hecs::World;
use macroquad::prelude::*;

use skirmish::entities::{spawn_enemy, spawn_player};
use skirmish::input::InputState;
use skirmish::map::load_map;
use skirmish::particles::ParticlePool;
use skirmish::render;
use skirmish::settings::Settings;
use skirmish::systems::animation::select_animations;
use skirmish::systems::gun::update_guns;
use skirmish::systems::input::resolve_directions;
use skirmish::systems::lifetime::LifetimeQueue;
use skirmish::systems::movement::move_entities;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Shooter v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let settings = Settings::load("assets/settings.ron");

    let atlas = match load_texture("assets/shooter.png").await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Nearest);
            tex
        }
        Err(e) => {
            error!("Failed to load atlas: {}", e);
            return;
        }
    };

    let map = match load_map("assets/level.json") {
        Ok(map) => {
            info!("Loaded level: {} layer(s)", map.layers.len());
            Some(map)
        }
        Err(e) => {
            warn!("Failed to load level: {}, running on a bare floor", e);
            None
        }
    };

    let mut world = World::new();
    let mut lifetimes = LifetimeQueue::new();
    let mut particles = ParticlePool::new();
    let mut input = InputState::new();

    spawn_player(&mut world, &settings.player);
    spawn_enemy(&mut world, vec2(4.0, 3.0));
    spawn_enemy(&mut world, vec2(-5.0, -2.0));

    loop {
        input.poll();
        let dt = get_frame_time();

        resolve_directions(&mut world, &input);
        select_animations(&mut world);
        // One character tile (16x23 px sprites) of margin keeps everyone
        // fully on screen
        let tile_size = vec2(1.0, 23.0 / 16.0);
        let clamp = render::world_half_extent(settings.camera_scale.0) - tile_size;
        move_entities(&mut world, clamp);
        update_guns(&mut world, &mut lifetimes, &input, dt);
        lifetimes.update(&mut world, &mut particles);
        particles.update(dt);

        clear_background(Color::from_rgba(24, 24, 32, 255));
        if let Some(map) = &map {
            map.draw(&atlas, settings.camera_scale.0);
        }
        render::draw_entities(&mut world, &atlas, settings.camera_scale.0, get_time());
        particles.draw(settings.camera_scale.0);

        next_frame().await;
    }
}
