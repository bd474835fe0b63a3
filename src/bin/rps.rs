//! Rock-paper-scissors arena
//!
//! A pile of rocks, papers and scissors chases its prey around the arena,
//! converting whatever it catches. Runs until one faction wins.

use hecs::World;
use macroquad::prelude::*;

use skirmish::entities::spawn_arena;
use skirmish::render;
use skirmish::settings::Settings;
use skirmish::systems::targeting::{chase_targets, solve_conflicts, solve_targets};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn window_conf() -> Conf {
    Conf {
        window_title: format!("RPS Arena v{}", VERSION),
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

    let atlas = match load_texture("assets/rps.png").await {
        Ok(tex) => {
            tex.set_filter(FilterMode::Nearest);
            tex
        }
        Err(e) => {
            error!("Failed to load atlas: {}", e);
            return;
        }
    };

    let mut world = World::new();
    let mut rng = ::rand::thread_rng();
    spawn_arena(&mut world, &settings.arena, &mut rng);

    loop {
        solve_targets(&mut world);
        chase_targets(&mut world);
        solve_conflicts(&mut world);

        clear_background(Color::from_rgba(24, 24, 32, 255));
        render::draw_entities(&mut world, &atlas, settings.camera_scale.0, get_time());

        next_frame().await;
    }
}
