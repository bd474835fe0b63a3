//! Particle system
//!
//! A fixed-size pool of 2D particles drawn as colored quads. Effects are
//! burst-based (bullet pops, hit sparks); color and size interpolate over
//! each particle's life. Spawns into a full pool are dropped silently.

use macroquad::prelude::{vec2, Color, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::render::world_to_screen;

/// Maximum number of live particles.
pub const MAX_PARTICLES: usize = 512;

/// A single particle in the pool
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World position
    pub position: Vec2,
    /// Velocity (world units per second)
    pub velocity: Vec2,
    /// Remaining life in seconds
    pub life: f32,
    /// Total lifetime (for interpolation)
    pub max_life: f32,
    pub color_start: [f32; 4],
    pub color_end: [f32; 4],
    /// World-unit size at spawn and death
    pub size_start: f32,
    pub size_end: f32,
    /// Velocity damping per second (1.0 = none)
    pub damping: f32,
    /// Is this particle slot active?
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 0.0,
            max_life: 1.0,
            color_start: [1.0, 1.0, 1.0, 1.0],
            color_end: [1.0, 1.0, 1.0, 0.0],
            size_start: 0.2,
            size_end: 0.0,
            damping: 1.0,
            alive: false,
        }
    }
}

/// Definition of a burst effect (design-time data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleEffect {
    /// Particles per burst
    pub count: usize,
    /// Base emission direction in radians (0 = +x)
    pub angle: f32,
    /// Half-angle of the emission cone in radians
    pub cone_angle: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub life_min: f32,
    pub life_max: f32,
    pub color_start: [f32; 4],
    pub color_end: [f32; 4],
    pub size_start: f32,
    pub size_end: f32,
    pub damping: f32,
}

impl Default for ParticleEffect {
    fn default() -> Self {
        Self {
            count: 20,
            angle: 0.0,
            cone_angle: std::f32::consts::PI,
            speed_min: 1.0,
            speed_max: 3.0,
            life_min: 0.1,
            life_max: 0.3,
            color_start: [1.0, 1.0, 1.0, 1.0],
            color_end: [1.0, 1.0, 1.0, 0.0],
            size_start: 0.2,
            size_end: 0.0,
            damping: 1.0,
        }
    }
}

impl ParticleEffect {
    /// Yellow-to-red pop played when a bullet expires.
    pub fn bullet_pop() -> Self {
        Self {
            count: 24,
            angle: std::f32::consts::FRAC_PI_2,
            cone_angle: std::f32::consts::PI,
            speed_min: 2.0,
            speed_max: 6.0,
            life_min: 0.1,
            life_max: 0.2,
            color_start: [1.0, 1.0, 0.0, 1.0],
            color_end: [1.0, 0.0, 0.0, 0.0],
            size_start: 0.2,
            size_end: 0.0,
            damping: 0.9,
        }
    }
}

/// The particle pool — manages all live particles
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            particles: vec![Particle::default(); MAX_PARTICLES],
        }
    }

    fn find_free_slot(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.alive)
    }

    /// Spawn one burst of an effect at a world position.
    pub fn burst(&mut self, effect: &ParticleEffect, origin: Vec2) {
        let mut rng = rand::thread_rng();
        for _ in 0..effect.count {
            let Some(idx) = self.find_free_slot() else {
                return; // Pool full, drop the rest
            };

            let speed = rng.gen_range(effect.speed_min..=effect.speed_max);
            let life = rng.gen_range(effect.life_min..=effect.life_max);
            let spread = if effect.cone_angle > 0.0 {
                rng.gen_range(-effect.cone_angle..=effect.cone_angle)
            } else {
                0.0
            };
            let angle = effect.angle + spread;

            self.particles[idx] = Particle {
                position: origin,
                velocity: vec2(angle.cos(), angle.sin()) * speed,
                life,
                max_life: life,
                color_start: effect.color_start,
                color_end: effect.color_end,
                size_start: effect.size_start,
                size_end: effect.size_end,
                damping: effect.damping,
                alive: true,
            };
        }
    }

    /// Update all live particles
    pub fn update(&mut self, delta_time: f32) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }

            particle.life -= delta_time;
            if particle.life <= 0.0 {
                particle.alive = false;
                continue;
            }

            particle.velocity *= particle.damping.powf(delta_time);
            particle.position += particle.velocity * delta_time;
        }
    }

    /// Draw all live particles as colored quads.
    pub fn draw(&self, camera_scale: f32) {
        use macroquad::prelude::draw_rectangle;

        for particle in &self.particles {
            if !particle.alive {
                continue;
            }

            // 0 = just spawned, 1 = about to die
            let t = 1.0 - (particle.life / particle.max_life);

            let c = lerp_color(particle.color_start, particle.color_end, t);
            let size = (particle.size_start + (particle.size_end - particle.size_start) * t)
                * camera_scale;

            let screen = world_to_screen(particle.position, camera_scale);
            draw_rectangle(
                screen.x - size / 2.0,
                screen.y - size / 2.0,
                size,
                size,
                Color::new(c[0], c[1], c[2], c[3]),
            );
        }
    }

    /// Get count of live particles
    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    /// Kill all particles
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.alive = false;
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

/// Lerp between two RGBA colors
fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = a[i] + (b[i] - a[i]) * t;
    }
    out
}
