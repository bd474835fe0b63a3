//! Gun / bullet spawning
//!
//! Guns accumulate firing time in a buffer. While a shoot binding is held,
//! volleys are spawned until the buffer is paid off (one `1/fire_rate` slice
//! per volley), so a held trigger averages exactly `fire_rate` volleys per
//! second no matter the frame rate. Releasing the trigger clamps the buffer
//! to zero so shots are never banked.

use hecs::World;
use macroquad::prelude::{vec2, Vec2};

use crate::components::{Gun, Position};
use crate::entities::spawn_bullet;
use crate::input::{first_triggered, InputSource};

use super::lifetime::LifetimeQueue;

/// The three directions bullets can fly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletDirection {
    Up,
    Left,
    Right,
}

impl BulletDirection {
    /// Flight direction. The diagonals are deliberate: side shots drift
    /// upward.
    pub fn direction(self) -> Vec2 {
        match self {
            BulletDirection::Up => vec2(0.0, 1.0),
            BulletDirection::Left => vec2(-0.5, 0.5),
            BulletDirection::Right => vec2(0.5, 0.5),
        }
    }

    /// Atlas tile for a bullet flying this way.
    pub fn tile(self) -> crate::render::TileRef {
        match self {
            BulletDirection::Up => crate::render::tile(48.0, 23.0, 16.0, 16.0),
            BulletDirection::Left => crate::render::tile(32.0, 23.0, 16.0, 16.0),
            BulletDirection::Right => crate::render::tile(64.0, 23.0, 16.0, 16.0),
        }
    }
}

/// Run every gun for one frame. `dt` is the frame time in seconds.
pub fn update_guns(
    world: &mut World,
    lifetimes: &mut LifetimeQueue,
    source: &impl InputSource,
    dt: f32,
) {
    // Collect volleys first; spawning while the query borrow is live is
    // not possible.
    let mut volleys: Vec<(Vec2, BulletDirection, f32, u32)> = Vec::new();

    for (_entity, (position, gun)) in world.query_mut::<(&Position, &mut Gun)>() {
        gun.fire_time_buffer += dt;

        let Some(direction) = first_triggered(&gun.shoot_bindings, source) else {
            gun.fire_time_buffer = gun.fire_time_buffer.min(0.0);
            continue;
        };

        while gun.fire_time_buffer > 0.0 {
            gun.fire_time_buffer -= 1.0 / gun.fire_rate;
            for offset in &gun.pattern {
                volleys.push((
                    position.0 + *offset,
                    direction,
                    gun.bullet_speed,
                    gun.bullet_lifetime,
                ));
            }
        }
    }

    for (position, direction, speed, lifetime) in volleys {
        spawn_bullet(world, lifetimes, position, direction, speed, lifetime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Lifetime;
    use crate::input::{Chord, InputId};
    use macroquad::prelude::KeyCode;

    fn gun_entity(world: &mut World, pattern: Vec<Vec2>) -> hecs::Entity {
        let gun = Gun::new(5.0, 0.3, 60)
            .with_bindings(vec![Chord::key(KeyCode::W, BulletDirection::Up)])
            .with_pattern(pattern);
        world.spawn((Position(Vec2::ZERO), gun))
    }

    fn bullets(world: &World) -> usize {
        world.query::<&Lifetime>().iter().count()
    }

    fn trigger_held(id: &InputId) -> bool {
        matches!(id, InputId::Key(KeyCode::W))
    }

    fn trigger_released(_id: &InputId) -> bool {
        false
    }

    #[test]
    fn held_trigger_pays_off_the_buffer() {
        let mut world = World::new();
        let mut lifetimes = LifetimeQueue::new();
        gun_entity(&mut world, vec![Vec2::ZERO]);

        // 0.5s at 5 volleys/sec: buffer 0.5 -> 3 volleys (0.5, 0.3, 0.1)
        update_guns(&mut world, &mut lifetimes, &trigger_held, 0.5);
        assert_eq!(bullets(&world), 3);
    }

    #[test]
    fn average_rate_matches_fire_rate() {
        let mut world = World::new();
        let mut lifetimes = LifetimeQueue::new();
        gun_entity(&mut world, vec![Vec2::ZERO]);

        // 60 frames at ~16.6ms = one second of holding the trigger
        for _ in 0..60 {
            update_guns(&mut world, &mut lifetimes, &trigger_held, 1.0 / 60.0);
        }
        let fired = bullets(&world);
        assert!(
            (5..=6).contains(&fired),
            "expected ~5 volleys over one second, got {fired}"
        );
    }

    #[test]
    fn released_trigger_never_banks_shots() {
        let mut world = World::new();
        let mut lifetimes = LifetimeQueue::new();
        let e = gun_entity(&mut world, vec![Vec2::ZERO]);

        for _ in 0..30 {
            update_guns(&mut world, &mut lifetimes, &trigger_released, 0.1);
        }
        assert_eq!(bullets(&world), 0);
        assert!(world.get::<&Gun>(e).unwrap().fire_time_buffer <= 0.0);

        // First frame after pressing fires exactly one volley, not thirty.
        update_guns(&mut world, &mut lifetimes, &trigger_held, 0.05);
        assert_eq!(bullets(&world), 1);
    }

    #[test]
    fn one_bullet_per_muzzle_offset() {
        let mut world = World::new();
        let mut lifetimes = LifetimeQueue::new();
        gun_entity(&mut world, vec![vec2(-0.25, 0.0), vec2(0.25, 0.0)]);

        update_guns(&mut world, &mut lifetimes, &trigger_held, 0.05);
        assert_eq!(bullets(&world), 2);

        let positions: Vec<Vec2> = world
            .query::<(&Position, &Lifetime)>()
            .iter()
            .map(|(_, (p, _))| p.0)
            .collect();
        assert!(positions.contains(&vec2(-0.25, 0.0)));
        assert!(positions.contains(&vec2(0.25, 0.0)));
    }

    #[test]
    fn bullets_are_scheduled_for_expiry() {
        let mut world = World::new();
        let mut lifetimes = LifetimeQueue::new();
        gun_entity(&mut world, vec![Vec2::ZERO]);

        update_guns(&mut world, &mut lifetimes, &trigger_held, 0.05);
        assert_eq!(lifetimes.pending(), 1);
    }

    #[test]
    fn first_binding_wins_on_overlapping_chords() {
        let mut world = World::new();
        let mut lifetimes = LifetimeQueue::new();
        let gun = Gun::new(5.0, 0.3, 60).with_bindings(vec![
            Chord::key(KeyCode::W, BulletDirection::Up),
            Chord::key(KeyCode::W, BulletDirection::Left),
        ]);
        world.spawn((Position(Vec2::ZERO), gun));

        update_guns(&mut world, &mut lifetimes, &trigger_held, 0.05);

        let mut query = world.query::<(&crate::components::Direction, &Lifetime)>();
        let (_, (direction, _)) = query.iter().next().expect("one bullet");
        assert_eq!(direction.0, BulletDirection::Up.direction());
    }
}
