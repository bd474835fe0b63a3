//! Entity factories
//!
//! Spawn bundles for the prototypes. Component layouts live here so the
//! binaries and the gun system build identical entities.

use hecs::{Entity, World};
use macroquad::prelude::{vec2, KeyCode, Vec2};
use rand::Rng;

use crate::animator::{Animation, Animator};
use crate::components::{
    DeathBurst, Direction, Faction, Gun, Lifetime, MoveBindings, Position, Presenter, Speed,
    Velocity,
};
use crate::input::{button, Chord};
use crate::particles::ParticleEffect;
use crate::render::tile;
use crate::settings::{ArenaSettings, PlayerSettings};
use crate::systems::gun::BulletDirection;
use crate::systems::lifetime::LifetimeQueue;

/// The character sprites are 16x23 pixels, four walk frames in row 0.
fn character_animator() -> Animator {
    Animator::new(vec![
        Animation::new("idle", vec![tile(0.0, 0.0, 16.0, 23.0)], 1.0, true),
        Animation::new(
            "walking",
            vec![
                tile(0.0, 0.0, 16.0, 23.0),
                tile(16.0, 0.0, 16.0, 23.0),
                tile(32.0, 0.0, 16.0, 23.0),
                tile(48.0, 0.0, 16.0, 23.0),
            ],
            0.25,
            true,
        ),
    ])
}

/// Spawn the player: arrow-key/stick movement, Q/E/W (or pad X/B/Y) shooting,
/// two-muzzle gun.
pub fn spawn_player(world: &mut World, settings: &PlayerSettings) -> Entity {
    let move_bindings = MoveBindings(vec![
        Chord::key(KeyCode::Up, vec2(0.0, 1.0)),
        Chord::key(KeyCode::Down, vec2(0.0, -1.0)),
        Chord::key(KeyCode::Left, vec2(-1.0, 0.0)),
        Chord::key(KeyCode::Right, vec2(1.0, 0.0)),
        // Left stick doubles as a d-pad
        Chord::pad(button::STICK_UP, vec2(0.0, 1.0)),
        Chord::pad(button::STICK_DOWN, vec2(0.0, -1.0)),
        Chord::pad(button::STICK_LEFT, vec2(-1.0, 0.0)),
        Chord::pad(button::STICK_RIGHT, vec2(1.0, 0.0)),
    ]);

    let gun = Gun::new(
        settings.fire_rate,
        settings.bullet_speed,
        settings.bullet_lifetime,
    )
    .with_bindings(vec![
        Chord::key(KeyCode::E, BulletDirection::Right),
        Chord::key(KeyCode::Q, BulletDirection::Left),
        Chord::key(KeyCode::W, BulletDirection::Up),
        Chord::pad(button::B, BulletDirection::Right),
        Chord::pad(button::X, BulletDirection::Left),
        Chord::pad(button::Y, BulletDirection::Up),
    ])
    .with_pattern(vec![vec2(-0.25, 0.0), vec2(0.25, 0.0)]);

    world.spawn((
        Position(Vec2::ZERO),
        Direction(Vec2::ZERO),
        Speed(settings.speed),
        move_bindings,
        gun,
        Presenter::Animated(character_animator()),
    ))
}

/// Spawn a wandering enemy at a position.
pub fn spawn_enemy(world: &mut World, position: Vec2) -> Entity {
    world.spawn((
        Position(position),
        Direction(Vec2::ZERO),
        Speed(0.05),
        Presenter::Animated(character_animator()),
    ))
}

/// Spawn a bullet and schedule its expiry.
pub fn spawn_bullet(
    world: &mut World,
    lifetimes: &mut LifetimeQueue,
    position: Vec2,
    direction: BulletDirection,
    speed: f32,
    lifetime: u32,
) -> Entity {
    let entity = world.spawn((
        Position(position),
        Direction(direction.direction()),
        Speed(speed),
        Presenter::Tile(direction.tile()),
        Lifetime(lifetime),
        DeathBurst(ParticleEffect::bullet_pop()),
    ));
    lifetimes.schedule(entity, lifetime);
    entity
}

/// Populate the rock-paper-scissors arena with random entities.
pub fn spawn_arena(world: &mut World, settings: &ArenaSettings, rng: &mut impl Rng) {
    for _ in 0..settings.entity_count {
        let faction = Faction::ALL[rng.gen_range(0..Faction::ALL.len())];
        let extent = settings.spawn_extent;
        let position = vec2(
            rng.gen_range(-extent..=extent).round(),
            rng.gen_range(-extent..=extent).round(),
        );
        let velocity = vec2(
            rng.gen_range(settings.speed_min..=settings.speed_max),
            rng.gen_range(settings.speed_min..=settings.speed_max),
        );

        world.spawn((
            Position(position),
            Velocity(velocity),
            faction,
            Presenter::Tile(faction.tile()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn player_carries_movement_and_gun() {
        let mut world = World::new();
        let player = spawn_player(&mut world, &PlayerSettings::default());

        assert!(world.get::<&Gun>(player).is_ok());
        assert!(world.get::<&MoveBindings>(player).is_ok());
        assert!(matches!(
            &*world.get::<&Presenter>(player).unwrap(),
            Presenter::Animated(_)
        ));
    }

    #[test]
    fn bullet_is_scheduled_and_aimed() {
        let mut world = World::new();
        let mut lifetimes = LifetimeQueue::new();
        let bullet = spawn_bullet(
            &mut world,
            &mut lifetimes,
            vec2(1.0, 2.0),
            BulletDirection::Left,
            0.3,
            45,
        );

        assert_eq!(lifetimes.pending(), 1);
        assert_eq!(
            world.get::<&Direction>(bullet).unwrap().0,
            BulletDirection::Left.direction()
        );
        assert_eq!(world.get::<&Lifetime>(bullet).unwrap().0, 45);
    }

    #[test]
    fn arena_spawn_respects_count_and_bounds() {
        let mut world = World::new();
        let settings = ArenaSettings::default();
        let mut rng = StepRng::new(42, 1_000_000_007);

        spawn_arena(&mut world, &settings, &mut rng);

        let mut count = 0;
        for (_, (position, _)) in world.query::<(&Position, &Faction)>().iter() {
            assert!(position.0.x.abs() <= settings.spawn_extent);
            assert!(position.0.y.abs() <= settings.spawn_extent);
            count += 1;
        }
        assert_eq!(count, settings.entity_count);
    }
}
