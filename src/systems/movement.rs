//! Movement with boundary clamping
//!
//! Steps every entity with a position, direction and speed, then clamps the
//! result into the playfield so nothing walks off screen.

use hecs::World;
use macroquad::prelude::Vec2;

use crate::components::{Direction, Position, Speed};

/// Advance every moving entity by one frame, keeping positions inside
/// `±clamp` on both axes.
///
/// Callers derive `clamp` from the visible world extent minus the entity
/// tile size (see [`crate::render::world_half_extent`]).
pub fn move_entities(world: &mut World, clamp: Vec2) {
    for (_entity, (position, direction, speed)) in
        world.query_mut::<(&mut Position, &Direction, &Speed)>()
    {
        if direction.0 == Vec2::ZERO {
            continue;
        }

        let next = position.0 + direction.0.normalize() * speed.0;
        position.0.x = next.x.clamp(-clamp.x, clamp.x);
        position.0.y = next.y.clamp(-clamp.y, clamp.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::vec2;

    const CLAMP: Vec2 = Vec2::new(10.0, 8.0);

    #[test]
    fn moves_along_direction_at_speed() {
        let mut world = World::new();
        let e = world.spawn((
            Position(Vec2::ZERO),
            Direction(vec2(1.0, 0.0)),
            Speed(0.5),
        ));

        move_entities(&mut world, CLAMP);
        assert_eq!(world.get::<&Position>(e).unwrap().0, vec2(0.5, 0.0));
    }

    #[test]
    fn direction_is_normalized_before_stepping() {
        let mut world = World::new();
        let e = world.spawn((
            Position(Vec2::ZERO),
            Direction(vec2(3.0, 4.0)),
            Speed(1.0),
        ));

        move_entities(&mut world, CLAMP);
        let pos = world.get::<&Position>(e).unwrap().0;
        assert!((pos.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_direction_stands_still() {
        let mut world = World::new();
        let e = world.spawn((Position(vec2(2.0, 3.0)), Direction(Vec2::ZERO), Speed(1.0)));

        move_entities(&mut world, CLAMP);
        assert_eq!(world.get::<&Position>(e).unwrap().0, vec2(2.0, 3.0));
    }

    #[test]
    fn positions_never_leave_the_bounds() {
        let mut world = World::new();
        let e = world.spawn((
            Position(vec2(9.9, -7.9)),
            Direction(vec2(1.0, -1.0)),
            Speed(5.0),
        ));

        for _ in 0..10 {
            move_entities(&mut world, CLAMP);
            let pos = world.get::<&Position>(e).unwrap().0;
            assert!(pos.x.abs() <= CLAMP.x);
            assert!(pos.y.abs() <= CLAMP.y);
        }
        // Driven hard into the corner it sits exactly on the clamp.
        let pos = world.get::<&Position>(e).unwrap().0;
        assert_eq!(pos, vec2(CLAMP.x, -CLAMP.y));
    }
}
