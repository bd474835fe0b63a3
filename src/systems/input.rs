//! Input resolution
//!
//! Turns per-entity move bindings into a direction each frame. All triggered
//! bindings sum (so opposite keys cancel and diagonals work); no triggered
//! binding means the entity stands still.

use hecs::World;
use macroquad::prelude::Vec2;

use crate::components::{Direction, MoveBindings};
use crate::input::{all_triggered, InputSource};

/// Resolve move bindings into [`Direction`] for every bound entity.
pub fn resolve_directions(world: &mut World, source: &impl InputSource) {
    for (_entity, (bindings, direction)) in world.query_mut::<(&MoveBindings, &mut Direction)>() {
        let mut resolved = Vec2::ZERO;
        for v in all_triggered(&bindings.0, source) {
            resolved += v;
        }
        // Diagonal keyboard input would otherwise be faster
        if resolved.length() > 1.0 {
            resolved = resolved.normalize();
        }
        direction.0 = resolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;
    use crate::input::{Chord, InputId};
    use macroquad::prelude::{vec2, KeyCode};

    fn arrow_bindings() -> MoveBindings {
        MoveBindings(vec![
            Chord::key(KeyCode::Up, vec2(0.0, 1.0)),
            Chord::key(KeyCode::Down, vec2(0.0, -1.0)),
            Chord::key(KeyCode::Left, vec2(-1.0, 0.0)),
            Chord::key(KeyCode::Right, vec2(1.0, 0.0)),
        ])
    }

    fn held(keys: Vec<KeyCode>) -> impl Fn(&InputId) -> bool {
        move |id| matches!(id, InputId::Key(k) if keys.contains(k))
    }

    #[test]
    fn no_input_means_standing_still() {
        let mut world = World::new();
        let e = world.spawn((
            Position(Vec2::ZERO),
            Direction(vec2(1.0, 0.0)),
            arrow_bindings(),
        ));

        resolve_directions(&mut world, &held(vec![]));
        assert_eq!(world.get::<&Direction>(e).unwrap().0, Vec2::ZERO);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut world = World::new();
        let e = world.spawn((Direction::default(), arrow_bindings()));

        resolve_directions(&mut world, &held(vec![KeyCode::Up, KeyCode::Down]));
        assert_eq!(world.get::<&Direction>(e).unwrap().0, Vec2::ZERO);
    }

    #[test]
    fn diagonal_is_normalized() {
        let mut world = World::new();
        let e = world.spawn((Direction::default(), arrow_bindings()));

        resolve_directions(&mut world, &held(vec![KeyCode::Up, KeyCode::Right]));
        let dir = world.get::<&Direction>(e).unwrap().0;
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn unbound_entities_are_untouched() {
        let mut world = World::new();
        let e = world.spawn((Direction(vec2(0.5, 0.0)),));

        resolve_directions(&mut world, &held(vec![KeyCode::Up]));
        assert_eq!(world.get::<&Direction>(e).unwrap().0, vec2(0.5, 0.0));
    }
}
