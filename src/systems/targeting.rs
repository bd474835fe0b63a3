//! Rock-paper-scissors combat loop
//!
//! Three passes per frame:
//! 1. [`solve_targets`] — every entity picks the nearest member of its prey
//!    faction as its target.
//! 2. [`chase_targets`] — targeted entities ease toward their target; the
//!    target component drops when reached or stale.
//! 3. [`solve_conflicts`] — overlapping predator/prey pairs convert the prey
//!    to the predator's faction.

use hecs::{Entity, World};
use macroquad::prelude::Vec2;

use crate::components::{Faction, Position, Presenter, Target, Velocity};

fn members_of(world: &World, faction: Faction) -> Vec<(Entity, Vec2)> {
    world
        .query::<(&Position, &Faction)>()
        .iter()
        .filter(|(_, (_, f))| **f == faction)
        .map(|(e, (p, _))| (e, p.0))
        .collect()
}

/// Give every factioned entity the nearest prey entity as its target.
///
/// Linear scan per entity; the arenas are tens of entities. An entity with
/// no live prey keeps whatever target it had (possibly none).
pub fn solve_targets(world: &mut World) {
    let mut assignments: Vec<(Entity, Target)> = Vec::new();

    for faction in Faction::ALL {
        let allies = members_of(world, faction);
        let prey = members_of(world, faction.prey());
        if prey.is_empty() {
            continue;
        }

        for (ally, ally_pos) in allies {
            let nearest = prey
                .iter()
                .min_by(|(_, a), (_, b)| {
                    ally_pos
                        .distance(*a)
                        .total_cmp(&ally_pos.distance(*b))
                })
                .map(|(e, _)| *e);
            if let Some(target) = nearest {
                assignments.push((ally, Target(target)));
            }
        }
    }

    for (entity, target) in assignments {
        // Overwrites any previous target
        let _ = world.insert_one(entity, target);
    }
}

/// Ease every targeted entity toward its target.
///
/// The step is `delta * velocity` component-wise (an exponential approach,
/// not constant speed). A step that covers zero distance means the target is
/// reached and the target component is removed; so is a target that no
/// longer exists.
pub fn chase_targets(world: &mut World) {
    let chasers: Vec<(Entity, Entity)> = world
        .query::<(&Target, &Velocity)>()
        .iter()
        .map(|(e, (t, _))| (e, t.0))
        .collect();

    for (chaser, target) in chasers {
        let Ok(target_pos) = world.get::<&Position>(target).map(|p| p.0) else {
            // Target despawned since it was assigned
            let _ = world.remove_one::<Target>(chaser);
            continue;
        };

        let (reached, next) = {
            let Ok(position) = world.get::<&Position>(chaser).map(|p| p.0) else {
                continue;
            };
            let Ok(velocity) = world.get::<&Velocity>(chaser).map(|v| v.0) else {
                continue;
            };
            let delta = target_pos - position;
            if delta == Vec2::ZERO {
                (true, position)
            } else {
                let next = position + delta * velocity;
                (next.distance(position) == 0.0, next)
            }
        };

        if reached {
            let _ = world.remove_one::<Target>(chaser);
        } else if let Ok(mut position) = world.get::<&mut Position>(chaser) {
            position.0 = next;
        }
    }
}

/// AABB overlap test for unit-sized entities.
fn collides(a: Vec2, b: Vec2, size: Vec2) -> bool {
    a.x < b.x + size.x && a.x + size.x > b.x && a.y < b.y + size.y && a.y + size.y > b.y
}

/// Convert prey touched by a predator to the predator's faction.
///
/// Member lists are re-read per faction so a conversion by rock is visible
/// to the paper pass in the same frame, matching live-query semantics.
pub fn solve_conflicts(world: &mut World) {
    let size = Vec2::ONE;

    for faction in Faction::ALL {
        let allies: Vec<Vec2> = members_of(world, faction)
            .into_iter()
            .map(|(_, p)| p)
            .collect();
        let prey = members_of(world, faction.prey());

        let mut converted: Vec<Entity> = Vec::new();
        for ally_pos in &allies {
            for (enemy, enemy_pos) in &prey {
                if collides(*ally_pos, *enemy_pos, size) && !converted.contains(enemy) {
                    converted.push(*enemy);
                }
            }
        }

        for entity in converted {
            if let Ok(mut f) = world.get::<&mut Faction>(entity) {
                *f = faction;
            }
            if let Ok(mut presenter) = world.get::<&mut Presenter>(entity) {
                *presenter = Presenter::Tile(faction.tile());
            }
        }
    }
}
