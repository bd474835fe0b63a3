//! Lifetime expiry
//!
//! Entities with a finite lifetime are scheduled into a frame-indexed
//! delayed-removal queue at spawn time. Each frame drains exactly the bucket
//! for that frame, so expiry cost is proportional to what actually dies and
//! removal fires exactly at the scheduled frame.

use std::collections::HashMap;

use hecs::{Entity, World};

use crate::components::{DeathBurst, Position};
use crate::particles::ParticlePool;

/// Frame-bucketed queue of entities awaiting removal.
#[derive(Debug, Default)]
pub struct LifetimeQueue {
    /// Current frame number, advanced once per [`update`](Self::update).
    frame: u64,
    /// Absolute frame number -> entities to remove that frame.
    scheduled: HashMap<u64, Vec<Entity>>,
}

impl LifetimeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current frame number.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of entities still awaiting removal.
    pub fn pending(&self) -> usize {
        self.scheduled.values().map(Vec::len).sum()
    }

    /// Schedule an entity for removal `lifetime` frames from now.
    ///
    /// Called at the spawn site of every entity carrying a
    /// [`Lifetime`](crate::components::Lifetime) component.
    pub fn schedule(&mut self, entity: Entity, lifetime: u32) {
        self.scheduled
            .entry(self.frame + u64::from(lifetime))
            .or_default()
            .push(entity);
    }

    /// Remove everything scheduled for the current frame, then advance.
    ///
    /// Draining before the frame counter moves means an entity scheduled
    /// earlier in the same frame (bucket `frame + lifetime`) survives its
    /// spawn frame and is removed `lifetime` updates later.
    ///
    /// Entities that were despawned by other means are skipped silently.
    /// An expiring entity with a [`DeathBurst`] plays it at its last
    /// position before despawning.
    pub fn update(&mut self, world: &mut World, particles: &mut ParticlePool) {
        let expired = self.scheduled.remove(&self.frame);
        self.frame += 1;

        let Some(expired) = expired else {
            return;
        };

        for entity in expired {
            if !world.contains(entity) {
                continue;
            }

            let burst = {
                let position = world.get::<&Position>(entity).map(|p| p.0).ok();
                let effect = world.get::<&DeathBurst>(entity).map(|b| b.0.clone()).ok();
                position.zip(effect)
            };
            if let Some((position, effect)) = burst {
                particles.burst(&effect, position);
            }

            // contains() was checked above; a failure here would mean the
            // bucket held a duplicate, which schedule() never produces.
            let _ = world.despawn(entity);
        }
    }
}
