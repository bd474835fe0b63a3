//! Game components
//!
//! Plain data structs attached to hecs entities. Behavior lives in the
//! systems module; component presence is what systems query on.

use hecs::Entity;
use macroquad::prelude::Vec2;

use crate::animator::Animator;
use crate::input::Chord;
use crate::particles::ParticleEffect;
use crate::render::{tile, TileRef};

// =============================================================================
// Movement
// =============================================================================

/// World position in world units (centered origin, +y up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Intended move direction, normalized by the movement system.
/// Zero means "standing still".
#[derive(Debug, Clone, Copy, Default)]
pub struct Direction(pub Vec2);

/// Movement speed in world units per frame.
#[derive(Debug, Clone, Copy)]
pub struct Speed(pub f32);

/// Per-axis chase factor used by the arena prototype: each frame the entity
/// covers `delta * velocity` of the remaining distance to its target,
/// component-wise. Not a physical velocity.
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Keyboard/gamepad bindings resolved into [`Direction`] each frame.
#[derive(Debug, Clone)]
pub struct MoveBindings(pub Vec<Chord<Vec2>>);

// =============================================================================
// Presentation
// =============================================================================

/// How an entity is drawn: a fixed atlas tile or an animation set.
#[derive(Debug, Clone)]
pub enum Presenter {
    Tile(TileRef),
    Animated(Animator),
}

// =============================================================================
// Arena combat
// =============================================================================

/// Rock-paper-scissors faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Rock,
    Paper,
    Scissors,
}

impl Faction {
    pub const ALL: [Faction; 3] = [Faction::Rock, Faction::Paper, Faction::Scissors];

    /// The faction this one chases and converts.
    pub fn prey(self) -> Faction {
        match self {
            Faction::Rock => Faction::Scissors,
            Faction::Paper => Faction::Rock,
            Faction::Scissors => Faction::Paper,
        }
    }

    /// The faction that chases and converts this one.
    pub fn predator(self) -> Faction {
        match self {
            Faction::Rock => Faction::Paper,
            Faction::Paper => Faction::Scissors,
            Faction::Scissors => Faction::Rock,
        }
    }

    /// Atlas tile for arena entities of this faction (64x64 tiles, row 0).
    pub fn tile(self) -> TileRef {
        match self {
            Faction::Rock => tile(0.0, 0.0, 64.0, 64.0),
            Faction::Paper => tile(64.0, 0.0, 64.0, 64.0),
            Faction::Scissors => tile(128.0, 0.0, 64.0, 64.0),
        }
    }
}

/// Current chase target. Removed when reached or when the target goes away.
#[derive(Debug, Clone, Copy)]
pub struct Target(pub Entity);

// =============================================================================
// Gun / lifetime
// =============================================================================

/// A gun that spawns bullets at a fixed rate while a shoot binding is held.
#[derive(Debug, Clone)]
pub struct Gun {
    /// Shoot bindings; the first triggered one picks the bullet direction.
    pub shoot_bindings: Vec<Chord<crate::systems::gun::BulletDirection>>,
    /// Volleys per second.
    pub fire_rate: f32,
    /// Accumulated firing time. Positive means volleys are owed; never
    /// allowed above zero while the trigger is released.
    pub fire_time_buffer: f32,
    /// Bullet speed in world units per frame.
    pub bullet_speed: f32,
    /// Bullet lifetime in frames.
    pub bullet_lifetime: u32,
    /// Muzzle offsets; one bullet per offset per volley.
    pub pattern: Vec<Vec2>,
}

impl Gun {
    pub fn new(fire_rate: f32, bullet_speed: f32, bullet_lifetime: u32) -> Self {
        Self {
            shoot_bindings: Vec::new(),
            fire_rate,
            fire_time_buffer: 0.0,
            bullet_speed,
            bullet_lifetime,
            pattern: vec![Vec2::ZERO],
        }
    }

    pub fn with_bindings(mut self, bindings: Vec<Chord<crate::systems::gun::BulletDirection>>) -> Self {
        self.shoot_bindings = bindings;
        self
    }

    pub fn with_pattern(mut self, pattern: Vec<Vec2>) -> Self {
        self.pattern = pattern;
        self
    }
}

/// Frames until the entity is removed by the lifetime system.
#[derive(Debug, Clone, Copy)]
pub struct Lifetime(pub u32);

/// Particle burst played at the entity's last position when its lifetime
/// expires.
#[derive(Debug, Clone)]
pub struct DeathBurst(pub ParticleEffect);
