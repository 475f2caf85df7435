//! Entity types and factories
//!
//! Every simulated object is an [`Entity`]: shared motion fields plus an
//! [`EntityKind`] tag carrying the per-kind extras.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::heading_vector;

/// Remaining lifetime of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifetime {
    /// Lives until explicitly killed
    Infinite,
    /// Expires when the countdown reaches zero
    Ticks(u32),
}

impl Lifetime {
    #[inline]
    pub fn is_alive(&self) -> bool {
        *self != Lifetime::Ticks(0)
    }

    /// Count down one tick; returns true if this tick was the last one
    pub fn tick_down(&mut self) -> bool {
        match self {
            Lifetime::Infinite | Lifetime::Ticks(0) => false,
            Lifetime::Ticks(n) => {
                *n -= 1;
                *n == 0
            }
        }
    }
}

/// Ship-only state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    /// Radians, 0 points along +x
    pub heading: f32,
    /// Acceleration applied this tick (recomputed from input every tick)
    pub accel: Vec2,
    /// Simulated seconds since the last shot
    pub fire_cooldown: f32,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            heading: 0.0,
            accel: Vec2::ZERO,
            fire_cooldown: 0.0,
        }
    }
}

/// Entity variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship(Ship),
    Asteroid,
    Projectile,
}

/// A simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lifetime: Lifetime,
    pub kind: EntityKind,
    /// Collision radius, fixed at creation
    radius: f32,
}

impl Entity {
    /// Asteroid with a random drift in [-2, 2) on each axis
    pub fn asteroid<R: Rng + ?Sized>(pos: Vec2, radius: f32, rng: &mut R) -> Self {
        let vel = Vec2::new(
            rng.random_range(-ASTEROID_MAX_DRIFT..ASTEROID_MAX_DRIFT),
            rng.random_range(-ASTEROID_MAX_DRIFT..ASTEROID_MAX_DRIFT),
        );
        Self::asteroid_with_velocity(pos, vel, radius)
    }

    /// Full-size asteroid at the default spawn point
    pub fn default_asteroid<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::asteroid(
            Vec2::new(ASTEROID_SPAWN_X, ASTEROID_SPAWN_Y),
            ASTEROID_RADIUS,
            rng,
        )
    }

    /// Asteroid with an explicit velocity
    pub fn asteroid_with_velocity(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            lifetime: Lifetime::Infinite,
            kind: EntityKind::Asteroid,
            radius: radius.max(0.0),
        }
    }

    /// The player's ship at its start position, at rest, facing +x
    pub fn ship() -> Self {
        Self::ship_at(Vec2::new(SHIP_START_X, SHIP_START_Y), 0.0)
    }

    pub fn ship_at(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            lifetime: Lifetime::Infinite,
            kind: EntityKind::Ship(Ship {
                heading,
                ..Ship::default()
            }),
            radius: SHIP_RADIUS,
        }
    }

    /// Projectile leaving the nose of a ship with the given motion state
    pub fn projectile(ship_pos: Vec2, ship_vel: Vec2, heading: f32) -> Self {
        let dir = heading_vector(heading);
        Self {
            pos: ship_pos + dir * PROJECTILE_SPAWN_OFFSET,
            vel: ship_vel + dir * PROJECTILE_SPEED,
            lifetime: Lifetime::Ticks(PROJECTILE_LIFETIME_TICKS),
            kind: EntityKind::Projectile,
            radius: PROJECTILE_RADIUS,
        }
    }

    /// Projectile fired by `ship`; `None` if the entity is not a ship
    pub fn projectile_from(ship: &Entity) -> Option<Self> {
        ship.as_ship()
            .map(|s| Self::projectile(ship.pos, ship.vel, s.heading))
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifetime.is_alive()
    }

    /// Mark for removal at end-of-tick compaction
    #[inline]
    pub fn kill(&mut self) {
        self.lifetime = Lifetime::Ticks(0);
    }

    #[inline]
    pub fn is_asteroid(&self) -> bool {
        matches!(self.kind, EntityKind::Asteroid)
    }

    #[inline]
    pub fn is_ship(&self) -> bool {
        matches!(self.kind, EntityKind::Ship(_))
    }

    #[inline]
    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile)
    }

    pub fn as_ship(&self) -> Option<&Ship> {
        match &self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }
}
