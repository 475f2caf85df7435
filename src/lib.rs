//! Rockfield - a tiny drifting-asteroids arcade game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (motion, wrapping, collisions, lifetimes)
//! - `renderer`: Drawing surface abstraction and shape tessellation
//! - `input`: Logical keys and held-key polling
//! - `clock`: Fixed timestep accumulator for the frame driver
//! - `settings`: Data-driven tuning and behavior switches

pub mod clock;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::FixedStep;
pub use input::{HeldKeys, KeyQuery, LogicalKey};
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest wall-clock frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Canvas size used when the frontend has not reported one yet
    pub const DEFAULT_CANVAS_WIDTH: f32 = 640.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 480.0;

    /// Ship defaults
    pub const SHIP_START_X: f32 = 300.0;
    pub const SHIP_START_Y: f32 = 300.0;
    pub const SHIP_RADIUS: f32 = 6.0;
    pub const SHIP_TURN_STEP_DEGREES: f32 = 4.0;
    pub const SHIP_THRUST: f32 = 0.05;
    /// Speed above which the soft clamp kicks in
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    pub const SHIP_SPEED_DAMPING: f32 = 0.95;
    /// Seconds between shots while fire is held
    pub const SHIP_FIRE_COOLDOWN: f32 = 0.25;

    /// Projectile defaults - spawned at the ship's nose
    pub const PROJECTILE_SPAWN_OFFSET: f32 = 12.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;
    pub const PROJECTILE_LIFETIME_TICKS: u32 = 50;
    pub const PROJECTILE_RADIUS: f32 = 2.0;
    /// Side of the square drawn for a projectile
    pub const PROJECTILE_DRAW_SIZE: f32 = 2.0;

    /// Asteroid defaults
    pub const ASTEROID_SPAWN_X: f32 = 100.0;
    pub const ASTEROID_SPAWN_Y: f32 = 100.0;
    pub const ASTEROID_RADIUS: f32 = 30.0;
    /// Each velocity component is uniform in [-drift, drift)
    pub const ASTEROID_MAX_DRIFT: f32 = 2.0;
    pub const INITIAL_ASTEROIDS: u32 = 4;

    /// Asteroids strictly larger than this split when destroyed
    pub const SPLIT_MIN_RADIUS: f32 = 10.0;
    pub const SPLIT_RADIUS_DIVISOR: f32 = 2.5;
    pub const SPLIT_CHILDREN: u32 = 3;
}

/// Canvas extent in pixels, queried from the frontend every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a circle sits inside the wrap envelope [-r, extent + r] on both axes
    pub fn contains_wrapped(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= -radius
            && pos.x <= self.width + radius
            && pos.y >= -radius
            && pos.y <= self.height + radius
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(consts::DEFAULT_CANVAS_WIDTH, consts::DEFAULT_CANVAS_HEIGHT)
    }
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along a heading (radians, 0 = +x, screen y grows down)
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}

/// Rotate a local-space point by `heading` and move it to `origin`
#[inline]
pub fn to_world(origin: Vec2, heading: f32, local: Vec2) -> Vec2 {
    origin + heading_vector(heading).rotate(local)
}
