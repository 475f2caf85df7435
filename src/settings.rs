//! Simulation settings and tuning
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! JSON file only needs the keys it wants to override.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the ship's acceleration feeds into its velocity each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThrustIntegration {
    /// velocity += acceleration (units per tick, the classic arcade feel)
    #[default]
    PerTick,
    /// velocity += acceleration * dt
    ScaledByDt,
}

/// When an entity is teleported to the opposite edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WrapRule {
    /// Wrap once the whole circle has left the canvas (center beyond -r or extent + r)
    #[default]
    Offscreen,
    /// Wrap as soon as the circle's edge crosses the canvas border
    EdgeContact,
}

impl WrapRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            WrapRule::Offscreen => "Offscreen",
            WrapRule::EdgeContact => "EdgeContact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "offscreen" => Some(WrapRule::Offscreen),
            "edge" | "edgecontact" | "edge_contact" => Some(WrapRule::EdgeContact),
            _ => None,
        }
    }
}

/// Ship handling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Heading change per tick while a rotate key is held
    pub turn_step_degrees: f32,
    /// Acceleration magnitude while thrust is held
    pub thrust: f32,
    pub thrust_integration: ThrustIntegration,
    /// Soft speed ceiling
    pub max_speed: f32,
    /// Velocity multiplier applied on ticks that end above `max_speed`
    pub speed_damping: f32,
    /// Simulated seconds that must pass between shots
    pub fire_cooldown: f32,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            turn_step_degrees: SHIP_TURN_STEP_DEGREES,
            thrust: SHIP_THRUST,
            thrust_integration: ThrustIntegration::PerTick,
            max_speed: SHIP_MAX_SPEED,
            speed_damping: SHIP_SPEED_DAMPING,
            fire_cooldown: SHIP_FIRE_COOLDOWN,
        }
    }
}

/// Collision scan behavior
///
/// The defaults reproduce the classic loop exactly: dead entities are still
/// tested, each asteroid stops at its first hit, and anything spawned during
/// the tick (shots, split children) joins the same tick's scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionPolicy {
    /// Ignore entities already marked dead earlier in the same scan
    pub skip_dead: bool,
    /// An asteroid stops scanning after its first overlap
    pub first_match_only: bool,
    /// Projectiles fired this tick are tested this tick
    pub spawned_projectiles_collide: bool,
    /// Children created by a split are scanned as asteroids this tick
    pub children_collide_same_tick: bool,
    /// The ship dies on contact like any other non-asteroid
    pub ship_destructible: bool,
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self {
            skip_dead: false,
            first_match_only: true,
            spawned_projectiles_collide: true,
            children_collide_same_tick: true,
            ship_destructible: true,
        }
    }
}

/// Full simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for asteroid drift
    pub seed: u64,
    /// Asteroids spawned at startup
    pub initial_asteroids: u32,
    pub ship: ShipTuning,
    pub wrap_rule: WrapRule,
    pub collisions: CollisionPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            initial_asteroids: INITIAL_ASTEROIDS,
            ship: ShipTuning::default(),
            wrap_rule: WrapRule::Offscreen,
            collisions: CollisionPolicy::default(),
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse settings from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }
}
