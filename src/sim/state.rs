//! Simulation state
//!
//! [`Simulation`] owns the one and only entity collection. Entities are kept
//! in a dense vector; dead ones stay in place as tombstones until the
//! end-of-tick compaction.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Ship};
use crate::settings::Settings;

/// Things that happened during a tick (for logging, audio, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    ProjectileFired { pos: Vec2 },
    ProjectileExpired { pos: Vec2 },
    AsteroidDestroyed { pos: Vec2, radius: f32, children: u32 },
    ShipDestroyed { pos: Vec2 },
}

/// Serializable view of the world at a tick boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub entities: Vec<Entity>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) settings: Settings,
    pub(crate) entities: Vec<Entity>,
    pub(crate) rng: Pcg32,
    /// Events from the most recent tick
    pub(crate) events: Vec<SimEvent>,
    pub(crate) time_ticks: u64,
}

impl Simulation {
    /// Start a session: the configured asteroids at the default spawn point
    /// plus the ship
    pub fn new(settings: Settings) -> Self {
        let mut sim = Self::empty(settings);
        for _ in 0..sim.settings.initial_asteroids {
            let asteroid = Entity::default_asteroid(&mut sim.rng);
            sim.entities.push(asteroid);
        }
        sim.entities.push(Entity::ship());

        log::info!(
            "Session started (seed {}): {} asteroids, 1 ship",
            sim.settings.seed,
            sim.settings.initial_asteroids
        );
        sim
    }

    /// A session with no entities at all (scripted scenarios, tests)
    pub fn empty(settings: Settings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            entities: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Add an entity to the live set
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// The ship entity, if it is still alive
    pub fn ship(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_ship())
    }

    pub fn ship_state(&self) -> Option<&Ship> {
        self.ship().and_then(Entity::as_ship)
    }

    pub fn asteroid_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_asteroid()).count()
    }

    pub fn projectile_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_projectile()).count()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ticks: self.time_ticks,
            entities: self.entities.clone(),
        }
    }

    /// Drop every entity marked dead during this tick
    pub(crate) fn compact(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(Entity::is_alive);
        before - self.entities.len()
    }
}
