//! Fixed timestep simulation tick
//!
//! Order within a tick is always: update + wrap, collisions, compaction.
//! Rendering happens after the tick returns.

use super::collision::resolve_collisions;
use super::motion::{update_entity, wrap};
use super::state::{SimEvent, Simulation};
use crate::Bounds;
use crate::input::{KeyQuery, LogicalKey};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl TickInput {
    /// Poll the held-key state
    pub fn from_keys<K: KeyQuery + ?Sized>(keys: &K) -> Self {
        Self {
            rotate_left: keys.is_pressed(LogicalKey::RotateLeft),
            rotate_right: keys.is_pressed(LogicalKey::RotateRight),
            thrust: keys.is_pressed(LogicalKey::Thrust),
            fire: keys.is_pressed(LogicalKey::Fire),
        }
    }
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut Simulation, input: &TickInput, bounds: Bounds, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    let tuning = &state.settings.ship;
    let wrap_rule = state.settings.wrap_rule;

    // Update phase: every entity that was live at the start of the tick
    let mut spawned = Vec::new();
    for entity in &mut state.entities {
        let outcome = update_entity(entity, input, tuning, dt);
        wrap(entity, bounds, wrap_rule);

        if outcome.expired {
            state.events.push(SimEvent::ProjectileExpired { pos: entity.pos });
        }
        if let Some(mut projectile) = outcome.fired {
            log::debug!(
                "Projectile fired at ({:.1}, {:.1})",
                projectile.pos.x,
                projectile.pos.y
            );
            // Not advanced this tick, but kept inside the wrap envelope
            wrap(&mut projectile, bounds, wrap_rule);
            state.events.push(SimEvent::ProjectileFired { pos: projectile.pos });
            spawned.push(projectile);
        }
    }

    let policy = &state.settings.collisions;
    if policy.spawned_projectiles_collide {
        state.entities.append(&mut spawned);
    }

    let first_child = state.entities.len();
    let hits = resolve_collisions(&mut state.entities, policy, &mut state.rng, &mut state.events);
    // Split children inherit the parent's position, which may be outside
    // their own (smaller) wrap envelope
    for child in &mut state.entities[first_child..] {
        wrap(child, bounds, wrap_rule);
    }

    state.entities.append(&mut spawned);
    let removed = state.compact();

    log::trace!(
        "tick {}: {} live, {} hits, {} removed",
        state.time_ticks,
        state.entities.len(),
        hits,
        removed
    );
}

impl Simulation {
    /// Poll keys and run one tick
    pub fn update<K: KeyQuery + ?Sized>(&mut self, keys: &K, bounds: Bounds, dt: f32) {
        tick(self, &TickInput::from_keys(keys), bounds, dt);
    }
}
