//! Collision detection and asteroid splitting
//!
//! Only asteroid-vs-other pairs are tested. Rocks pass through each other.

use glam::Vec2;
use rand::Rng;

use super::entity::Entity;
use super::state::SimEvent;
use crate::consts::{SPLIT_CHILDREN, SPLIT_MIN_RADIUS, SPLIT_RADIUS_DIVISOR};
use crate::settings::CollisionPolicy;

/// Circle vs circle overlap (touching does not count)
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Whether an asteroid of this radius breaks into children when destroyed
#[inline]
pub fn splits(radius: f32) -> bool {
    radius > SPLIT_MIN_RADIUS
}

/// Children of a destroyed asteroid, all at the parent's last position
pub fn split_children<R: Rng + ?Sized>(pos: Vec2, radius: f32, rng: &mut R) -> Vec<Entity> {
    if !splits(radius) {
        return Vec::new();
    }
    let child_radius = radius / SPLIT_RADIUS_DIVISOR;
    (0..SPLIT_CHILDREN)
        .map(|_| Entity::asteroid(pos, child_radius, rng))
        .collect()
}

/// Scan every asteroid against every non-asteroid and apply hits
///
/// Collided entities are only marked dead here; removal happens in the
/// compaction pass that follows. Returns the number of colliding pairs.
pub fn resolve_collisions<R: Rng + ?Sized>(
    entities: &mut Vec<Entity>,
    policy: &CollisionPolicy,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) -> usize {
    let initial_len = entities.len();
    let mut hits = 0;
    let mut i = 0;

    loop {
        let outer_end = if policy.children_collide_same_tick {
            entities.len()
        } else {
            initial_len
        };
        if i >= outer_end {
            break;
        }

        let asteroid = &entities[i];
        if !asteroid.is_asteroid() || (policy.skip_dead && !asteroid.is_alive()) {
            i += 1;
            continue;
        }
        let (a_pos, a_radius) = (asteroid.pos, asteroid.radius());

        let mut destroyed = false;
        let inner_end = entities.len();
        for j in 0..inner_end {
            let other = &entities[j];
            if other.is_asteroid()
                || (policy.skip_dead && !other.is_alive())
                || (other.is_ship() && !policy.ship_destructible)
            {
                continue;
            }
            if !circles_overlap(a_pos, a_radius, other.pos, other.radius()) {
                continue;
            }

            hits += 1;
            // Later overlaps with an already dead ship still count as hits
            if other.is_ship() && other.is_alive() {
                log::debug!("Ship destroyed at ({:.1}, {:.1})", other.pos.x, other.pos.y);
                events.push(SimEvent::ShipDestroyed { pos: other.pos });
            }
            entities[j].kill();
            entities[i].kill();

            if !destroyed {
                destroyed = true;
                let children = split_children(a_pos, a_radius, rng);
                log::debug!(
                    "Asteroid r={:.1} destroyed at ({:.1}, {:.1}), {} children",
                    a_radius,
                    a_pos.x,
                    a_pos.y,
                    children.len()
                );
                events.push(SimEvent::AsteroidDestroyed {
                    pos: a_pos,
                    radius: a_radius,
                    children: children.len() as u32,
                });
                entities.extend(children);
            }

            if policy.first_match_only {
                break;
            }
        }

        i += 1;
    }

    hits
}
