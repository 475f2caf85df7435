//! Motion integration and toroidal wrapping

use super::entity::{Entity, EntityKind};
use super::tick::TickInput;
use crate::settings::{ShipTuning, ThrustIntegration, WrapRule};
use crate::{Bounds, heading_vector, normalize_angle};

/// What happened to an entity during its motion step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotionOutcome {
    /// Projectile fired this tick (ship only)
    pub fired: Option<Entity>,
    /// Lifetime ran out this tick
    pub expired: bool,
}

/// Advance one entity by one tick, dispatching on its kind
pub fn update_entity(
    entity: &mut Entity,
    input: &TickInput,
    tuning: &ShipTuning,
    dt: f32,
) -> MotionOutcome {
    match entity.kind {
        EntityKind::Ship(_) => update_ship(entity, input, tuning, dt),
        EntityKind::Asteroid | EntityKind::Projectile => MotionOutcome {
            fired: None,
            expired: advance(entity),
        },
    }
}

/// Ship control, Euler step, soft speed clamp and fire cooldown
pub fn update_ship(
    entity: &mut Entity,
    input: &TickInput,
    tuning: &ShipTuning,
    dt: f32,
) -> MotionOutcome {
    let EntityKind::Ship(ship) = &mut entity.kind else {
        return MotionOutcome::default();
    };

    // Left is checked first and wins when both are held
    let turn = tuning.turn_step_degrees.to_radians();
    if input.rotate_left {
        ship.heading = normalize_angle(ship.heading - turn);
    } else if input.rotate_right {
        ship.heading = normalize_angle(ship.heading + turn);
    }

    ship.accel = if input.thrust {
        heading_vector(ship.heading) * tuning.thrust
    } else {
        glam::Vec2::ZERO
    };

    let dv = match tuning.thrust_integration {
        ThrustIntegration::PerTick => ship.accel,
        ThrustIntegration::ScaledByDt => ship.accel * dt,
    };
    entity.vel += dv;
    entity.pos += entity.vel;

    // Soft clamp: one multiplicative step per tick, never a hard cap
    if entity.vel.length() > tuning.max_speed {
        entity.vel *= tuning.speed_damping;
    }

    ship.fire_cooldown += dt;
    let mut fired = None;
    if input.fire && ship.fire_cooldown > tuning.fire_cooldown {
        ship.fire_cooldown = 0.0;
        fired = Some(Entity::projectile(entity.pos, entity.vel, ship.heading));
    }

    MotionOutcome {
        fired,
        expired: false,
    }
}

/// Drift without acceleration and count down finite lifetimes
///
/// Returns true if the entity's lifetime ran out on this tick.
pub fn advance(entity: &mut Entity) -> bool {
    entity.pos += entity.vel;
    entity.lifetime.tick_down()
}

/// Teleport an entity that left the canvas to the opposite edge
///
/// Each axis is handled independently; the low and high branches of an axis
/// are mutually exclusive.
pub fn wrap(entity: &mut Entity, bounds: Bounds, rule: WrapRule) {
    let r = entity.radius();
    entity.pos.x = wrap_axis(entity.pos.x, r, bounds.width, rule);
    entity.pos.y = wrap_axis(entity.pos.y, r, bounds.height, rule);
}

#[inline]
fn wrap_axis(p: f32, r: f32, extent: f32, rule: WrapRule) -> f32 {
    let (past_low, past_high) = match rule {
        WrapRule::Offscreen => (p < -r, p > extent + r),
        WrapRule::EdgeContact => (p - r < 0.0, p + r > extent),
    };
    if past_low {
        extent + r
    } else if past_high {
        -r
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::entity::Lifetime;
    use glam::Vec2;
    use proptest::prelude::*;

    fn ship_heading(e: &Entity) -> f32 {
        e.as_ship().unwrap().heading
    }

    #[test]
    fn test_thrust_one_tick_scaled_by_dt() {
        let tuning = ShipTuning {
            thrust_integration: ThrustIntegration::ScaledByDt,
            ..ShipTuning::default()
        };
        let mut ship = Entity::ship();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        update_ship(&mut ship, &input, &tuning, SIM_DT);

        assert!((ship.vel.x - 0.05 / 60.0).abs() < 1e-7);
        assert!(ship.vel.y.abs() < 1e-7);
        assert!((ship.pos.x - (300.0 + 0.05 / 60.0)).abs() < 1e-4);
        assert_eq!(ship.pos.y, 300.0);
    }

    #[test]
    fn test_thrust_one_tick_per_tick() {
        let tuning = ShipTuning::default();
        let mut ship = Entity::ship();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        update_ship(&mut ship, &input, &tuning, SIM_DT);

        assert!((ship.vel.x - 0.05).abs() < 1e-6);
        assert!((ship.pos.x - 300.05).abs() < 1e-4);
        assert!((ship.as_ship().unwrap().accel.x - 0.05).abs() < 1e-6);

        // Releasing thrust zeroes acceleration but keeps velocity
        update_ship(&mut ship, &TickInput::default(), &tuning, SIM_DT);
        assert_eq!(ship.as_ship().unwrap().accel, Vec2::ZERO);
        assert!((ship.vel.x - 0.05).abs() < 1e-6);
        assert!((ship.pos.x - 300.1).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_left_wins() {
        let tuning = ShipTuning::default();
        let mut ship = Entity::ship();
        let both = TickInput {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };
        update_ship(&mut ship, &both, &tuning, SIM_DT);
        assert!((ship_heading(&ship) + 4f32.to_radians()).abs() < 1e-6);

        let right = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        update_ship(&mut ship, &right, &tuning, SIM_DT);
        update_ship(&mut ship, &right, &tuning, SIM_DT);
        assert!((ship_heading(&ship) - 4f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_speed_clamp_is_soft() {
        let tuning = ShipTuning::default();
        let mut ship = Entity::ship();
        ship.vel = Vec2::new(10.0, 0.0);
        update_ship(&mut ship, &TickInput::default(), &tuning, SIM_DT);
        // One damping step, not a snap to the ceiling
        assert!((ship.vel.x - 9.5).abs() < 1e-5);
        // Position moved with the pre-clamp velocity
        assert!((ship.pos.x - 310.0).abs() < 1e-4);

        let mut ticks = 1;
        while ship.vel.length() > tuning.max_speed {
            let before = ship.vel.length();
            update_ship(&mut ship, &TickInput::default(), &tuning, SIM_DT);
            assert!((ship.vel.length() - before * 0.95).abs() < 1e-4);
            ticks += 1;
        }
        assert!(ticks > 10);
        assert!(ship.vel.length() < tuning.max_speed);
    }

    #[test]
    fn test_sustained_thrust_never_exceeds_ceiling() {
        let tuning = ShipTuning::default();
        let mut ship = Entity::ship();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        let mut peak: f32 = 0.0;
        for _ in 0..2000 {
            update_ship(&mut ship, &input, &tuning, SIM_DT);
            peak = peak.max(ship.vel.length());
            assert!(ship.vel.length() <= tuning.max_speed + 1e-4);
        }
        // Approaches the ceiling
        assert!(peak > tuning.max_speed - 0.1);
    }

    #[test]
    fn test_fire_cooldown_first_shot() {
        let tuning = ShipTuning::default();
        let mut ship = Entity::ship();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let mut first_shot = None;
        for i in 1..=20 {
            if update_ship(&mut ship, &fire, &tuning, SIM_DT).fired.is_some() {
                first_shot = Some(i);
                break;
            }
        }
        // 0.25 s must have fully elapsed: 15 or 16 ticks at 60 Hz
        let tick = first_shot.unwrap();
        assert!(tick >= 15 && tick <= 16, "first shot at tick {tick}");
        assert_eq!(ship.as_ship().unwrap().fire_cooldown, 0.0);
    }

    #[test]
    fn test_cooldown_accumulates_without_fire() {
        let tuning = ShipTuning::default();
        let mut ship = Entity::ship();
        for _ in 0..60 {
            update_ship(&mut ship, &TickInput::default(), &tuning, SIM_DT);
        }
        // Charged shot is available immediately
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let out = update_ship(&mut ship, &fire, &tuning, SIM_DT);
        let shot = out.fired.unwrap();
        assert!(shot.is_projectile());
        assert!((shot.pos - Vec2::new(312.0, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_projectile_expires() {
        let mut p = Entity::projectile(Vec2::ZERO, Vec2::ZERO, 0.0);
        p.lifetime = Lifetime::Ticks(2);
        assert!(!advance(&mut p));
        assert!(advance(&mut p));
        assert!(!p.is_alive());
        assert!((p.pos.x - 22.0).abs() < 1e-4);
    }

    #[test]
    fn test_asteroid_drifts_forever() {
        let mut a = Entity::asteroid_with_velocity(Vec2::new(5.0, 5.0), Vec2::new(1.0, -1.0), 10.0);
        let outcome = update_entity(&mut a, &TickInput::default(), &ShipTuning::default(), SIM_DT);
        assert_eq!(outcome, MotionOutcome::default());
        assert_eq!(a.pos, Vec2::new(6.0, 4.0));
        assert!(a.is_alive());
    }

    #[test]
    fn test_wrap_edge_contact_scenario() {
        let mut a = Entity::asteroid_with_velocity(Vec2::new(-5.0, 50.0), Vec2::ZERO, 30.0);
        wrap(&mut a, Bounds::new(640.0, 480.0), WrapRule::EdgeContact);
        assert_eq!(a.pos.x, 670.0);
        // y axis handled independently and is inside the canvas
        assert_eq!(a.pos.y, 50.0);

        a.pos = Vec2::new(320.0, 470.0);
        wrap(&mut a, Bounds::new(640.0, 480.0), WrapRule::EdgeContact);
        assert_eq!(a.pos, Vec2::new(320.0, -30.0));
    }

    #[test]
    fn test_wrap_offscreen() {
        let bounds = Bounds::new(640.0, 480.0);
        let mut a = Entity::asteroid_with_velocity(Vec2::new(-5.0, 50.0), Vec2::ZERO, 30.0);
        wrap(&mut a, bounds, WrapRule::Offscreen);
        // Still partly visible, no teleport
        assert_eq!(a.pos, Vec2::new(-5.0, 50.0));

        a.pos = Vec2::new(-31.0, 511.0);
        wrap(&mut a, bounds, WrapRule::Offscreen);
        assert_eq!(a.pos, Vec2::new(670.0, -30.0));

        a.pos = Vec2::new(671.0, 100.0);
        wrap(&mut a, bounds, WrapRule::Offscreen);
        assert_eq!(a.pos, Vec2::new(-30.0, 100.0));
    }

    #[test]
    fn test_wrap_after_shrink() {
        // Canvas shrank between ticks
        let mut a = Entity::asteroid_with_velocity(Vec2::new(600.0, 400.0), Vec2::ZERO, 10.0);
        wrap(&mut a, Bounds::new(320.0, 240.0), WrapRule::Offscreen);
        assert_eq!(a.pos, Vec2::new(-10.0, -10.0));
    }

    proptest! {
        #[test]
        fn prop_wrap_keeps_envelope(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            r in 0.0f32..60.0,
            w in 100.0f32..1920.0,
            h in 100.0f32..1080.0,
            edge in any::<bool>(),
        ) {
            let rule = if edge { WrapRule::EdgeContact } else { WrapRule::Offscreen };
            let bounds = Bounds::new(w, h);
            let mut e = Entity::asteroid_with_velocity(Vec2::new(x, y), Vec2::ZERO, r);
            wrap(&mut e, bounds, rule);
            prop_assert!(bounds.contains_wrapped(e.pos, r));
        }

        #[test]
        fn prop_fire_rate_limited(pattern in proptest::collection::vec(any::<bool>(), 1..600)) {
            let tuning = ShipTuning::default();
            let mut ship = Entity::ship();
            let mut last_shot: Option<usize> = None;
            let mut shots = 0usize;
            for (i, &fire) in pattern.iter().enumerate() {
                let input = TickInput { fire, ..Default::default() };
                if update_ship(&mut ship, &input, &tuning, SIM_DT).fired.is_some() {
                    if let Some(prev) = last_shot {
                        // 15 ticks of 1/60 s is the 0.25 s cooldown
                        prop_assert!(i - prev >= 15);
                    } else {
                        prop_assert!(i + 1 >= 15);
                    }
                    last_shot = Some(i);
                    shots += 1;
                }
            }
            prop_assert!(shots <= pattern.len() / 15);
        }
    }
}
