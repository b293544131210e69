//! Homing guidance for player ordnance.
//!
//! Missiles and mines fly turn-rate-limited pure pursuit. Target handles are
//! weak: every tick they are checked against the live hostile set, and a
//! lost target is dropped (missiles) or reacquired (mines).

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};

use starwake_core::components::{Hostile, Projectile};
use starwake_core::constants::DT;
use starwake_core::types::{Position, Velocity};

/// Homing state attached to a missile or mine projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homing {
    pub target: Option<Entity>,
    /// Max heading change (rad/s).
    pub turn_rate: f64,
    pub max_speed: f64,
    pub accel: f64,
    /// Mines only acquire inside this range and reacquire after a loss.
    pub lock_range: Option<f64>,
}

/// Turn toward `target` by at most `turn_rate * dt` while accelerating up
/// to `max_speed`. A stationary body snaps to the target bearing.
pub fn pursue(
    velocity: DVec2,
    from: DVec2,
    target: DVec2,
    turn_rate: f64,
    max_speed: f64,
    accel: f64,
    dt: f64,
) -> DVec2 {
    let desired = (target - from).normalize_or_zero();
    if desired == DVec2::ZERO {
        return velocity;
    }
    let speed = (velocity.length() + accel * dt).min(max_speed);
    let heading = velocity.normalize_or_zero();
    let heading = if heading == DVec2::ZERO {
        desired
    } else {
        let angle = heading.perp_dot(desired).atan2(heading.dot(desired));
        let max_turn = turn_rate * dt;
        DVec2::from_angle(angle.clamp(-max_turn, max_turn)).rotate(heading)
    };
    heading * speed
}

/// Revalidate targets and steer every homing projectile.
pub fn run(world: &mut World) {
    let hostiles: HashMap<Entity, Position> = world
        .query::<(&Hostile, &Position)>()
        .iter()
        .map(|(entity, (_, pos))| (entity, *pos))
        .collect();

    for (_entity, (pos, vel, homing, _projectile)) in
        world.query_mut::<(&Position, &mut Velocity, &mut Homing, &Projectile)>()
    {
        if homing.target.is_some_and(|t| !hostiles.contains_key(&t)) {
            homing.target = None;
        }
        if homing.target.is_none() {
            if let Some(range) = homing.lock_range {
                homing.target = nearest(&hostiles, pos, range);
            }
        }

        let Some(target_pos) = homing.target.and_then(|t| hostiles.get(&t)) else {
            // No target: keep heading, still accelerating if already moving.
            let v = vel.planar();
            if v != DVec2::ZERO {
                let speed = (v.length() + homing.accel * DT).min(homing.max_speed);
                let v = v.normalize_or_zero() * speed;
                *vel = Velocity::from_planar(v, vel.z);
            }
            continue;
        };

        let v = pursue(
            vel.planar(),
            pos.planar(),
            target_pos.planar(),
            homing.turn_rate,
            homing.max_speed,
            homing.accel,
            DT,
        );
        // Ease toward the target's plane so same-plane collision can happen.
        let dz = (target_pos.z - pos.z) / DT;
        *vel = Velocity::from_planar(v, dz.clamp(-homing.max_speed, homing.max_speed) * 0.1);
    }
}

fn nearest(hostiles: &HashMap<Entity, Position>, from: &Position, range: f64) -> Option<Entity> {
    hostiles
        .iter()
        .filter(|(_, pos)| from.same_plane(pos))
        .map(|(entity, pos)| (*entity, from.distance_to(pos)))
        .filter(|(_, d)| *d <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.to_bits().cmp(&b.0.to_bits())))
        .map(|(entity, _)| entity)
}
