//! Kinematic integration system.
//!
//! Updates Position from Velocity each tick: position += velocity * dt.
//! The player is held inside the playfield; depth is bounded for everyone.

use hecs::World;

use starwake_core::components::{PlayerShip, Ship};
use starwake_core::constants::{DEPTH_LIMIT, DT, FIELD_HEIGHT, FIELD_WIDTH};
use starwake_core::types::{Position, Velocity};

/// Run kinematic integration for all entities with Position + Velocity.
pub fn run(world: &mut World) {
    for (_entity, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.x += vel.x * DT;
        pos.y += vel.y * DT;
        pos.z = (pos.z + vel.z * DT).clamp(-DEPTH_LIMIT, DEPTH_LIMIT);
    }

    for (_entity, (_player, pos, ship)) in world.query_mut::<(&PlayerShip, &mut Position, &Ship)>() {
        pos.x = clamp_to_field(pos.x, ship.radius, FIELD_WIDTH);
        pos.y = clamp_to_field(pos.y, ship.radius, FIELD_HEIGHT);
    }
}

/// Keep a body of `radius` inside `[0, extent]`. A body too large to fit is
/// pinned to the center of the axis.
fn clamp_to_field(value: f64, radius: f64, extent: f64) -> f64 {
    let lo = radius.max(0.0);
    let hi = extent - lo;
    if lo > hi || value.is_nan() {
        return extent / 2.0;
    }
    value.clamp(lo, hi)
}
