//! Cleanup system: removes entities that left the playfield or expired.

use hecs::{Entity, World};

use starwake_core::components::{Asteroid, Boss, EnemyState, Pickup, Projectile};
use starwake_core::constants::{FIELD_HEIGHT, FIELD_MARGIN, FIELD_WIDTH};
use starwake_core::types::Position;

/// Whether a position is outside the playfield plus margin.
pub fn out_of_bounds(pos: &Position) -> bool {
    pos.x < -FIELD_MARGIN
        || pos.x > FIELD_WIDTH + FIELD_MARGIN
        || pos.y < -FIELD_MARGIN
        || pos.y > FIELD_HEIGHT + FIELD_MARGIN
}

/// Remove out-of-bounds enemies, asteroids, projectiles and expired pickups.
/// The boss is never culled. Uses a pre-allocated buffer to avoid per-tick
/// allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, pos) in world
        .query_mut::<&Position>()
        .with::<&EnemyState>()
        .without::<&Boss>()
    {
        if out_of_bounds(pos) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, pos) in world.query_mut::<&Position>().with::<&Asteroid>() {
        if out_of_bounds(pos) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (pos, projectile)) in world.query_mut::<(&Position, &Projectile)>() {
        if projectile.life_ticks <= 0 || out_of_bounds(pos) {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (pos, pickup)) in world.query_mut::<(&Position, &mut Pickup)>() {
        pickup.life_ticks -= 1;
        if pickup.life_ticks <= 0 || out_of_bounds(pos) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
