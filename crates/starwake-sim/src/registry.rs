//! Entity registry queries over the hecs world.
//!
//! The world owns every entity; other code holds only generational
//! `Entity` handles.

use hecs::{Entity, World};

use starwake_core::components::*;
use starwake_core::enums::ProjectileOwner;
use starwake_core::types::Position;

/// Entity counts by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Population {
    pub enemies: usize,
    pub bosses: usize,
    pub asteroids: usize,
    pub player_projectiles: usize,
    pub enemy_projectiles: usize,
    pub pickups: usize,
}

pub fn player(world: &World) -> Option<Entity> {
    world
        .query::<&PlayerShip>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}

pub fn player_position(world: &World) -> Option<Position> {
    world
        .query::<(&PlayerShip, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
}

pub fn boss(world: &World) -> Option<Entity> {
    world.query::<&Boss>().iter().next().map(|(entity, _)| entity)
}

/// Non-boss enemies alive.
pub fn enemy_count(world: &World) -> usize {
    world
        .query::<&EnemyState>()
        .without::<&Boss>()
        .iter()
        .count()
}

/// Nearest hostile to `from`, optionally limited by range and plane.
pub fn nearest_enemy(
    world: &World,
    from: &Position,
    max_range: Option<f64>,
    same_plane: bool,
) -> Option<Entity> {
    world
        .query::<(&Hostile, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| !same_plane || from.same_plane(pos))
        .map(|(entity, (_, pos))| (entity, from.distance_to(pos)))
        .filter(|(_, d)| max_range.map_or(true, |r| *d <= r))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}

pub fn population(world: &World) -> Population {
    let mut pop = Population {
        enemies: enemy_count(world),
        bosses: world.query::<&Boss>().iter().count(),
        asteroids: world.query::<&Asteroid>().iter().count(),
        pickups: world.query::<&Pickup>().iter().count(),
        ..Default::default()
    };
    for (_, projectile) in world.query::<&Projectile>().iter() {
        match projectile.owner {
            ProjectileOwner::Player => pop.player_projectiles += 1,
            ProjectileOwner::Enemy => pop.enemy_projectiles += 1,
        }
    }
    pop
}
