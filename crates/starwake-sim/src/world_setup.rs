//! Entity spawn factories for the simulation world.
//!
//! Creates the player ship, enemies, the boss, asteroids, projectiles and
//! pickups with their component bundles.

use hecs::{Entity, EntityBuilder, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starwake_core::components::*;
use starwake_core::constants::*;
use starwake_core::defs::{Catalog, EnemyDef, Loadout};
use starwake_core::enums::*;
use starwake_core::types::{Position, Velocity};

use crate::guidance::Homing;
use crate::ship::build_ship;

/// Everything needed to put one projectile into the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub position: Position,
    pub velocity: Velocity,
    pub projectile: Projectile,
    pub homing: Option<Homing>,
}

const LOOT_TABLE: [CargoKind; 7] = [
    CargoKind::Fuel,
    CargoKind::EnergyCell,
    CargoKind::RepairKit,
    CargoKind::Ammo,
    CargoKind::Ordnance,
    CargoKind::Coolant,
    CargoKind::Commodity,
];

/// Spawn the player's ship at its start position.
pub fn spawn_player_ship(world: &mut World, catalog: &Catalog, loadout: &Loadout) -> Entity {
    let ship = build_ship(catalog, loadout);
    world.spawn((
        PlayerShip,
        Position::new(PLAYER_START_X, PLAYER_START_Y, 0.0),
        Velocity::default(),
        ship,
    ))
}

/// Spawn a regular enemy just above the playfield.
pub fn spawn_enemy(world: &mut World, rng: &mut ChaCha8Rng, def: &EnemyDef) -> Entity {
    let x = rng.gen_range(FIELD_MARGIN..FIELD_WIDTH - FIELD_MARGIN);
    let z = rng.gen_range(-DEPTH_BAND / 2.0..DEPTH_BAND / 2.0);
    let position = Position::new(x, -FIELD_MARGIN / 2.0, z);
    let entity = spawn_enemy_at(world, def, position, 1.0);
    log::debug!("spawned {} at ({x:.0}, {z:.0})", def.id);
    entity
}

/// Spawn an enemy from a definition at an exact position, scaling hit points
/// and shield by `scale`.
pub fn spawn_enemy_at(world: &mut World, def: &EnemyDef, position: Position, scale: f64) -> Entity {
    let ai_state = if def.kind == EnemyKind::Boss {
        AiState::Hover
    } else {
        AiState::Advance
    };
    let mut builder = EntityBuilder::new();
    builder
        .add(Hostile)
        .add(position)
        .add(Velocity::new(0.0, def.speed * 0.5, 0.0))
        .add(EnemyState {
            kind: def.kind,
            def_id: def.id.clone(),
            ai_state,
            state_ticks: 0,
            speed: def.speed,
            radius: def.radius,
            base_score: def.base_score,
            weapon_id: def.weapon_id.clone(),
            lays_mines: def.lays_mines,
            last_fired_ms: None,
            last_damaged_ms: None,
            near_player_ms: 0.0,
        })
        .add(Health {
            hp: def.hp * scale,
            max_hp: def.hp * scale,
        });
    if let Some(shield) = def.shield {
        builder.add(EnemyShield {
            current: shield.capacity * scale,
            capacity: shield.capacity * scale,
            immunity: shield.immunity,
            regen_per_sec: shield.regen_per_sec,
        });
    }
    if def.kind == EnemyKind::Boss {
        builder.add(Boss);
    }
    world.spawn(builder.build())
}

/// Spawn the phase boss, hit points and shield scaled by difficulty.
pub fn spawn_boss(world: &mut World, def: &EnemyDef, difficulty: u32) -> Entity {
    let step = difficulty.max(DIFFICULTY_MIN) - DIFFICULTY_MIN;
    let scale = 1.0 + BOSS_DIFFICULTY_STEP * step as f64;
    let position = Position::new(FIELD_WIDTH / 2.0, -FIELD_MARGIN / 2.0, 0.0);
    let entity = spawn_enemy_at(world, def, position, scale);
    log::info!("boss {} spawned (scale {scale:.2})", def.id);
    entity
}

/// Spawn an asteroid drifting down from above the playfield.
pub fn spawn_asteroid(world: &mut World, rng: &mut ChaCha8Rng, scavenge: bool) -> Entity {
    let size = match rng.gen_range(0..3) {
        0 => AsteroidSize::Small,
        1 => AsteroidSize::Medium,
        _ => AsteroidSize::Large,
    };
    let variant = match rng.gen_range(0..4) {
        0 => AsteroidVariant::Rock,
        1 => AsteroidVariant::Ice,
        2 => AsteroidVariant::Metal,
        _ => AsteroidVariant::Crystal,
    };
    let loot_chance = if scavenge {
        SCAVENGE_LOOT_CHANCE
    } else {
        ASTEROID_LOOT_CHANCE
    };
    let loot = rng.gen_bool(loot_chance).then(|| Loot {
        kind: LOOT_TABLE[rng.gen_range(0..LOOT_TABLE.len())],
        quantity: 1,
    });
    let radius = ASTEROID_RADIUS_STEP * size.scale();
    let hp = ASTEROID_HP_STEP * size.scale();

    let x = rng.gen_range(0.0..FIELD_WIDTH);
    let z = rng.gen_range(-DEPTH_BAND * 1.5..DEPTH_BAND * 1.5);
    let vx = rng.gen_range(-30.0..30.0);
    let vy = rng.gen_range(ASTEROID_SPEED_MIN..ASTEROID_SPEED_MAX);

    spawn_asteroid_at(
        world,
        Position::new(x, -FIELD_MARGIN / 2.0, z),
        Velocity::new(vx, vy, 0.0),
        Asteroid {
            hp,
            max_hp: hp,
            size,
            variant,
            radius,
            loot,
        },
    )
}

pub fn spawn_asteroid_at(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    asteroid: Asteroid,
) -> Entity {
    world.spawn((position, velocity, asteroid))
}

pub fn spawn_projectile(world: &mut World, spec: ProjectileSpec) -> Entity {
    let mut builder = EntityBuilder::new();
    builder
        .add(spec.position)
        .add(spec.velocity)
        .add(spec.projectile);
    if let Some(homing) = spec.homing {
        builder.add(homing);
    }
    world.spawn(builder.build())
}

/// Drop a loot pickup that drifts slowly down the field.
pub fn spawn_pickup(world: &mut World, position: Position, loot: Loot) -> Entity {
    world.spawn((
        position,
        Velocity::new(0.0, PICKUP_DRIFT_SPEED, 0.0),
        Pickup {
            loot,
            life_ticks: PICKUP_LIFE_TICKS,
            radius: PICKUP_RADIUS,
        },
    ))
}
