//! Enemy AI system: bridges the ECS world to the pure behavior functions in
//! `starwake-ai`, then handles enemy fire, mine laying and shield regen.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starwake_ai::boss::{steer_boss, BossContext};
use starwake_ai::fire::{boss_fire_ready, enemy_fire_ready, pattern_directions};
use starwake_ai::mines::{mine_drop_due, update_dwell};
use starwake_ai::profiles::get_profile;
use starwake_ai::steering::{steer, EnemyContext, Obstacle};
use starwake_core::components::*;
use starwake_core::constants::*;
use starwake_core::defs::Catalog;
use starwake_core::enums::*;
use starwake_core::types::{Position, Velocity};

use crate::registry;
use crate::world_setup::{spawn_projectile, ProjectileSpec};

/// Run steering, fire and upkeep for every hostile.
pub fn run(
    world: &mut World,
    catalog: &Catalog,
    rng: &mut ChaCha8Rng,
    difficulty: u32,
    now_ms: f64,
) {
    let Some(player) = registry::player_position(world) else {
        return;
    };
    let player_alive = world
        .query::<(&PlayerShip, &Ship)>()
        .iter()
        .any(|(_, (_, ship))| ship.hull > 0.0);

    let hostiles: Vec<(Entity, Position)> = world
        .query::<(&Hostile, &Position)>()
        .iter()
        .map(|(e, (_, pos))| (e, *pos))
        .collect();
    let obstacles: Vec<Obstacle> = world
        .query::<(&Position, &Velocity, &Asteroid)>()
        .iter()
        .map(|(_, (pos, vel, asteroid))| Obstacle {
            position: pos.planar(),
            depth: pos.z,
            velocity: vel.planar(),
            radius: asteroid.radius,
        })
        .collect();

    let mut spawns: Vec<ProjectileSpec> = Vec::new();
    let elapsed_secs = now_ms / 1000.0;

    for (entity, (pos, vel, state, boss)) in
        world.query_mut::<(&Position, &mut Velocity, &mut EnemyState, Option<&Boss>)>()
    {
        let update = if boss.is_some() {
            steer_boss(
                &BossContext {
                    state: state.ai_state,
                    state_ticks: state.state_ticks,
                    position: pos.planar(),
                    velocity: vel.planar(),
                    player: player.planar(),
                    elapsed_secs,
                },
                rng,
            )
        } else {
            let peers: Vec<DVec2> = hostiles
                .iter()
                .filter(|(other, other_pos)| *other != entity && pos.same_plane(other_pos))
                .map(|(_, other_pos)| other_pos.planar())
                .collect();
            steer(
                &EnemyContext {
                    kind: state.kind,
                    state: state.ai_state,
                    state_ticks: state.state_ticks,
                    position: pos.planar(),
                    depth: pos.z,
                    velocity: vel.planar(),
                    player: player.planar(),
                    player_depth: player.z,
                    speed: state.speed,
                    difficulty,
                    peers: &peers,
                    obstacles: &obstacles,
                },
                rng,
            )
        };
        *vel = Velocity::from_planar(update.velocity, update.depth_velocity);
        state.ai_state = update.state;
        state.state_ticks = update.state_ticks;

        if !player_alive {
            continue;
        }

        if let Some(shots) = enemy_attack(catalog, state, pos, &player, boss.is_some(), now_ms) {
            state.last_fired_ms = Some(now_ms);
            spawns.extend(shots);
        }

        if state.lays_mines {
            state.near_player_ms = update_dwell(state.near_player_ms, pos.distance_to(&player), DT_MS);
            if mine_drop_due(state.near_player_ms, rng.gen::<f64>()) {
                state.near_player_ms = 0.0;
                spawns.push(enemy_mine(pos));
            }
        }
    }

    regenerate_shields(world, difficulty, now_ms);

    for spec in spawns {
        spawn_projectile(world, spec);
    }
}

/// Projectiles for this enemy's attack, if it fires this tick.
fn enemy_attack(
    catalog: &Catalog,
    state: &EnemyState,
    pos: &Position,
    player: &Position,
    is_boss: bool,
    now_ms: f64,
) -> Option<Vec<ProjectileSpec>> {
    let weapon = state.weapon_id.as_deref().and_then(|id| catalog.weapon(id))?;
    let aim = player.planar() - pos.planar();

    let directions = if is_boss {
        if !boss_fire_ready(weapon.fire_rate, now_ms, state.last_fired_ms) {
            return None;
        }
        pattern_directions(aim, weapon.pattern_count, weapon.pattern_spread)
    } else {
        let interval = get_profile(state.kind).fire_interval_ms?;
        let ready = enemy_fire_ready(
            interval,
            now_ms,
            state.last_fired_ms,
            pos.planar(),
            player.planar(),
            pos.same_plane(player),
        );
        if !ready {
            return None;
        }
        pattern_directions(aim, 1, 0.0)
    };
    if directions.is_empty() {
        return None;
    }

    let muzzle = Position::new(pos.x, pos.y + state.radius, pos.z);
    Some(
        directions
            .into_iter()
            .map(|dir| ProjectileSpec {
                position: muzzle,
                velocity: Velocity::from_planar(dir * weapon.projectile_speed, 0.0),
                projectile: Projectile {
                    owner: ProjectileOwner::Enemy,
                    kind: ProjectileKind::Bolt,
                    damage: weapon.damage,
                    damage_type: weapon.damage_type,
                    life_ticks: weapon.projectile_life_ticks,
                    radius: weapon.radius,
                    length: weapon.length,
                    width: weapon.width,
                },
                homing: None,
            })
            .collect(),
    )
}

fn enemy_mine(pos: &Position) -> ProjectileSpec {
    ProjectileSpec {
        position: *pos,
        velocity: Velocity::new(0.0, PICKUP_DRIFT_SPEED, 0.0),
        projectile: Projectile {
            owner: ProjectileOwner::Enemy,
            kind: ProjectileKind::Mine,
            damage: ENEMY_MINE_DAMAGE,
            damage_type: DamageType::Explosive,
            life_ticks: ENEMY_MINE_LIFE_TICKS,
            radius: MINE_RADIUS,
            length: MINE_RADIUS * 2.0,
            width: MINE_RADIUS * 2.0,
        },
        homing: None,
    }
}

/// Slow shield regeneration after a no-damage grace period, at higher
/// difficulty only.
pub fn regenerate_shields(world: &mut World, difficulty: u32, now_ms: f64) {
    if difficulty < ENEMY_SHIELD_REGEN_MIN_DIFFICULTY {
        return;
    }
    for (_entity, (state, shield)) in world.query_mut::<(&EnemyState, &mut EnemyShield)>() {
        let quiet = state
            .last_damaged_ms
            .map_or(true, |t| now_ms - t >= ENEMY_SHIELD_REGEN_GRACE_MS);
        if quiet && shield.current < shield.capacity {
            shield.current = (shield.current + shield.regen_per_sec * DT).min(shield.capacity);
        }
    }
}
