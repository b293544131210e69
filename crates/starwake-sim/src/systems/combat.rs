//! Combat resolution: projectile life, collisions, damage, kills and loot.
//!
//! Per tick, in order: homing guidance, projectile aging and culling,
//! player fire against enemies and asteroids, enemy fire against the ship,
//! ramming, and pickup collection.

use std::collections::HashSet;

use hecs::{Entity, World};

use starwake_core::components::*;
use starwake_core::constants::*;
use starwake_core::enums::*;
use starwake_core::events::CombatEvent;
use starwake_core::types::Position;

use crate::guidance;
use crate::mission::MissionState;
use crate::ship::add_cargo;
use crate::systems::cleanup::out_of_bounds;
use crate::world_setup::spawn_pickup;

/// Result of damaging an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageReport {
    /// Shield was up and immune to the damage category.
    pub immune: bool,
    pub absorbed: f64,
    pub hp_damage: f64,
    pub killed: bool,
}

/// Result of damaging the player ship.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerDamageReport {
    pub immune: bool,
    pub absorbed: f64,
    pub hull_damage: f64,
    /// Shield pools that hit zero from this hit.
    pub shattered: Vec<usize>,
    pub destroyed: bool,
}

/// Weapon-type damage multiplier.
pub fn damage_multiplier(damage_type: DamageType) -> f64 {
    match damage_type.category() {
        DamageCategory::Energy => ENERGY_DAMAGE_MULTIPLIER,
        DamageCategory::Kinetic => KINETIC_DAMAGE_MULTIPLIER,
        DamageCategory::Other => 1.0,
    }
}

/// Damage an enemy: immunity check, multiplier, shield first, then hit points.
pub fn apply_damage(
    health: &mut Health,
    shield: Option<&mut EnemyShield>,
    amount: f64,
    damage_type: DamageType,
) -> DamageReport {
    let mut report = DamageReport::default();
    if amount <= 0.0 || health.hp <= 0.0 {
        return report;
    }
    let mut remaining = amount * damage_multiplier(damage_type);

    if let Some(shield) = shield {
        if shield.current > 0.0 {
            if shield.immunity.blocks(damage_type.category()) {
                report.immune = true;
                return report;
            }
            let absorbed = remaining.min(shield.current);
            shield.current = (shield.current - absorbed).max(0.0);
            remaining -= absorbed;
            report.absorbed = absorbed;
        }
    }

    report.hp_damage = remaining.min(health.hp);
    health.hp = (health.hp - remaining).max(0.0);
    report.killed = health.hp <= 0.0;
    report
}

/// Damage the player ship. Shield pools absorb secondary first, then primary;
/// an immune pool swallows the hit whole, a resistant pool mitigates the part
/// it absorbs. A pool driven to zero shatters and stops regenerating for
/// `SHIELD_SHATTER_COOLDOWN_MS`.
pub fn apply_damage_to_ship(
    ship: &mut Ship,
    amount: f64,
    damage_type: DamageType,
    now_ms: f64,
) -> PlayerDamageReport {
    let mut report = PlayerDamageReport::default();
    if amount <= 0.0 || ship.hull <= 0.0 {
        return report;
    }
    let mut remaining = amount * damage_multiplier(damage_type);
    ship.last_hit_ms = Some(now_ms);

    if ship.shields_enabled {
        for idx in [1, 0] {
            let Some(pool) = ship.shields[idx].as_mut() else {
                continue;
            };
            if pool.current <= 0.0 {
                continue;
            }
            if pool.immunity.blocks(damage_type.category()) {
                report.immune = true;
                report.absorbed += remaining;
                return report;
            }
            let keep = 1.0 - pool.resistance.clamp(0.0, 0.99);
            let absorbed = (remaining * keep).min(pool.current);
            pool.current = (pool.current - absorbed).max(0.0);
            report.absorbed += absorbed;
            remaining = (remaining - absorbed / keep).max(0.0);
            if pool.current <= 0.0 {
                pool.regen_blocked_until_ms = now_ms + SHIELD_SHATTER_COOLDOWN_MS;
                report.shattered.push(idx);
            }
            if remaining <= 0.0 {
                break;
            }
        }
    }

    report.hull_damage = remaining.min(ship.hull);
    ship.hull = (ship.hull - remaining).max(0.0);
    report.destroyed = ship.hull <= 0.0;
    report
}

/// Score for a kill at a difficulty.
pub fn kill_score(base_score: u64, difficulty: u32) -> u64 {
    let step = difficulty.max(DIFFICULTY_MIN) - DIFFICULTY_MIN;
    (base_score as f64 * (1.0 + KILL_SCORE_DIFFICULTY_STEP * step as f64)).round() as u64
}

/// Splash damage at `distance` from a chain-reaction origin.
pub fn chain_damage(distance: f64) -> f64 {
    let falloff = (1.0 - distance / CHAIN_REACTION_RADIUS).max(CHAIN_REACTION_MIN_FRACTION);
    CHAIN_REACTION_DAMAGE * falloff
}

/// Splash every hostile near `origin` that is not yet in `visited`.
/// `visited` belongs to one explosion: it holds the exploding hostile and
/// whatever is already dead, and collects the hostiles this splash reached.
/// Returns the hostiles the splash killed; they must not start a chain.
pub fn chain_reaction(
    world: &mut World,
    origin: &Position,
    visited: &mut HashSet<Entity>,
    now_ms: f64,
) -> Vec<Entity> {
    let mut killed = Vec::new();
    for (entity, (pos, health, shield, state)) in world.query_mut::<(
        &Position,
        &mut Health,
        Option<&mut EnemyShield>,
        &mut EnemyState,
    )>() {
        if visited.contains(&entity) || health.hp <= 0.0 || !origin.same_plane(pos) {
            continue;
        }
        let distance = origin.distance_to(pos);
        if distance > CHAIN_REACTION_RADIUS {
            continue;
        }
        visited.insert(entity);
        state.last_damaged_ms = Some(now_ms);
        let report = apply_damage(health, shield, chain_damage(distance), DamageType::Explosive);
        if report.killed {
            killed.push(entity);
        }
    }
    killed
}

/// Mutable per-tick state the combat pass writes to.
pub struct CombatContext<'a> {
    pub mission: &'a mut MissionState,
    pub events: &'a mut Vec<CombatEvent>,
    pub despawn: &'a mut Vec<Entity>,
    pub difficulty: u32,
    pub now_ms: f64,
}

/// Run the full combat pass.
pub fn run(world: &mut World, ctx: &mut CombatContext) {
    guidance::run(world);
    age_projectiles(world, ctx.despawn);
    player_fire(world, ctx);
    flush(world, ctx.despawn);
    enemy_fire(world, ctx);
    ramming(world, ctx);
    flush(world, ctx.despawn);
    collect_pickups(world, ctx);
    flush(world, ctx.despawn);
}

fn flush(world: &mut World, despawn: &mut Vec<Entity>) {
    for entity in despawn.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Age projectiles and drop expired or out-of-bounds ones before any
/// collision is tested.
fn age_projectiles(world: &mut World, despawn: &mut Vec<Entity>) {
    for (entity, (pos, projectile)) in world.query_mut::<(&Position, &mut Projectile)>() {
        projectile.life_ticks -= 1;
        if projectile.life_ticks <= 0 || out_of_bounds(pos) {
            despawn.push(entity);
        }
    }
    flush(world, despawn);
}

struct Target {
    entity: Entity,
    position: Position,
    radius: f64,
    is_enemy: bool,
}

fn player_fire(world: &mut World, ctx: &mut CombatContext) {
    let shots: Vec<(Entity, Position, Projectile)> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (_, p))| p.owner == ProjectileOwner::Player)
        .map(|(e, (pos, p))| (e, *pos, *p))
        .collect();
    if shots.is_empty() {
        return;
    }

    let mut targets: Vec<Target> = world
        .query::<(&Position, &EnemyState)>()
        .iter()
        .map(|(entity, (pos, state))| Target {
            entity,
            position: *pos,
            radius: state.radius,
            is_enemy: true,
        })
        .collect();
    targets.extend(
        world
            .query::<(&Position, &Asteroid)>()
            .iter()
            .map(|(entity, (pos, asteroid))| Target {
                entity,
                position: *pos,
                radius: asteroid.radius,
                is_enemy: false,
            }),
    );

    let mut dead: HashSet<Entity> = HashSet::new();

    for (shot_entity, shot_pos, shot) in shots {
        let Some(target) = targets.iter().find(|t| {
            !dead.contains(&t.entity) && shot_pos.overlaps(shot.radius, &t.position, t.radius)
        }) else {
            continue;
        };
        ctx.despawn.push(shot_entity);

        if target.is_enemy {
            let report = hit_enemy(world, target.entity, &shot, ctx.now_ms);
            if report.killed {
                dead.insert(target.entity);
                resolve_kill(world, ctx, target.entity, false);
                let origin = target.position;
                let mut visited = dead.clone();
                for victim in chain_reaction(world, &origin, &mut visited, ctx.now_ms) {
                    dead.insert(victim);
                    resolve_kill(world, ctx, victim, true);
                }
            }
        } else if hit_asteroid(world, ctx, target.entity, &target.position, &shot) {
            dead.insert(target.entity);
        }
    }
}

fn hit_enemy(world: &mut World, entity: Entity, shot: &Projectile, now_ms: f64) -> DamageReport {
    let Ok((health, shield, state)) =
        world.query_one_mut::<(&mut Health, Option<&mut EnemyShield>, &mut EnemyState)>(entity)
    else {
        return DamageReport::default();
    };
    state.last_damaged_ms = Some(now_ms);
    apply_damage(health, shield, shot.damage, shot.damage_type)
}

/// Score a dead hostile, flag boss victory and queue its removal.
fn resolve_kill(world: &mut World, ctx: &mut CombatContext, entity: Entity, chain: bool) {
    let Ok(state) = world.get::<&EnemyState>(entity) else {
        return;
    };
    let score = kill_score(state.base_score, ctx.difficulty);
    ctx.mission.score += score;
    ctx.events.push(CombatEvent::EnemyDestroyed {
        kind: state.kind,
        score,
        chain,
    });
    log::debug!("{} destroyed (+{score}{})", state.def_id, if chain { ", chain" } else { "" });

    if state.kind == EnemyKind::Boss && ctx.mission.record_boss_defeat() {
        log::info!("boss {} defeated", state.def_id);
        ctx.events.push(CombatEvent::BossDefeated {
            def_id: state.def_id.clone(),
        });
    }
    ctx.despawn.push(entity);
}

/// Returns true if the asteroid broke apart.
fn hit_asteroid(
    world: &mut World,
    ctx: &mut CombatContext,
    entity: Entity,
    position: &Position,
    shot: &Projectile,
) -> bool {
    let Ok(mut asteroid) = world.get::<&mut Asteroid>(entity) else {
        return false;
    };
    asteroid.hp = (asteroid.hp - shot.damage * damage_multiplier(shot.damage_type)).max(0.0);
    if asteroid.hp > 0.0 {
        return false;
    }
    let size = asteroid.size;
    let loot = asteroid.loot.take();
    drop(asteroid);

    ctx.mission.score += ASTEROID_SCORE;
    ctx.events.push(CombatEvent::AsteroidDestroyed { size });
    ctx.despawn.push(entity);
    if let Some(loot) = loot {
        spawn_pickup(world, *position, loot);
    }
    true
}

fn enemy_fire(world: &mut World, ctx: &mut CombatContext) {
    let shots: Vec<(Entity, Position, Projectile)> = world
        .query::<(&Position, &Projectile)>()
        .iter()
        .filter(|(_, (_, p))| p.owner == ProjectileOwner::Enemy)
        .map(|(e, (pos, p))| (e, *pos, *p))
        .collect();

    for (_entity, (_player, pos, ship)) in
        world.query_mut::<(&PlayerShip, &Position, &mut Ship)>()
    {
        for (shot_entity, shot_pos, shot) in &shots {
            if ship.hull <= 0.0 {
                break;
            }
            if !pos.overlaps(ship.radius, shot_pos, shot.radius) {
                continue;
            }
            ctx.despawn.push(*shot_entity);
            let report = apply_damage_to_ship(ship, shot.damage, shot.damage_type, ctx.now_ms);
            record_player_hit(ctx, &report);
        }
    }
}

fn record_player_hit(ctx: &mut CombatContext, report: &PlayerDamageReport) {
    for &pool in &report.shattered {
        ctx.events.push(CombatEvent::ShieldShattered { pool });
    }
    ctx.events.push(CombatEvent::PlayerHit {
        hull_damage: report.hull_damage,
        absorbed: report.absorbed,
    });
    if report.destroyed && !ctx.mission.player_destroyed {
        ctx.mission.player_destroyed = true;
        ctx.events.push(CombatEvent::PlayerDestroyed);
        log::info!("player ship destroyed");
    }
}

/// Asteroids and non-boss enemies touching the ship hit it and break up.
fn ramming(world: &mut World, ctx: &mut CombatContext) {
    let mut rammers: Vec<(Entity, Position, f64, f64)> = world
        .query::<(&Position, &Asteroid)>()
        .iter()
        .map(|(e, (pos, a))| (e, *pos, a.radius, ASTEROID_RAM_DAMAGE * a.size.scale()))
        .collect();
    rammers.extend(
        world
            .query::<(&Position, &EnemyState)>()
            .without::<&Boss>()
            .iter()
            .map(|(e, (pos, s))| (e, *pos, s.radius, ENEMY_RAM_DAMAGE)),
    );

    for (_entity, (_player, pos, ship)) in
        world.query_mut::<(&PlayerShip, &Position, &mut Ship)>()
    {
        for (rammer, rammer_pos, radius, damage) in &rammers {
            if ship.hull <= 0.0 {
                break;
            }
            if !pos.overlaps(ship.radius, rammer_pos, *radius) {
                continue;
            }
            ctx.despawn.push(*rammer);
            let report = apply_damage_to_ship(ship, *damage, DamageType::Kinetic, ctx.now_ms);
            record_player_hit(ctx, &report);
        }
    }
}

fn collect_pickups(world: &mut World, ctx: &mut CombatContext) {
    let pickups: Vec<(Entity, Position, Pickup)> = world
        .query::<(&Position, &Pickup)>()
        .iter()
        .map(|(e, (pos, p))| (e, *pos, *p))
        .collect();

    for (_entity, (_player, pos, ship)) in
        world.query_mut::<(&PlayerShip, &Position, &mut Ship)>()
    {
        if ship.hull <= 0.0 {
            return;
        }
        for (pickup_entity, pickup_pos, pickup) in &pickups {
            if !pos.overlaps(ship.radius, pickup_pos, pickup.radius) {
                continue;
            }
            let Loot { kind, quantity } = pickup.loot;
            let collected = if kind == CargoKind::Ordnance {
                ship.ordnance.missiles += quantity * ORDNANCE_MISSILES_PER_UNIT;
                quantity
            } else {
                add_cargo(ship, kind, quantity)
            };
            if collected == 0 {
                // Hold full; leave it floating.
                continue;
            }
            ctx.despawn.push(*pickup_entity);
            ctx.events.push(CombatEvent::PickupCollected {
                kind,
                quantity: collected,
            });
        }
    }
}
