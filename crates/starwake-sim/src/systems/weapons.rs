//! Weapon system: fire-rate gating, ammo and power accounting, projectile
//! creation, and ordnance launch.
//!
//! `fire` plans the whole shot before touching the ship, so a rejected
//! request leaves every resource exactly as it was.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starwake_core::commands::InputSnapshot;
use starwake_core::components::*;
use starwake_core::constants::*;
use starwake_core::defs::{Catalog, PowerSource, WeaponDef};
use starwake_core::enums::*;
use starwake_core::events::CombatEvent;
use starwake_core::types::{Position, Velocity};

use crate::alerts::AlertChannel;
use crate::guidance::Homing;
use crate::registry;
use crate::world_setup::{spawn_projectile, ProjectileSpec};

/// Why a fire request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    NoWeapon,
    CoolingDown,
    MagazineEmpty,
    Reloading,
    InsufficientPower,
    CapacitorLocked,
    EnergyDepleted,
    ShipDestroyed,
}

impl FireRejection {
    /// HUD alert for rejections the pilot needs to hear about.
    pub fn alert(self) -> Option<(AlertSeverity, &'static str)> {
        match self {
            FireRejection::MagazineEmpty => Some((AlertSeverity::Warning, "AMMUNITION DEPLETED")),
            FireRejection::CapacitorLocked => Some((AlertSeverity::Warning, "CAPACITOR LOCKED")),
            FireRejection::InsufficientPower => Some((AlertSeverity::Warning, "INSUFFICIENT POWER")),
            FireRejection::EnergyDepleted => Some((AlertSeverity::Error, "ENERGY DEPLETED")),
            _ => None,
        }
    }
}

/// One fire request against a weapon slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireRequest {
    pub slot: usize,
    pub mode: FireMode,
    /// Overcharge level (0..=100); ignored in other modes.
    pub charge: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PowerDraw {
    Rounds(u32),
    Capacitor(f64),
    /// Main-energy fallback; shots get a random spread.
    Energy(f64),
    /// Rounds plus a capacitor charge (overcharged ammo weapon).
    RoundsAndCapacitor(u32, f64),
}

/// Capacitor drain for an overcharge at `charge` (0..=100).
pub fn overcharge_cost(charge: f64) -> f64 {
    let c = charge.clamp(0.0, 100.0) / 100.0;
    OVERCHARGE_BASE_COST + OVERCHARGE_VARIABLE_COST * c * c
}

/// Damage multiplier for an overcharge at `charge` (0..=100).
pub fn overcharge_multiplier(charge: f64) -> f64 {
    1.0 + OVERCHARGE_DAMAGE_FACTOR * charge.clamp(0.0, 100.0) / 100.0
}

/// Mega-shot charge from how long the trigger was held.
pub fn mega_shot_charge(held_ms: f64, capacitor: f64) -> f64 {
    let by_time = (held_ms.max(0.0) / MEGA_SHOT_FULL_CHARGE_MS * 100.0).min(100.0);
    by_time.min(capacitor).max(0.0)
}

/// Effective shots per second for a weapon in a mode.
pub fn effective_fire_rate(def: &WeaponDef, mode: FireMode) -> f64 {
    match mode {
        FireMode::Burst => def.fire_rate * BURST_RATE_FACTOR,
        FireMode::Normal | FireMode::Overcharge => def.fire_rate,
    }
}

/// Try to fire one slot. On success the ship has paid for the shot and the
/// returned projectiles are ready to spawn; on rejection nothing changed.
pub fn fire(
    ship: &mut Ship,
    origin: &Position,
    catalog: &Catalog,
    rng: &mut impl Rng,
    request: FireRequest,
    now_ms: f64,
) -> Result<Vec<ProjectileSpec>, FireRejection> {
    if ship.hull <= 0.0 {
        return Err(FireRejection::ShipDestroyed);
    }
    if ship.energy_depleted {
        return Err(FireRejection::EnergyDepleted);
    }
    let slot = ship
        .weapons
        .get(request.slot)
        .and_then(Option::as_ref)
        .ok_or(FireRejection::NoWeapon)?;
    let def = catalog.weapon(&slot.weapon_id).ok_or(FireRejection::NoWeapon)?;

    let rate = effective_fire_rate(def, request.mode);
    if rate <= 0.0 {
        return Err(FireRejection::NoWeapon);
    }
    if let Some(last) = slot.last_fire_ms {
        if now_ms - last < 1000.0 / rate {
            return Err(FireRejection::CoolingDown);
        }
    }

    let wanted = match request.mode {
        FireMode::Burst => BURST_COUNT,
        FireMode::Normal | FireMode::Overcharge => 1,
    };
    let overcharge = request.mode == FireMode::Overcharge;
    let charge = if overcharge {
        request.charge.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let overcharge_draw = if overcharge {
        if ship.capacitor_locked {
            return Err(FireRejection::CapacitorLocked);
        }
        let cost = overcharge_cost(charge);
        if ship.capacitor < cost {
            return Err(FireRejection::InsufficientPower);
        }
        Some(cost)
    } else {
        None
    };

    let (draw, shots) = match (def.power, &slot.magazine) {
        (PowerSource::Ammo { .. }, Some(mag)) => {
            if mag.reload_deadline_ms.is_some() {
                return Err(FireRejection::Reloading);
            }
            if mag.rounds == 0 {
                return Err(FireRejection::MagazineEmpty);
            }
            let shots = wanted.min(mag.rounds);
            match overcharge_draw {
                Some(cost) => (PowerDraw::RoundsAndCapacitor(shots, cost), shots),
                None => (PowerDraw::Rounds(shots), shots),
            }
        }
        (PowerSource::Ammo { .. }, None) => return Err(FireRejection::MagazineEmpty),
        (PowerSource::Energy { cost }, _) => match overcharge_draw {
            Some(oc) => (PowerDraw::Capacitor(cost + oc), 1),
            None => {
                let total = cost * wanted as f64;
                if !ship.capacitor_locked && ship.capacitor >= total {
                    (PowerDraw::Capacitor(total), wanted)
                } else if ship.energy >= total {
                    (PowerDraw::Energy(total), wanted)
                } else {
                    return Err(FireRejection::InsufficientPower);
                }
            }
        },
    };
    if let PowerDraw::Capacitor(total) = draw {
        if ship.capacitor < total {
            return Err(FireRejection::InsufficientPower);
        }
    }

    // Commit.
    match draw {
        PowerDraw::Rounds(n) => consume_rounds(ship, request.slot, n),
        PowerDraw::RoundsAndCapacitor(n, cost) => {
            consume_rounds(ship, request.slot, n);
            drain_capacitor(ship, cost);
        }
        PowerDraw::Capacitor(total) => drain_capacitor(ship, total),
        PowerDraw::Energy(total) => ship.energy = (ship.energy - total).max(0.0),
    }
    if let Some(slot) = ship.weapons[request.slot].as_mut() {
        slot.last_fire_ms = Some(now_ms);
        slot.heat = (slot.heat + def.heat_per_shot * shots as f64).min(HEAT_MAX);
    }

    let imprecise = matches!(draw, PowerDraw::Energy(_));
    let multiplier = if overcharge {
        overcharge_multiplier(charge)
    } else {
        1.0
    };
    let size = charge / 100.0;
    let muzzle = Position::new(origin.x, origin.y - ship.radius, origin.z);

    let specs = (0..shots)
        .map(|i| {
            let mut angle = (i as f64 - (shots as f64 - 1.0) / 2.0) * BURST_FAN_RAD;
            if imprecise {
                angle += rng.gen_range(-IMPRECISE_SPREAD_RAD..=IMPRECISE_SPREAD_RAD);
            }
            let dir = DVec2::from_angle(angle).rotate(DVec2::new(0.0, -1.0));
            ProjectileSpec {
                position: muzzle,
                velocity: Velocity::from_planar(dir * def.projectile_speed, 0.0),
                projectile: Projectile {
                    owner: ProjectileOwner::Player,
                    kind: ProjectileKind::Bolt,
                    damage: def.damage * multiplier,
                    damage_type: def.damage_type,
                    life_ticks: def.projectile_life_ticks,
                    radius: def.radius * (1.0 + OVERCHARGE_WIDTH_FACTOR * size),
                    length: def.length * (1.0 + OVERCHARGE_LENGTH_FACTOR * size),
                    width: def.width * (1.0 + OVERCHARGE_WIDTH_FACTOR * size),
                },
                homing: None,
            }
        })
        .collect();
    Ok(specs)
}

fn consume_rounds(ship: &mut Ship, slot: usize, n: u32) {
    if let Some(mag) = ship.weapons[slot].as_mut().and_then(|s| s.magazine.as_mut()) {
        mag.rounds = mag.rounds.saturating_sub(n);
    }
}

fn drain_capacitor(ship: &mut Ship, amount: f64) {
    ship.capacitor = (ship.capacitor - amount).max(0.0);
    if ship.capacitor <= 0.0 {
        ship.capacitor_locked = true;
    }
}

/// Why an ordnance launch was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdnanceRejection {
    Empty,
    CoolingDown,
    ShipDestroyed,
}

/// Take one missile or mine from the rack.
pub fn take_ordnance(
    ship: &mut Ship,
    kind: ProjectileKind,
    now_ms: f64,
) -> Result<(), OrdnanceRejection> {
    if ship.hull <= 0.0 {
        return Err(OrdnanceRejection::ShipDestroyed);
    }
    if let Some(last) = ship.ordnance.last_launch_ms {
        if now_ms - last < ORDNANCE_COOLDOWN_MS {
            return Err(OrdnanceRejection::CoolingDown);
        }
    }
    let count = match kind {
        ProjectileKind::Missile => &mut ship.ordnance.missiles,
        ProjectileKind::Mine => &mut ship.ordnance.mines,
        ProjectileKind::Bolt => return Err(OrdnanceRejection::Empty),
    };
    if *count == 0 {
        return Err(OrdnanceRejection::Empty);
    }
    *count -= 1;
    ship.ordnance.last_launch_ms = Some(now_ms);
    Ok(())
}

/// Homing missile launched from `origin` at `target`.
pub fn missile_spec(origin: &Position, target: Option<hecs::Entity>) -> ProjectileSpec {
    ProjectileSpec {
        position: *origin,
        velocity: Velocity::new(0.0, -MISSILE_LAUNCH_SPEED, 0.0),
        projectile: Projectile {
            owner: ProjectileOwner::Player,
            kind: ProjectileKind::Missile,
            damage: MISSILE_DAMAGE,
            damage_type: DamageType::Explosive,
            life_ticks: MISSILE_LIFE_TICKS,
            radius: MISSILE_RADIUS,
            length: MISSILE_RADIUS * 3.0,
            width: MISSILE_RADIUS,
        },
        homing: Some(Homing {
            target,
            turn_rate: MISSILE_TURN_RATE,
            max_speed: MISSILE_MAX_SPEED,
            accel: MISSILE_ACCEL,
            lock_range: None,
        }),
    }
}

/// Proximity mine dropped at `origin`.
pub fn mine_spec(origin: &Position, target: Option<hecs::Entity>) -> ProjectileSpec {
    ProjectileSpec {
        position: *origin,
        velocity: Velocity::default(),
        projectile: Projectile {
            owner: ProjectileOwner::Player,
            kind: ProjectileKind::Mine,
            damage: MINE_DAMAGE,
            damage_type: DamageType::Explosive,
            life_ticks: MINE_LIFE_TICKS,
            radius: MINE_RADIUS,
            length: MINE_RADIUS * 2.0,
            width: MINE_RADIUS * 2.0,
        },
        homing: Some(Homing {
            target,
            turn_rate: MINE_TURN_RATE,
            max_speed: MINE_MAX_SPEED,
            accel: MINE_ACCEL,
            lock_range: Some(MINE_LOCK_RANGE),
        }),
    }
}

/// Process this tick's fire and ordnance input for the player ship.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    catalog: &Catalog,
    rng: &mut ChaCha8Rng,
    input: &InputSnapshot,
    now_ms: f64,
    tick: u64,
    alerts: &mut AlertChannel,
    events: &mut Vec<CombatEvent>,
) {
    let Some(player) = registry::player(world) else {
        return;
    };
    let Some(origin) = registry::player_position(world) else {
        return;
    };

    let missile_target = if input.fire_missile {
        registry::nearest_enemy(world, &origin, None, true)
    } else {
        None
    };
    let mine_target = if input.drop_mine {
        registry::nearest_enemy(world, &origin, Some(MINE_LOCK_RANGE), true)
    } else {
        None
    };

    let mut spawns = Vec::new();
    {
        let Ok(mut ship) = world.get::<&mut Ship>(player) else {
            return;
        };

        let mut requests = Vec::with_capacity(4);
        if let Some(held_ms) = input.mega_shot_release {
            requests.push(FireRequest {
                slot: 0,
                mode: FireMode::Overcharge,
                charge: mega_shot_charge(held_ms, ship.capacitor),
            });
        }
        let mode = if input.burst {
            FireMode::Burst
        } else {
            FireMode::Normal
        };
        for (slot, held) in input.fire_slots() {
            if held {
                requests.push(FireRequest {
                    slot,
                    mode,
                    charge: 0.0,
                });
            }
        }

        for request in requests {
            match fire(&mut ship, &origin, catalog, rng, request, now_ms) {
                Ok(specs) => {
                    events.push(CombatEvent::ShotFired {
                        slot: request.slot,
                        mode: request.mode,
                        projectiles: specs.len() as u32,
                    });
                    spawns.extend(specs);
                }
                Err(rejection) => {
                    if let Some((severity, message)) = rejection.alert() {
                        alerts.raise(severity, message, tick);
                    }
                }
            }
        }

        if input.fire_missile {
            match take_ordnance(&mut ship, ProjectileKind::Missile, now_ms) {
                Ok(()) => {
                    events.push(CombatEvent::MissileLaunched);
                    spawns.push(missile_spec(&origin, missile_target));
                }
                Err(OrdnanceRejection::Empty) => alerts.warning("NO MISSILES", tick),
                Err(_) => {}
            }
        }
        if input.drop_mine {
            match take_ordnance(&mut ship, ProjectileKind::Mine, now_ms) {
                Ok(()) => {
                    events.push(CombatEvent::MineDropped);
                    spawns.push(mine_spec(&origin, mine_target));
                }
                Err(OrdnanceRejection::Empty) => alerts.warning("NO MINES", tick),
                Err(_) => {}
            }
        }
    }

    for spec in spawns {
        spawn_projectile(world, spec);
    }
}
