//! Resource controller: timed cargo operations, passive regeneration and
//! critical-level alerts for the player ship. Runs after combat.

use hecs::World;

use starwake_core::commands::ManualActions;
use starwake_core::components::*;
use starwake_core::constants::*;
use starwake_core::defs::{Catalog, PowerSource};
use starwake_core::enums::*;
use starwake_core::events::CombatEvent;

use crate::alerts::AlertChannel;
use crate::mission::MissionState;
use crate::ship::{cargo_count, clamp_ship, shield_totals, take_cargo};

const OPERATIONS: [ResourceOp; 5] = [
    ResourceOp::Refuel,
    ResourceOp::Energize,
    ResourceOp::Repair,
    ResourceOp::Reload,
    ResourceOp::Rehydrate,
];

/// Per-tick state the resource pass reads and writes.
pub struct ResourceContext<'a> {
    pub catalog: &'a Catalog,
    pub mission: &'a mut MissionState,
    pub alerts: &'a mut AlertChannel,
    pub events: &'a mut Vec<CombatEvent>,
    pub now_ms: f64,
    pub tick: u64,
}

/// Run the resource pass on the player ship.
pub fn run(world: &mut World, manual: &ManualActions, ctx: &mut ResourceContext) {
    for (_entity, (_player, ship)) in world.query_mut::<(&PlayerShip, &mut Ship)>() {
        if ship.hull <= 0.0 {
            continue;
        }
        complete_operations(ship, ctx);
        start_operations(ship, manual, ctx);
        recharge_capacitor(ship);
        regenerate_energy(ship, ctx);
        regenerate_shields(ship, ctx.now_ms);
        decay_heat(ship);
        burn_travel_fuel(ship, ctx);
        restock_missiles(ship, ctx);
        clamp_ship(ship);
    }
}

/// Whether `op` is below its critical threshold on this ship.
pub fn needs(ship: &Ship, op: ResourceOp) -> bool {
    match op {
        ResourceOp::Refuel => ship.fuel < ship.max_fuel * REFUEL_THRESHOLD,
        ResourceOp::Energize => ship.energy < ship.max_energy * ENERGIZE_THRESHOLD,
        ResourceOp::Repair => ship.hull < REPAIR_THRESHOLD,
        ResourceOp::Reload => empty_magazine(ship).is_some(),
        ResourceOp::Rehydrate => {
            let (current, capacity) = shield_totals(ship);
            capacity > 0.0 && current < capacity * REHYDRATE_THRESHOLD
        }
    }
}

/// First ammo slot with an empty magazine and no reload underway.
fn empty_magazine(ship: &Ship) -> Option<usize> {
    ship.weapons.iter().position(|slot| {
        slot.as_ref()
            .and_then(|s| s.magazine.as_ref())
            .is_some_and(|m| m.rounds == 0 && m.reload_deadline_ms.is_none())
    })
}

/// First ammo slot that is not full, for a manual reload.
fn partial_magazine(ship: &Ship) -> Option<usize> {
    ship.weapons.iter().position(|slot| {
        slot.as_ref()
            .and_then(|s| s.magazine.as_ref())
            .is_some_and(|m| m.rounds < m.capacity && m.reload_deadline_ms.is_none())
    })
}

fn is_running(ship: &Ship, op: ResourceOp) -> bool {
    ship.operations.iter().any(|o| o.op == op)
}

fn requested(manual: &ManualActions, op: ResourceOp) -> bool {
    match op {
        ResourceOp::Refuel => manual.refuel,
        ResourceOp::Energize => manual.energize,
        ResourceOp::Repair => manual.repair,
        ResourceOp::Reload => manual.reload,
        ResourceOp::Rehydrate => manual.rehydrate,
    }
}

fn critical_alert(op: ResourceOp) -> (AlertSeverity, &'static str) {
    match op {
        ResourceOp::Refuel => (AlertSeverity::Warning, "FUEL LOW"),
        ResourceOp::Energize => (AlertSeverity::Warning, "ENERGY LOW"),
        ResourceOp::Repair => (AlertSeverity::Error, "HULL CRITICAL"),
        ResourceOp::Reload => (AlertSeverity::Warning, "AMMUNITION DEPLETED"),
        ResourceOp::Rehydrate => (AlertSeverity::Warning, "SHIELDS FAILING"),
    }
}

/// Duration of an operation and the weapon slot it targets.
fn plan_operation(
    ship: &Ship,
    catalog: &Catalog,
    op: ResourceOp,
    manual: bool,
) -> Option<(f64, Option<usize>)> {
    match op {
        ResourceOp::Refuel => Some((REFUEL_DURATION_MS, None)),
        ResourceOp::Energize => Some((ENERGIZE_DURATION_MS, None)),
        ResourceOp::Repair => Some((REPAIR_DURATION_MS, None)),
        ResourceOp::Rehydrate => Some((REHYDRATE_DURATION_MS, None)),
        ResourceOp::Reload => {
            let slot = if manual {
                partial_magazine(ship)
            } else {
                empty_magazine(ship)
            }?;
            let weapon_id = &ship.weapons[slot].as_ref()?.weapon_id;
            match catalog.weapon(weapon_id)?.power {
                PowerSource::Ammo { reload_ms, .. } => Some((reload_ms, Some(slot))),
                PowerSource::Energy { .. } => None,
            }
        }
    }
}

/// Start auto and manual operations. An operation already underway blocks
/// both triggers for the same kind.
fn start_operations(ship: &mut Ship, manual: &ManualActions, ctx: &mut ResourceContext) {
    for op in OPERATIONS {
        let by_hand = requested(manual, op);
        let auto = needs(ship, op);
        if !(by_hand || auto) || is_running(ship, op) {
            continue;
        }
        if cargo_count(ship, op.cargo()) == 0 {
            if by_hand {
                ctx.alerts.warning(format!("NO CARGO FOR {}", op.label()), ctx.tick);
            } else {
                let (severity, message) = critical_alert(op);
                ctx.alerts.raise(severity, message, ctx.tick);
            }
            continue;
        }
        let Some((duration_ms, slot)) = plan_operation(ship, ctx.catalog, op, by_hand) else {
            continue;
        };

        let completes_ms = ctx.now_ms + duration_ms;
        if let Some(mag) = slot
            .and_then(|s| ship.weapons[s].as_mut())
            .and_then(|w| w.magazine.as_mut())
        {
            mag.reload_deadline_ms = Some(completes_ms);
        }
        ship.operations.push(ActiveOperation {
            op,
            manual: by_hand,
            started_ms: ctx.now_ms,
            completes_ms,
            slot,
        });
        log::debug!("{} started (manual: {by_hand})", op.label());
        ctx.events.push(CombatEvent::OperationStarted { op, manual: by_hand });
        ctx.alerts.info(format!("{} IN PROGRESS", op.label()), ctx.tick);
    }
}

/// Finish due operations, consuming one cargo unit each.
fn complete_operations(ship: &mut Ship, ctx: &mut ResourceContext) {
    let now_ms = ctx.now_ms;
    let (done, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut ship.operations)
        .into_iter()
        .partition(|o| now_ms >= o.completes_ms);
    ship.operations = pending;

    for operation in done {
        if let Some(mag) = operation
            .slot
            .and_then(|s| ship.weapons[s].as_mut())
            .and_then(|w| w.magazine.as_mut())
        {
            mag.reload_deadline_ms = None;
        }
        if !take_cargo(ship, operation.op.cargo()) {
            ctx.alerts.warning(format!("{} FAILED", operation.op.label()), ctx.tick);
            continue;
        }
        apply_operation(ship, &operation);
        ctx.events.push(CombatEvent::OperationCompleted { op: operation.op });
        ctx.alerts.success(format!("{} COMPLETE", operation.op.label()), ctx.tick);
    }
}

fn apply_operation(ship: &mut Ship, operation: &ActiveOperation) {
    match operation.op {
        ResourceOp::Refuel => ship.fuel += FUEL_PER_UNIT,
        ResourceOp::Energize => {
            ship.energy = ship.max_energy;
            ship.energy_depleted = false;
        }
        ResourceOp::Repair => ship.hull += REPAIR_AMOUNT,
        ResourceOp::Reload => {
            if let Some(mag) = operation
                .slot
                .and_then(|s| ship.weapons[s].as_mut())
                .and_then(|w| w.magazine.as_mut())
            {
                mag.rounds = mag.capacity;
            }
        }
        ResourceOp::Rehydrate => {
            for pool in ship.shields.iter_mut().flatten() {
                pool.current += pool.capacity * REHYDRATE_FRACTION;
                pool.regen_blocked_until_ms = 0.0;
            }
        }
    }
}

fn recharge_capacitor(ship: &mut Ship) {
    ship.capacitor = (ship.capacitor + CAPACITOR_RECHARGE_PER_SEC * DT).min(CAPACITOR_MAX);
    if ship.capacitor_locked && ship.capacitor >= CAPACITOR_UNLOCK_LEVEL {
        ship.capacitor_locked = false;
    }
}

/// Energy regeneration and the depleted latch. Depletion sets at 0 and clears
/// only at full energy.
fn regenerate_energy(ship: &mut Ship, ctx: &mut ResourceContext) {
    let under_fire = ship
        .last_hit_ms
        .is_some_and(|t| ctx.now_ms - t < UNDER_FIRE_WINDOW_MS);
    let factor = if ship.energy_depleted && under_fire {
        ENERGY_REGEN_UNDER_FIRE_FACTOR
    } else {
        1.0
    };

    if !ship.energy_depleted && ship.energy <= 0.0 {
        ship.energy_depleted = true;
        log::debug!("energy depleted at tick {}", ctx.tick);
        ctx.alerts.error("ENERGY DEPLETED", ctx.tick);
    }
    ship.energy = (ship.energy + ENERGY_REGEN_PER_SEC * factor * DT).min(ship.max_energy);
    if ship.energy_depleted && ship.energy >= ship.max_energy {
        ship.energy_depleted = false;
        ctx.alerts.success("ENERGY RESTORED", ctx.tick);
    }
}

/// Shield regeneration, paid for with main energy. Blocked during the
/// shatter cooldown and while shields are switched off or energy is latched
/// depleted.
pub fn regenerate_shields(ship: &mut Ship, now_ms: f64) {
    if !ship.shields_enabled || ship.energy_depleted {
        return;
    }
    for pool in ship.shields.iter_mut().flatten() {
        if now_ms < pool.regen_blocked_until_ms || pool.current >= pool.capacity {
            continue;
        }
        let mut amount = (pool.regen_per_sec * DT).min(pool.capacity - pool.current);
        if pool.energy_cost_per_point > 0.0 {
            amount = amount.min(ship.energy / pool.energy_cost_per_point);
        }
        if amount <= 0.0 {
            continue;
        }
        ship.energy -= amount * pool.energy_cost_per_point;
        pool.current += amount;
    }
}

fn decay_heat(ship: &mut Ship) {
    for slot in ship.weapons.iter_mut().flatten() {
        slot.heat = (slot.heat - HEAT_DECAY_PER_SEC * DT).max(0.0);
    }
}

/// Travel burns fuel in proportion to the speed multiplier; an empty tank
/// drops the ship to the minimum speed.
fn burn_travel_fuel(ship: &mut Ship, ctx: &mut ResourceContext) {
    if ctx.mission.phase != MissionPhase::Travel {
        return;
    }
    ship.fuel -= TRAVEL_FUEL_PER_SEC * ctx.mission.travel_speed * DT;
    if ship.fuel <= 0.0 {
        ship.fuel = 0.0;
        if ctx.mission.travel_speed > TRAVEL_SPEED_MIN {
            ctx.mission.travel_speed = TRAVEL_SPEED_MIN;
            ctx.alerts.error("FUEL EXHAUSTED", ctx.tick);
        }
    }
}

fn restock_missiles(ship: &mut Ship, ctx: &mut ResourceContext) {
    if ship.ordnance.missiles > 0 || !take_cargo(ship, CargoKind::Ordnance) {
        return;
    }
    ship.ordnance.missiles += ORDNANCE_MISSILES_PER_UNIT;
    ctx.alerts.info("MISSILES RESTOCKED", ctx.tick);
}
