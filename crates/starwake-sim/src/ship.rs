//! Player ship construction and resource bookkeeping.

use starwake_core::components::*;
use starwake_core::constants::*;
use starwake_core::defs::{Catalog, Loadout, PowerSource, ShipDef};
use starwake_core::enums::CargoKind;
use starwake_core::state::ResourceReturn;

/// Build the player ship from a loadout. Unknown definitions leave the slot
/// empty.
pub fn build_ship(catalog: &Catalog, loadout: &Loadout) -> Ship {
    let def = match catalog.ship(&loadout.ship_id) {
        Some(def) => def.clone(),
        None => {
            log::warn!("unknown ship definition {}, using fallback hull", loadout.ship_id);
            ShipDef {
                id: loadout.ship_id.clone(),
                max_energy: DEFAULT_MAX_ENERGY,
                max_fuel: DEFAULT_MAX_FUEL,
                radius: DEFAULT_SHIP_RADIUS,
                cargo_capacity: DEFAULT_CARGO_CAPACITY,
            }
        }
    };

    let mut weapons: [Option<WeaponSlot>; 3] = Default::default();
    for (slot, id) in loadout.weapons.iter().enumerate() {
        let Some(id) = id else { continue };
        let Some(weapon) = catalog.weapon(id) else {
            log::warn!("unknown weapon definition {id} in slot {slot}");
            continue;
        };
        let magazine = match weapon.power {
            PowerSource::Ammo { magazine, .. } => Some(Magazine {
                rounds: magazine,
                capacity: magazine,
                reload_deadline_ms: None,
            }),
            PowerSource::Energy { .. } => None,
        };
        weapons[slot] = Some(WeaponSlot {
            weapon_id: weapon.id.clone(),
            magazine,
            last_fire_ms: None,
            heat: 0.0,
        });
    }

    let mut shields: [Option<ShieldPool>; 2] = Default::default();
    for (pool, id) in loadout.shields.iter().enumerate() {
        let Some(id) = id else { continue };
        let Some(shield) = catalog.shield(id) else {
            log::warn!("unknown shield definition {id} in pool {pool}");
            continue;
        };
        shields[pool] = Some(ShieldPool {
            def_id: shield.id.clone(),
            color: shield.color,
            current: shield.capacity,
            capacity: shield.capacity,
            immunity: shield.immunity,
            resistance: shield.resistance,
            regen_per_sec: shield.regen_per_sec,
            energy_cost_per_point: shield.energy_cost_per_point,
            regen_blocked_until_ms: 0.0,
        });
    }

    let mut ship = Ship {
        def_id: def.id,
        radius: def.radius,
        hull: HULL_MAX,
        shields,
        shields_enabled: true,
        energy: def.max_energy,
        max_energy: def.max_energy,
        energy_depleted: false,
        capacitor: CAPACITOR_MAX,
        capacitor_locked: false,
        fuel: def.max_fuel * loadout.fuel_fill,
        max_fuel: def.max_fuel,
        weapons,
        cargo: Vec::new(),
        cargo_capacity: def.cargo_capacity,
        ordnance: Ordnance {
            missiles: loadout.missiles,
            mines: loadout.mines,
            last_launch_ms: None,
        },
        operations: Vec::new(),
        last_hit_ms: None,
    };
    for stack in &loadout.cargo {
        add_cargo(&mut ship, stack.kind, stack.quantity);
    }
    clamp_ship(&mut ship);
    ship
}

/// Units of one cargo kind aboard.
pub fn cargo_count(ship: &Ship, kind: CargoKind) -> u32 {
    ship.cargo
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| s.quantity)
        .sum()
}

/// Total cargo units aboard.
pub fn cargo_total(ship: &Ship) -> u32 {
    ship.cargo.iter().map(|s| s.quantity).sum()
}

/// Remove one unit of `kind`. Returns false if none is aboard.
pub fn take_cargo(ship: &mut Ship, kind: CargoKind) -> bool {
    let Some(idx) = ship.cargo.iter().position(|s| s.kind == kind && s.quantity > 0) else {
        return false;
    };
    ship.cargo[idx].quantity -= 1;
    if ship.cargo[idx].quantity == 0 {
        ship.cargo.remove(idx);
    }
    true
}

/// Stow up to `quantity` units, bounded by free hold space. Returns the
/// number stowed.
pub fn add_cargo(ship: &mut Ship, kind: CargoKind, quantity: u32) -> u32 {
    let free = ship.cargo_capacity.saturating_sub(cargo_total(ship));
    let stowed = quantity.min(free);
    if stowed == 0 {
        return 0;
    }
    match ship.cargo.iter_mut().find(|s| s.kind == kind) {
        Some(stack) => stack.quantity += stowed,
        None => ship.cargo.push(CargoStack {
            kind,
            quantity: stowed,
        }),
    }
    stowed
}

/// Total current and capacity over both shield pools.
pub fn shield_totals(ship: &Ship) -> (f64, f64) {
    ship.shields
        .iter()
        .flatten()
        .fold((0.0, 0.0), |(cur, cap), p| (cur + p.current, cap + p.capacity))
}

/// Force every resource into its valid range.
pub fn clamp_ship(ship: &mut Ship) {
    ship.hull = clamp_finite(ship.hull, HULL_MAX);
    ship.energy = clamp_finite(ship.energy, ship.max_energy);
    ship.capacitor = clamp_finite(ship.capacitor, CAPACITOR_MAX);
    ship.fuel = clamp_finite(ship.fuel, ship.max_fuel);
    for pool in ship.shields.iter_mut().flatten() {
        pool.current = clamp_finite(pool.current, pool.capacity);
    }
    for slot in ship.weapons.iter_mut().flatten() {
        slot.heat = clamp_finite(slot.heat, HEAT_MAX);
        if let Some(mag) = slot.magazine.as_mut() {
            mag.rounds = mag.rounds.min(mag.capacity);
        }
    }
}

fn clamp_finite(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}

/// Resources carried back to the lifecycle collaborator.
pub fn resource_return(ship: &Ship) -> ResourceReturn {
    let mut ret = ResourceReturn {
        missiles: ship.ordnance.missiles,
        mines: ship.ordnance.mines,
        fuel: ship.fuel,
        hull: ship.hull,
        cargo: ship.cargo.clone(),
        ..Default::default()
    };
    for (i, slot) in ship.weapons.iter().enumerate() {
        if let Some(slot) = slot {
            ret.weapons[i] = Some(slot.weapon_id.clone());
            ret.ammo[i] = slot.magazine.as_ref().map(|m| m.rounds);
        }
    }
    ret
}
