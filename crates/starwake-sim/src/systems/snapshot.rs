//! Snapshot system: builds a MissionSnapshot from the ECS world.

use hecs::World;

use starwake_core::components::*;
use starwake_core::enums::*;
use starwake_core::events::{Alert, CombatEvent};
use starwake_core::state::*;
use starwake_core::types::{Position, SimTime};

use crate::mission::MissionState;

/// Run-level state the snapshot needs besides the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub frame: u64,
    pub run_state: RunState,
    pub mission: &'a MissionState,
    pub now_ms: f64,
    pub alert: Option<Alert>,
    pub outcome: Option<MissionOutcome>,
}

/// Build a complete snapshot of the current simulation state.
pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext,
    events: Vec<CombatEvent>,
) -> MissionSnapshot {
    MissionSnapshot {
        time: ctx.time,
        frame: ctx.frame,
        run_state: ctx.run_state,
        phase: ctx.mission.phase,
        phase_countdown: ctx.mission.countdown,
        travel_progress: ctx.mission.travel_progress(),
        travel_speed: ctx.mission.travel_speed,
        score: ctx.mission.score,
        ship: build_ship_view(world, ctx.now_ms),
        boss: build_boss_view(world),
        contacts: build_contacts(world),
        alert: ctx.alert,
        events,
        outcome: ctx.outcome,
    }
}

fn build_ship_view(world: &World, now_ms: f64) -> ShipView {
    let mut query = world.query::<(&PlayerShip, &Position, &Ship)>();
    let Some((_, (_, pos, ship))) = query.iter().next() else {
        return ShipView::default();
    };

    let shields = ship
        .shields
        .iter()
        .enumerate()
        .filter_map(|(pool, p)| {
            p.as_ref().map(|p| ShieldView {
                pool,
                color: p.color,
                current: p.current,
                capacity: p.capacity,
                shattered: now_ms < p.regen_blocked_until_ms,
            })
        })
        .collect();

    let weapons = ship
        .weapons
        .iter()
        .enumerate()
        .filter_map(|(slot, w)| {
            w.as_ref().map(|w| WeaponView {
                slot,
                weapon_id: w.weapon_id.clone(),
                rounds: w.magazine.as_ref().map(|m| m.rounds),
                reloading: w
                    .magazine
                    .as_ref()
                    .is_some_and(|m| m.reload_deadline_ms.is_some()),
                heat: w.heat,
            })
        })
        .collect();

    let operations = ship
        .operations
        .iter()
        .map(|o| {
            let span = o.completes_ms - o.started_ms;
            let progress = if span > 0.0 {
                ((now_ms - o.started_ms) / span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            OperationView {
                op: o.op,
                manual: o.manual,
                progress,
            }
        })
        .collect();

    ShipView {
        position: *pos,
        hull: ship.hull,
        shields,
        shields_enabled: ship.shields_enabled,
        energy: ship.energy,
        max_energy: ship.max_energy,
        energy_depleted: ship.energy_depleted,
        capacitor: ship.capacitor,
        capacitor_locked: ship.capacitor_locked,
        fuel: ship.fuel,
        max_fuel: ship.max_fuel,
        weapons,
        missiles: ship.ordnance.missiles,
        mines: ship.ordnance.mines,
        cargo: ship.cargo.clone(),
        operations,
    }
}

fn build_boss_view(world: &World) -> Option<BossView> {
    let mut query = world.query::<(&Boss, &EnemyState, &Health, Option<&EnemyShield>)>();
    let (_, (_, state, health, shield)) = query.iter().next()?;
    Some(BossView {
        def_id: state.def_id.clone(),
        hp_ratio: ratio(health.hp, health.max_hp),
        shield_ratio: shield.map_or(0.0, |s| ratio(s.current, s.capacity)),
    })
}

fn ratio(current: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (current / max).clamp(0.0, 1.0)
}

fn build_contacts(world: &World) -> Vec<ContactView> {
    let mut contacts = Vec::new();

    for (_, (pos, state, boss)) in world
        .query::<(&Position, &EnemyState, Option<&Boss>)>()
        .iter()
    {
        contacts.push(ContactView {
            kind: if boss.is_some() {
                ContactKind::Boss
            } else {
                ContactKind::Enemy
            },
            position: *pos,
            radius: state.radius,
        });
    }
    for (_, (pos, asteroid)) in world.query::<(&Position, &Asteroid)>().iter() {
        contacts.push(ContactView {
            kind: ContactKind::Asteroid,
            position: *pos,
            radius: asteroid.radius,
        });
    }
    for (_, (pos, projectile)) in world.query::<(&Position, &Projectile)>().iter() {
        contacts.push(ContactView {
            kind: match projectile.owner {
                ProjectileOwner::Player => ContactKind::PlayerProjectile,
                ProjectileOwner::Enemy => ContactKind::EnemyProjectile,
            },
            position: *pos,
            radius: projectile.radius,
        });
    }
    for (_, (pos, pickup)) in world.query::<(&Position, &Pickup)>().iter() {
        contacts.push(ContactView {
            kind: ContactKind::Pickup,
            position: *pos,
            radius: pickup.radius,
        });
    }

    contacts.sort_by(|a, b| {
        a.kind
            .cmp(&b.kind)
            .then(a.position.x.total_cmp(&b.position.x))
            .then(a.position.y.total_cmp(&b.position.y))
    });
    contacts
}
