//! Tests for the simulation engine, combat, weapons, resources and the
//! mission phase machine.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use hecs::World;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starwake_core::commands::{InputSnapshot, PlayerCommand};
use starwake_core::components::*;
use starwake_core::constants::*;
use starwake_core::defs::{Catalog, Loadout};
use starwake_core::enums::*;
use starwake_core::events::CombatEvent;
use starwake_core::state::MissionOutcome;
use starwake_core::types::{Position, Velocity};

use crate::alerts::AlertChannel;
use crate::clock::SimulationClock;
use crate::engine::{MissionHooks, SimConfig, Simulation};
use crate::guidance::{self, pursue, Homing};
use crate::mission::{next_phase, spawn_policy, travel_duration_ms, MissionState};
use crate::registry;
use crate::ship::{build_ship, cargo_count};
use crate::systems::combat::{self, apply_damage, apply_damage_to_ship, chain_reaction, CombatContext};
use crate::systems::weapons::{fire, mega_shot_charge, FireRejection, FireRequest};
use crate::systems::{cleanup, enemy_ai, resources, spawner};
use crate::world_setup::{
    spawn_asteroid_at, spawn_boss, spawn_enemy_at, spawn_pickup, spawn_player_ship, spawn_projectile,
    ProjectileSpec,
};

// ---- Helpers ----

fn sim(seed: u64) -> Simulation {
    Simulation::new(
        SimConfig {
            seed,
            ..Default::default()
        },
        Catalog::default(),
        &Loadout::default(),
    )
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn bare_ship() -> Ship {
    let loadout = Loadout {
        shields: [None, None],
        ..Default::default()
    };
    build_ship(&Catalog::default(), &loadout)
}

fn single_shield_ship() -> Ship {
    let mut ship = bare_ship();
    ship.shields[0] = Some(ShieldPool {
        def_id: "test".into(),
        color: ShieldColor::Gold,
        current: 100.0,
        capacity: 100.0,
        immunity: ShieldImmunity::None,
        resistance: 0.0,
        regen_per_sec: 5.0,
        energy_cost_per_point: 0.5,
        regen_blocked_until_ms: 0.0,
    });
    ship
}

fn player_bolt(position: Position, damage: f64, damage_type: DamageType) -> ProjectileSpec {
    ProjectileSpec {
        position,
        velocity: Velocity::default(),
        projectile: Projectile {
            owner: ProjectileOwner::Player,
            kind: ProjectileKind::Bolt,
            damage,
            damage_type,
            life_ticks: 10,
            radius: 4.0,
            length: 8.0,
            width: 2.0,
        },
        homing: None,
    }
}

fn run_combat(world: &mut World, mission: &mut MissionState) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    let mut despawn = Vec::new();
    combat::run(
        world,
        &mut CombatContext {
            mission,
            events: &mut events,
            despawn: &mut despawn,
            difficulty: 1,
            now_ms: 1000.0,
        },
    );
    events
}

fn ship_mut(sim: &mut Simulation) -> hecs::RefMut<'_, Ship> {
    let player = sim.player_entity();
    sim.world_mut()
        .get::<&mut Ship>(player)
        .expect("player ship")
}

#[derive(Default)]
struct Recorded {
    ends: Vec<MissionOutcome>,
    star_seeds: Vec<u64>,
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Recorded>>);

impl MissionHooks for Recorder {
    fn on_star_system_created(&mut self, seed: u64) {
        self.0.borrow_mut().star_seeds.push(seed);
    }

    fn on_mission_end(&mut self, outcome: &MissionOutcome) {
        self.0.borrow_mut().ends.push(outcome.clone());
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut sim_a = sim(12345);
    let mut sim_b = sim(12345);
    let input = InputSnapshot {
        fire_primary: true,
        thrust_x: 0.3,
        ..Default::default()
    };

    for _ in 0..600 {
        let json_a = serde_json::to_string(&sim_a.tick(&input)).unwrap();
        let json_b = serde_json::to_string(&sim_b.tick(&input)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut sim_a = sim(111);
    let mut sim_b = sim(222);

    let mut diverged = false;
    for _ in 0..600 {
        let json_a = serde_json::to_string(&sim_a.tick(&idle())).unwrap();
        let json_b = serde_json::to_string(&sim_b.tick(&idle())).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Damage scenarios ----

#[test]
fn test_kinetic_hit_without_shields_empties_hull() {
    let mut ship = bare_ship();
    let report = apply_damage_to_ship(&mut ship, 50.0, DamageType::Kinetic, 0.0);
    assert_eq!(ship.hull, 0.0);
    assert!(report.destroyed);
    assert_eq!(report.absorbed, 0.0);
}

#[test]
fn test_energy_hit_shatters_shield_and_overflows() {
    let mut ship = single_shield_ship();
    let report = apply_damage_to_ship(&mut ship, 40.0, DamageType::Energy, 500.0);

    let pool = ship.shields[0].as_ref().unwrap();
    assert_eq!(pool.current, 0.0);
    assert_eq!(report.shattered, vec![0]);
    assert_eq!(pool.regen_blocked_until_ms, 500.0 + SHIELD_SHATTER_COOLDOWN_MS);
    assert!((report.absorbed - 100.0).abs() < 1e-9);
    // 240 total, 140 left for a 100-point hull.
    assert_eq!(ship.hull, 0.0);
    assert!(report.destroyed);
}

#[test]
fn test_secondary_pool_absorbs_before_primary() {
    let mut ship = build_ship(&Catalog::default(), &Loadout::default());
    let primary_before = ship.shields[0].as_ref().unwrap().current;

    // 10 energy → 60 after the multiplier; the secondary pool is not energy-immune.
    apply_damage_to_ship(&mut ship, 10.0, DamageType::Energy, 0.0);

    assert_eq!(ship.shields[0].as_ref().unwrap().current, primary_before);
    assert!((ship.shields[1].as_ref().unwrap().current - 40.0).abs() < 1e-9);
    assert_eq!(ship.hull, HULL_MAX);
}

#[test]
fn test_player_immune_pool_swallows_hit() {
    let mut ship = build_ship(&Catalog::default(), &Loadout::default());
    let before = ship.clone();
    let report = apply_damage_to_ship(&mut ship, 30.0, DamageType::Kinetic, 0.0);
    assert!(report.immune);
    assert_eq!(ship.hull, before.hull);
    assert_eq!(ship.shields, before.shields);
}

#[test]
fn test_resistant_pool_mitigates_absorbed_part() {
    let mut ship = bare_ship();
    ship.shields[0] = build_ship(&Catalog::default(), &Loadout::default()).shields[0].clone();
    // 10 explosive, 25% resistance: pool takes 7.5.
    apply_damage_to_ship(&mut ship, 10.0, DamageType::Explosive, 0.0);
    let pool = ship.shields[0].as_ref().unwrap();
    assert!((pool.current - (pool.capacity - 7.5)).abs() < 1e-9);
    assert_eq!(ship.hull, HULL_MAX);
}

#[test]
fn test_shields_switched_off_do_not_absorb() {
    let mut ship = single_shield_ship();
    ship.shields_enabled = false;
    apply_damage_to_ship(&mut ship, 10.0, DamageType::Explosive, 0.0);
    assert_eq!(ship.shields[0].as_ref().unwrap().current, 100.0);
    assert_eq!(ship.hull, 90.0);
}

#[test]
fn test_enemy_immunity_law() {
    let mut health = Health {
        hp: 40.0,
        max_hp: 40.0,
    };
    let mut shield = EnemyShield {
        current: 20.0,
        capacity: 20.0,
        immunity: ShieldImmunity::Kinetic,
        regen_per_sec: 2.0,
    };
    let report = apply_damage(&mut health, Some(&mut shield), 1000.0, DamageType::Projectile);
    assert!(report.immune);
    assert_eq!(health.hp, 40.0);
    assert_eq!(shield.current, 20.0);

    // A different category gets through: 5 energy → 30, 20 to shield, 10 to hp.
    let report = apply_damage(&mut health, Some(&mut shield), 5.0, DamageType::Energy);
    assert!(!report.immune);
    assert_eq!(shield.current, 0.0);
    assert!((health.hp - 30.0).abs() < 1e-9);

    // Shield down: immunity no longer applies.
    let report = apply_damage(&mut health, Some(&mut shield), 1.0, DamageType::Kinetic);
    assert!((report.hp_damage - KINETIC_DAMAGE_MULTIPLIER).abs() < 1e-9);
}

#[test]
fn test_damage_multipliers() {
    assert_eq!(combat::damage_multiplier(DamageType::Energy), 6.0);
    assert_eq!(combat::damage_multiplier(DamageType::Emp), 6.0);
    assert_eq!(combat::damage_multiplier(DamageType::Kinetic), 2.23);
    assert_eq!(combat::damage_multiplier(DamageType::Projectile), 2.23);
    assert_eq!(combat::damage_multiplier(DamageType::Explosive), 1.0);
    assert_eq!(combat::damage_multiplier(DamageType::Thermal), 1.0);
}

#[test]
fn test_kill_score_scales_with_difficulty() {
    assert_eq!(combat::kill_score(100, 1), 100);
    assert_eq!(combat::kill_score(100, 3), 200);
}

// ---- Chain reactions and kills ----

#[test]
fn test_chain_reaction_visits_each_hostile_once() {
    let catalog = Catalog::default();
    let scout = catalog.enemy("scout").unwrap();
    let mut world = World::new();
    let origin = Position::new(400.0, 300.0, 0.0);
    let e0 = spawn_enemy_at(&mut world, scout, origin, 0.1);
    let e1 = spawn_enemy_at(&mut world, scout, Position::new(450.0, 300.0, 0.0), 0.1);
    let e2 = spawn_enemy_at(&mut world, scout, Position::new(600.0, 300.0, 0.0), 0.1);

    let mut visited = HashSet::from([e0]);
    let killed = chain_reaction(&mut world, &origin, &mut visited, 0.0);
    assert_eq!(killed, vec![e1]);
    assert!(visited.contains(&e1));
    assert!(!visited.contains(&e2));

    let again = chain_reaction(&mut world, &origin, &mut visited, 0.0);
    assert!(again.is_empty());
}

#[test]
fn test_chain_kill_does_not_chain_further() {
    let catalog = Catalog::default();
    let scout = catalog.enemy("scout").unwrap();
    let mut world = World::new();
    let mut mission = MissionState::new(1);

    let target = Position::new(400.0, 300.0, 0.0);
    let first = spawn_enemy_at(&mut world, scout, target, 1.0);
    let near = spawn_enemy_at(&mut world, scout, Position::new(450.0, 300.0, 0.0), 0.1);
    // Within chain range of `near` but not of `first`.
    let far = spawn_enemy_at(&mut world, scout, Position::new(505.0, 300.0, 0.0), 0.1);
    spawn_projectile(&mut world, player_bolt(target, 100.0, DamageType::Kinetic));

    let events = run_combat(&mut world, &mut mission);

    assert!(!world.contains(first));
    assert!(!world.contains(near));
    assert!(world.contains(far));
    let kills: Vec<bool> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::EnemyDestroyed { chain, .. } => Some(*chain),
            _ => None,
        })
        .collect();
    assert_eq!(kills, vec![false, true]);
    assert_eq!(mission.score, 200);
}

#[test]
fn test_each_kill_splashes_a_shared_bystander() {
    let catalog = Catalog::default();
    let scout = catalog.enemy("scout").unwrap();
    let mut world = World::new();
    let mut mission = MissionState::new(1);

    let left = Position::new(300.0, 300.0, 0.0);
    let right = Position::new(400.0, 300.0, 0.0);
    spawn_enemy_at(&mut world, scout, left, 0.1);
    spawn_enemy_at(&mut world, scout, right, 0.1);
    let bystander = spawn_enemy_at(&mut world, scout, Position::new(350.0, 300.0, 0.0), 10.0);
    spawn_projectile(&mut world, player_bolt(left, 100.0, DamageType::Kinetic));
    spawn_projectile(&mut world, player_bolt(right, 100.0, DamageType::Kinetic));

    run_combat(&mut world, &mut mission);

    let health = world.get::<&Health>(bystander).unwrap();
    let expected = health.max_hp - 2.0 * combat::chain_damage(50.0);
    assert!((health.hp - expected).abs() < 1e-9, "hp {} expected {expected}", health.hp);
}

#[test]
fn test_projectile_in_other_plane_misses() {
    let catalog = Catalog::default();
    let scout = catalog.enemy("scout").unwrap();
    let mut world = World::new();
    let mut mission = MissionState::new(1);
    let enemy = spawn_enemy_at(&mut world, scout, Position::new(400.0, 300.0, 0.0), 1.0);
    spawn_projectile(
        &mut world,
        player_bolt(Position::new(400.0, 300.0, DEPTH_BAND + 5.0), 100.0, DamageType::Kinetic),
    );

    run_combat(&mut world, &mut mission);
    assert!(world.contains(enemy));
    assert_eq!(world.get::<&Health>(enemy).unwrap().hp, 20.0);
}

#[test]
fn test_asteroid_destroyed_drops_loot() {
    let mut world = World::new();
    let mut mission = MissionState::new(1);
    let at = Position::new(300.0, 200.0, 0.0);
    let asteroid = spawn_asteroid_at(
        &mut world,
        at,
        Velocity::default(),
        Asteroid {
            hp: 10.0,
            max_hp: 10.0,
            size: AsteroidSize::Small,
            variant: AsteroidVariant::Ice,
            radius: 12.0,
            loot: Some(Loot {
                kind: CargoKind::Fuel,
                quantity: 1,
            }),
        },
    );
    spawn_projectile(&mut world, player_bolt(at, 10.0, DamageType::Kinetic));

    let events = run_combat(&mut world, &mut mission);
    assert!(!world.contains(asteroid));
    assert_eq!(mission.score, ASTEROID_SCORE);
    assert!(events.contains(&CombatEvent::AsteroidDestroyed {
        size: AsteroidSize::Small
    }));
    assert_eq!(world.query::<&Pickup>().iter().count(), 1);
}

#[test]
fn test_pickup_collected_into_cargo() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut mission = MissionState::new(1);
    let player = spawn_player_ship(&mut world, &catalog, &Loadout::default());
    let at = registry::player_position(&world).unwrap();
    spawn_pickup(
        &mut world,
        at,
        Loot {
            kind: CargoKind::Commodity,
            quantity: 2,
        },
    );

    let events = run_combat(&mut world, &mut mission);
    assert!(events.contains(&CombatEvent::PickupCollected {
        kind: CargoKind::Commodity,
        quantity: 2
    }));
    let ship = world.get::<&Ship>(player).unwrap();
    assert_eq!(cargo_count(&ship, CargoKind::Commodity), 2);
    assert_eq!(world.query::<&Pickup>().iter().count(), 0);
}

#[test]
fn test_full_hold_leaves_pickup() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut mission = MissionState::new(1);
    let player = spawn_player_ship(&mut world, &catalog, &Loadout::default());
    world.get::<&mut Ship>(player).unwrap().cargo_capacity = 0;
    let at = registry::player_position(&world).unwrap();
    spawn_pickup(
        &mut world,
        at,
        Loot {
            kind: CargoKind::Fuel,
            quantity: 1,
        },
    );

    run_combat(&mut world, &mut mission);
    assert_eq!(world.query::<&Pickup>().iter().count(), 1);
}

#[test]
fn test_asteroid_ram_damages_unshielded_ship() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut mission = MissionState::new(1);
    let player = spawn_player_ship(&mut world, &catalog, &Loadout::default());
    world.get::<&mut Ship>(player).unwrap().shields_enabled = false;
    let at = registry::player_position(&world).unwrap();
    let rock = spawn_asteroid_at(
        &mut world,
        at,
        Velocity::default(),
        Asteroid {
            hp: 45.0,
            max_hp: 45.0,
            size: AsteroidSize::Large,
            variant: AsteroidVariant::Rock,
            radius: 36.0,
            loot: None,
        },
    );

    run_combat(&mut world, &mut mission);
    assert!(!world.contains(rock));
    let hull = world.get::<&Ship>(player).unwrap().hull;
    let expected = HULL_MAX - ASTEROID_RAM_DAMAGE * 3.0 * KINETIC_DAMAGE_MULTIPLIER;
    assert!((hull - expected).abs() < 1e-9);
    assert_eq!(mission.score, 0);
}

#[test]
fn test_enemy_bolt_hits_player() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut mission = MissionState::new(1);
    let player = spawn_player_ship(&mut world, &catalog, &Loadout::default());
    let at = registry::player_position(&world).unwrap();
    let mut bolt = player_bolt(at, 2.0, DamageType::Energy);
    bolt.projectile.owner = ProjectileOwner::Enemy;
    spawn_projectile(&mut world, bolt);

    let events = run_combat(&mut world, &mut mission);
    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::PlayerHit { absorbed, .. } if *absorbed > 0.0)));
    let ship = world.get::<&Ship>(player).unwrap();
    assert!((ship.shields[1].as_ref().unwrap().current - 88.0).abs() < 1e-9);
    assert_eq!(ship.last_hit_ms, Some(1000.0));
}

// ---- Weapons ----

fn rail_ship() -> Ship {
    let loadout = Loadout {
        weapons: [Some("rail-driver".into()), Some("pulse-laser".into()), None],
        ..Default::default()
    };
    build_ship(&Catalog::default(), &loadout)
}

fn request(slot: usize) -> FireRequest {
    FireRequest {
        slot,
        mode: FireMode::Normal,
        charge: 0.0,
    }
}

#[test]
fn test_fire_rate_gates_second_shot() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();
    let origin = Position::new(400.0, 500.0, 0.0);

    let mut projectiles = 0;
    for now in [0.0, 100.0] {
        if let Ok(specs) = fire(&mut ship, &origin, &catalog, &mut rng, request(0), now) {
            projectiles += specs.len();
        }
    }
    assert_eq!(projectiles, 1);
    assert_eq!(
        fire(&mut ship, &origin, &catalog, &mut rng, request(0), 200.0),
        Err(FireRejection::CoolingDown)
    );
    assert!(fire(&mut ship, &origin, &catalog, &mut rng, request(0), 500.0).is_ok());
}

#[test]
fn test_empty_magazine_rejects_without_mutation() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();
    ship.weapons[0].as_mut().unwrap().magazine.as_mut().unwrap().rounds = 0;
    let before = ship.clone();

    let result = fire(&mut ship, &Position::default(), &catalog, &mut rng, request(0), 0.0);
    assert_eq!(result, Err(FireRejection::MagazineEmpty));
    assert_eq!(ship, before);
}

#[test]
fn test_energy_weapon_draws_capacitor_first() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();

    let specs = fire(&mut ship, &Position::default(), &catalog, &mut rng, request(1), 0.0).unwrap();
    assert_eq!(ship.capacitor, CAPACITOR_MAX - 3.0);
    assert_eq!(ship.energy, ship.max_energy);
    // Straight up, no spread.
    let v = specs[0].velocity;
    assert!(v.x.abs() < 1e-9);
    assert!(v.y < 0.0);
}

#[test]
fn test_energy_fallback_spreads_shot() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut ship = rail_ship();
    ship.capacitor = 0.0;
    ship.capacitor_locked = true;

    let specs = fire(&mut ship, &Position::default(), &catalog, &mut rng, request(1), 0.0).unwrap();
    assert_eq!(ship.energy, ship.max_energy - 3.0);
    let v = specs[0].velocity;
    let angle = v.x.atan2(-v.y).abs();
    assert!(angle <= IMPRECISE_SPREAD_RAD + 1e-9);
}

#[test]
fn test_insufficient_power_rejects() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();
    ship.capacitor = 1.0;
    ship.energy = 1.0;
    let before = ship.clone();
    assert_eq!(
        fire(&mut ship, &Position::default(), &catalog, &mut rng, request(1), 0.0),
        Err(FireRejection::InsufficientPower)
    );
    assert_eq!(ship, before);
}

#[test]
fn test_overcharge_scales_damage_and_drains_capacitor() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();
    let req = FireRequest {
        slot: 1,
        mode: FireMode::Overcharge,
        charge: 100.0,
    };

    let specs = fire(&mut ship, &Position::default(), &catalog, &mut rng, req, 0.0).unwrap();
    assert_eq!(specs.len(), 1);
    assert!((specs[0].projectile.damage - 40.0).abs() < 1e-9);
    assert!(specs[0].projectile.length > 14.0);
    // Shot cost 3 plus overcharge 5 + 45.
    assert!((ship.capacitor - (CAPACITOR_MAX - 53.0)).abs() < 1e-9);
}

#[test]
fn test_capacitor_locks_when_drained() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();
    ship.capacitor = 8.0;
    let req = FireRequest {
        slot: 1,
        mode: FireMode::Overcharge,
        charge: 0.0,
    };

    fire(&mut ship, &Position::default(), &catalog, &mut rng, req, 0.0).unwrap();
    assert_eq!(ship.capacitor, 0.0);
    assert!(ship.capacitor_locked);
    assert_eq!(
        fire(&mut ship, &Position::default(), &catalog, &mut rng, req, 5000.0),
        Err(FireRejection::CapacitorLocked)
    );
}

#[test]
fn test_burst_fires_fan_at_half_rate() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();
    let req = FireRequest {
        slot: 1,
        mode: FireMode::Burst,
        charge: 0.0,
    };

    let specs = fire(&mut ship, &Position::default(), &catalog, &mut rng, req, 0.0).unwrap();
    assert_eq!(specs.len(), BURST_COUNT as usize);
    assert_eq!(ship.capacitor, CAPACITOR_MAX - 9.0);
    // 6 shots/s halved: 333 ms between bursts.
    assert_eq!(
        fire(&mut ship, &Position::default(), &catalog, &mut rng, req, 300.0),
        Err(FireRejection::CoolingDown)
    );
    assert!(fire(&mut ship, &Position::default(), &catalog, &mut rng, req, 340.0).is_ok());
}

#[test]
fn test_depleted_energy_blocks_fire() {
    let catalog = Catalog::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut ship = rail_ship();
    ship.energy_depleted = true;
    assert_eq!(
        fire(&mut ship, &Position::default(), &catalog, &mut rng, request(0), 0.0),
        Err(FireRejection::EnergyDepleted)
    );
}

#[test]
fn test_mega_shot_charge_limited_by_capacitor() {
    assert_eq!(mega_shot_charge(MEGA_SHOT_FULL_CHARGE_MS, 100.0), 100.0);
    assert_eq!(mega_shot_charge(MEGA_SHOT_FULL_CHARGE_MS / 2.0, 100.0), 50.0);
    assert_eq!(mega_shot_charge(10_000.0, 30.0), 30.0);
    assert_eq!(mega_shot_charge(-5.0, 30.0), 0.0);
}

#[test]
fn test_missile_launch_consumes_ordnance() {
    let mut sim = sim(3);
    let input = InputSnapshot {
        fire_missile: true,
        ..Default::default()
    };
    let snap = sim.tick(&input);
    assert!(snap.events.contains(&CombatEvent::MissileLaunched));
    assert_eq!(snap.ship.missiles, 5);

    // Ordnance cooldown swallows the immediate repeat.
    let snap = sim.tick(&input);
    assert_eq!(snap.ship.missiles, 5);
}

#[test]
fn test_no_missiles_raises_alert() {
    let mut sim = sim(3);
    ship_mut(&mut sim).ordnance.missiles = 0;
    let snap = sim.tick(&InputSnapshot {
        fire_missile: true,
        ..Default::default()
    });
    assert_eq!(snap.alert.map(|a| a.message), Some("NO MISSILES".to_string()));
}

// ---- Guidance ----

#[test]
fn test_pursue_turn_is_rate_limited() {
    let v = pursue(
        glam::DVec2::new(0.0, -100.0),
        glam::DVec2::ZERO,
        glam::DVec2::new(100.0, 0.0),
        MISSILE_TURN_RATE,
        MISSILE_MAX_SPEED,
        MISSILE_ACCEL,
        DT,
    );
    let turned = v.x.atan2(-v.y);
    assert!(turned > 0.0);
    assert!(turned <= MISSILE_TURN_RATE * DT + 1e-9);
    assert!(v.length() > 100.0);
}

#[test]
fn test_homing_drops_dead_target_and_mine_reacquires() {
    let catalog = Catalog::default();
    let scout = catalog.enemy("scout").unwrap();
    let mut world = World::new();
    let gone = spawn_enemy_at(&mut world, scout, Position::new(100.0, 100.0, 0.0), 1.0);
    let near = spawn_enemy_at(&mut world, scout, Position::new(300.0, 300.0, 0.0), 1.0);

    let missile = spawn_projectile(
        &mut world,
        crate::systems::weapons::missile_spec(&Position::new(100.0, 400.0, 0.0), Some(gone)),
    );
    let mine = spawn_projectile(
        &mut world,
        crate::systems::weapons::mine_spec(&Position::new(300.0, 400.0, 0.0), Some(gone)),
    );
    world.despawn(gone).unwrap();

    guidance::run(&mut world);

    assert_eq!(world.get::<&Homing>(missile).unwrap().target, None);
    assert_eq!(world.get::<&Homing>(mine).unwrap().target, Some(near));
}

// ---- Resources ----

#[test]
fn test_auto_refuel_consumes_one_unit() {
    let mut sim = sim(5);
    ship_mut(&mut sim).fuel = 10.0;

    let snap = sim.tick(&idle());
    assert!(snap.events.contains(&CombatEvent::OperationStarted {
        op: ResourceOp::Refuel,
        manual: false
    }));
    assert_eq!(snap.ship.operations.len(), 1);

    // Manual trigger while the auto operation runs is ignored.
    let manual = InputSnapshot {
        manual: starwake_core::commands::ManualActions {
            refuel: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let snap = sim.tick(&manual);
    let refuels = snap
        .ship
        .operations
        .iter()
        .filter(|o| o.op == ResourceOp::Refuel)
        .count();
    assert_eq!(refuels, 1);

    let mut completed = false;
    for _ in 0..200 {
        let snap = sim.tick(&idle());
        completed |= snap.events.contains(&CombatEvent::OperationCompleted {
            op: ResourceOp::Refuel,
        });
    }
    assert!(completed);
    let ship = sim.ship().unwrap();
    assert!(ship.fuel > 45.0);
    assert_eq!(cargo_count(&ship, CargoKind::Fuel), 1);
}

#[test]
fn test_auto_reload_refills_magazine() {
    let mut sim = sim(5);
    ship_mut(&mut sim).weapons[1]
        .as_mut()
        .unwrap()
        .magazine
        .as_mut()
        .unwrap()
        .rounds = 0;

    let snap = sim.tick(&idle());
    assert!(snap.ship.weapons[1].reloading);

    for _ in 0..130 {
        sim.tick(&idle());
    }
    let ship = sim.ship().unwrap();
    let mag = ship.weapons[1].as_ref().unwrap().magazine.as_ref().unwrap();
    assert_eq!(mag.rounds, mag.capacity);
    assert_eq!(mag.reload_deadline_ms, None);
    assert_eq!(cargo_count(&ship, CargoKind::Ammo), 2);
}

#[test]
fn test_energy_depletion_latches_until_full() {
    let mut sim = sim(5);
    ship_mut(&mut sim).energy = 0.0;

    let snap = sim.tick(&idle());
    assert!(snap.ship.energy_depleted);

    let snap = sim.tick(&InputSnapshot {
        fire_primary: true,
        ..Default::default()
    });
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::ShotFired { .. })));

    // Energize runs from cargo and restores full energy, clearing the latch.
    for _ in 0..150 {
        sim.tick(&idle());
    }
    let ship = sim.ship().unwrap();
    assert!(!ship.energy_depleted);
    assert_eq!(cargo_count(&ship, CargoKind::EnergyCell), 1);
}

#[test]
fn test_shield_regen_blocked_during_shatter_cooldown() {
    let mut ship = single_shield_ship();
    {
        let pool = ship.shields[0].as_mut().unwrap();
        pool.current = 0.0;
        pool.regen_blocked_until_ms = 4000.0;
    }
    resources::regenerate_shields(&mut ship, 1000.0);
    assert_eq!(ship.shields[0].as_ref().unwrap().current, 0.0);

    let energy_before = ship.energy;
    resources::regenerate_shields(&mut ship, 4000.0);
    let regen = ship.shields[0].as_ref().unwrap().current;
    assert!((regen - 5.0 * DT).abs() < 1e-9);
    assert!((ship.energy - (energy_before - regen * 0.5)).abs() < 1e-9);
}

#[test]
fn test_shield_toggle_flips() {
    let mut sim = sim(5);
    let toggle = InputSnapshot {
        toggle_shields: true,
        ..Default::default()
    };
    assert!(!sim.tick(&toggle).ship.shields_enabled);
    assert!(sim.tick(&toggle).ship.shields_enabled);
}

#[test]
fn test_ordnance_cargo_restocks_missiles() {
    let mut sim = sim(5);
    {
        let mut ship = ship_mut(&mut sim);
        ship.ordnance.missiles = 0;
        ship.cargo.push(CargoStack {
            kind: CargoKind::Ordnance,
            quantity: 1,
        });
    }
    let snap = sim.tick(&idle());
    assert_eq!(snap.ship.missiles, ORDNANCE_MISSILES_PER_UNIT);
}

#[test]
fn test_empty_tank_drops_travel_speed() {
    let mut sim = sim(5);
    sim.queue_command(PlayerCommand::SetTravelSpeed { multiplier: 2.5 });
    sim.tick(&idle());
    assert_eq!(sim.mission().travel_speed, 2.5);

    {
        let mut ship = ship_mut(&mut sim);
        ship.fuel = 0.0;
        ship.cargo.retain(|s| s.kind != CargoKind::Fuel);
    }
    sim.tick(&idle());
    assert_eq!(sim.mission().travel_speed, TRAVEL_SPEED_MIN);
}

// ---- Mission phases ----

#[test]
fn test_travel_past_duration_enters_scavenge() {
    let mut mission = MissionState::new(1);
    mission.travel_elapsed_ms = mission.travel_duration_ms - 1.0;
    let transition = mission.advance(DT_MS).unwrap();
    assert_eq!(transition.from, MissionPhase::Travel);
    assert_eq!(transition.to, MissionPhase::Scavenge);
    assert_eq!(mission.countdown, SCAVENGE_TICKS);
}

#[test]
fn test_phase_machine_is_forward_only() {
    let mut mission = MissionState::new(2);
    let mut seen = vec![mission.phase];
    for _ in 0..20_000 {
        if let Some(t) = mission.advance(DT_MS) {
            assert!(t.to > t.from);
            seen.push(t.to);
        }
    }
    assert_eq!(
        seen,
        vec![
            MissionPhase::Travel,
            MissionPhase::Scavenge,
            MissionPhase::Gap,
            MissionPhase::Observation,
            MissionPhase::BossFight,
        ]
    );
    assert_eq!(mission.phase, MissionPhase::BossFight);
}

#[test]
fn test_next_phase_is_pure() {
    assert_eq!(next_phase(MissionPhase::Travel, 0, 10.0, 20.0), None);
    assert_eq!(
        next_phase(MissionPhase::Travel, 0, 20.0, 20.0),
        Some(MissionPhase::Scavenge)
    );
    assert_eq!(next_phase(MissionPhase::Gap, 1, 0.0, 0.0), None);
    assert_eq!(
        next_phase(MissionPhase::Gap, 0, 0.0, 0.0),
        Some(MissionPhase::Observation)
    );
    assert_eq!(next_phase(MissionPhase::BossFight, 0, 1e9, 0.0), None);
}

#[test]
fn test_travel_speed_multiplier() {
    let mut mission = MissionState::new(1);
    mission.set_travel_speed(2.0);
    mission.advance(DT_MS);
    assert!((mission.travel_elapsed_ms - 2.0 * DT_MS).abs() < 1e-9);

    mission.set_travel_speed(99.0);
    assert_eq!(mission.travel_speed, TRAVEL_SPEED_MAX);
    mission.set_travel_speed(f64::NAN);
    assert_eq!(mission.travel_speed, 1.0);
}

#[test]
fn test_travel_duration_scales_with_difficulty() {
    assert_eq!(travel_duration_ms(1), BASE_TRAVEL_MS);
    assert_eq!(travel_duration_ms(3), BASE_TRAVEL_MS * 1.5);
}

#[test]
fn test_spawn_policy_by_phase() {
    let travel = spawn_policy(MissionPhase::Travel, 2);
    assert_eq!(travel.enemy_interval, Some(120));
    assert_eq!(travel.enemy_cap, 8);
    assert_eq!(
        spawn_policy(MissionPhase::Scavenge, 2).asteroid_interval,
        Some(SCAVENGE_ASTEROID_SPAWN_TICKS)
    );
    let gap = spawn_policy(MissionPhase::Gap, 2);
    assert_eq!(gap.enemy_interval, None);
    assert_eq!(gap.asteroid_interval, None);
    assert_eq!(spawn_policy(MissionPhase::BossFight, 4).enemy_interval, None);
}

#[test]
fn test_engine_phase_change_emits_event_and_alert() {
    let mut sim = sim(9);
    let duration = sim.mission().travel_duration_ms;
    sim.mission_mut().travel_elapsed_ms = duration;

    let snap = sim.tick(&idle());
    assert_eq!(snap.phase, MissionPhase::Scavenge);
    assert_eq!(snap.phase_countdown, SCAVENGE_TICKS);
    assert!(snap.events.contains(&CombatEvent::PhaseChanged {
        from: MissionPhase::Travel,
        to: MissionPhase::Scavenge
    }));
    assert_eq!(
        snap.alert.map(|a| a.message),
        Some(MissionPhase::Scavenge.banner().to_string())
    );
}

#[test]
fn test_star_system_hook_called_once() {
    let recorder = Recorder::default();
    let mut sim = sim(9).with_hooks(recorder.clone());
    sim.mission_mut().phase = MissionPhase::Gap;
    sim.mission_mut().countdown = 1;

    sim.tick(&idle());
    assert_eq!(sim.phase(), MissionPhase::Observation);
    for _ in 0..10 {
        sim.tick(&idle());
    }
    assert_eq!(recorder.0.borrow().star_seeds.len(), 1);
}

#[test]
fn test_boss_victory_once_and_no_respawn() {
    let recorder = Recorder::default();
    let mut sim = sim(9).with_hooks(recorder.clone());
    sim.mission_mut().phase = MissionPhase::Observation;
    sim.mission_mut().countdown = 1;

    sim.tick(&idle());
    assert_eq!(sim.phase(), MissionPhase::BossFight);
    let boss = registry::boss(sim.world()).expect("boss spawned");
    let boss_pos = *sim.world().get::<&Position>(boss).unwrap();

    spawn_projectile(
        sim.world_mut(),
        player_bolt(boss_pos, 1.0e6, DamageType::Explosive),
    );
    let snap = sim.tick(&idle());

    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::BossDefeated { .. })));
    assert!(sim.mission().boss_defeated);
    assert_eq!(sim.run_state(), RunState::Ended);
    let outcome = snap.outcome.expect("outcome on the final tick");
    assert_eq!(outcome.kind, OutcomeKind::Victory);
    assert!(outcome.success);
    assert!(outcome.final_score >= 5000);

    for _ in 0..30 {
        let snap = sim.tick(&idle());
        assert!(snap.outcome.is_some());
        assert!(snap.boss.is_none());
    }
    assert!(registry::boss(sim.world()).is_none());
    assert_eq!(recorder.0.borrow().ends.len(), 1);
}

#[test]
fn test_victory_wins_over_simultaneous_hull_loss() {
    let recorder = Recorder::default();
    let mut sim = sim(9).with_hooks(recorder.clone());
    sim.mission_mut().boss_defeated = true;
    sim.mission_mut().player_destroyed = true;
    sim.tick(&idle());
    assert_eq!(recorder.0.borrow().ends[0].kind, OutcomeKind::Victory);
}

#[test]
fn test_hull_loss_ends_in_rescue() {
    let recorder = Recorder::default();
    let mut sim = sim(9).with_hooks(recorder.clone());
    let player = sim.player_entity();
    {
        let mut ship = ship_mut(&mut sim);
        ship.shields_enabled = false;
        ship.hull = 1.0;
    }
    let at = *sim.world().get::<&Position>(player).unwrap();
    let mut bolt = player_bolt(at, 10.0, DamageType::Kinetic);
    bolt.projectile.owner = ProjectileOwner::Enemy;
    spawn_projectile(sim.world_mut(), bolt);

    let snap = sim.tick(&idle());
    assert!(snap.events.contains(&CombatEvent::PlayerDestroyed));
    let outcome = snap.outcome.unwrap();
    assert_eq!(outcome.kind, OutcomeKind::Rescue);
    assert!(!outcome.success);
    assert_eq!(outcome.resources.hull, 0.0);
    assert_eq!(recorder.0.borrow().ends.len(), 1);
}

// ---- Pause / abort ----

#[test]
fn test_pause_freezes_simulation() {
    let mut sim = sim(4);
    for _ in 0..10 {
        sim.tick(&idle());
    }
    let time_before = sim.time();
    let ship_before = sim.ship();

    sim.queue_command(PlayerCommand::Pause);
    let snap = sim.tick(&idle());
    assert_eq!(snap.run_state, RunState::Paused);
    for _ in 0..5 {
        let snap = sim.tick(&InputSnapshot {
            thrust_x: 1.0,
            fire_primary: true,
            ..Default::default()
        });
        assert!(snap.events.is_empty());
    }
    assert_eq!(sim.time(), time_before);
    assert_eq!(sim.ship(), ship_before);
    assert_eq!(sim.clock().paused_frames(), 5);
    assert_eq!(sim.clock().frame(), 16);

    sim.queue_command(PlayerCommand::Resume);
    let snap = sim.tick(&idle());
    assert_eq!(snap.run_state, RunState::Active);
    assert_eq!(sim.time().tick, time_before.tick + 1);
}

#[test]
fn test_abort_ends_mission_once() {
    let recorder = Recorder::default();
    let mut sim = sim(4).with_hooks(recorder.clone());
    sim.tick(&idle());

    sim.queue_command(PlayerCommand::Abort);
    let snap = sim.tick(&idle());
    let outcome = snap.outcome.unwrap();
    assert_eq!(outcome.kind, OutcomeKind::Aborted);
    assert!(outcome.aborted);
    assert_eq!(outcome.resources.missiles, 6);

    let time = sim.time();
    sim.queue_command(PlayerCommand::Abort);
    for _ in 0..5 {
        sim.tick(&idle());
    }
    assert_eq!(sim.time(), time);
    assert_eq!(recorder.0.borrow().ends.len(), 1);
}

#[test]
fn test_abort_while_paused() {
    let mut sim = sim(4);
    sim.queue_command(PlayerCommand::Pause);
    sim.tick(&idle());
    sim.queue_command(PlayerCommand::Abort);
    let snap = sim.tick(&idle());
    assert_eq!(snap.run_state, RunState::Ended);
    assert!(!sim.clock().is_paused());
}

// ---- Clock ----

#[test]
fn test_clock_only_advances_when_running() {
    let mut clock = SimulationClock::new();
    clock.begin_frame();
    clock.advance();
    assert_eq!(clock.time().tick, 1);

    assert!(clock.pause());
    assert!(!clock.pause());
    clock.begin_frame();
    clock.advance();
    assert_eq!(clock.time().tick, 1);
    assert_eq!(clock.paused_frames(), 1);
    assert_eq!(clock.paused_since_frame(), Some(1));

    assert!(clock.resume());
    clock.advance();
    assert_eq!(clock.time().tick, 2);
    assert!((clock.now_ms() - 2.0 * DT_MS).abs() < 1e-9);
}

// ---- Alerts ----

#[test]
fn test_alert_severity_ordering() {
    let mut alerts = AlertChannel::default();
    alerts.warning("FUEL LOW", 0);
    alerts.info("CLEAR SPACE AHEAD", 1);
    assert_eq!(alerts.current(1).unwrap().message, "FUEL LOW");

    alerts.error("HULL CRITICAL", 2);
    assert_eq!(alerts.current(2).unwrap().severity, AlertSeverity::Error);

    // Expired alerts give way to anything.
    let later = 2 + ALERT_DURATION_TICKS;
    assert!(alerts.current(later).is_none());
    alerts.info("STAR SYSTEM IN SIGHT", later);
    assert_eq!(alerts.current(later).unwrap().message, "STAR SYSTEM IN SIGHT");
}

// ---- Spawning and cleanup ----

#[test]
fn test_travel_spawns_enemies_on_interval_up_to_cap() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut mission = MissionState::new(1);

    for _ in 0..ENEMY_SPAWN_BASE_TICKS {
        spawner::run(&mut world, &catalog, &mut rng, &mut mission, 1);
    }
    assert_eq!(registry::enemy_count(&world), 1);
    assert_eq!(registry::population(&world).asteroids, 1);

    let scout = catalog.enemy("scout").unwrap();
    for i in 0..10 {
        spawn_enemy_at(&mut world, scout, Position::new(i as f64 * 50.0, 100.0, 0.0), 1.0);
    }
    for _ in 0..ENEMY_SPAWN_BASE_TICKS {
        spawner::run(&mut world, &catalog, &mut rng, &mut mission, 1);
    }
    assert_eq!(registry::enemy_count(&world), 11);
}

#[test]
fn test_no_spawns_after_mission_end() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut mission = MissionState::new(1);
    mission.aborted = true;
    for _ in 0..1000 {
        spawner::run(&mut world, &catalog, &mut rng, &mut mission, 1);
    }
    assert_eq!(world.len(), 0);
}

#[test]
fn test_boss_spawns_once_scaled() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut mission = MissionState::new(3);

    let id = spawner::spawn_phase_boss(&mut world, &catalog, &mut rng, &mut mission, 3).unwrap();
    assert!(spawner::spawn_phase_boss(&mut world, &catalog, &mut rng, &mut mission, 3).is_none());
    assert_eq!(registry::population(&world).bosses, 1);

    let boss = registry::boss(&world).unwrap();
    let def = catalog.enemy(&id).unwrap();
    assert_eq!(world.get::<&Health>(boss).unwrap().max_hp, def.hp * 2.0);
}

#[test]
fn test_cleanup_culls_expired_and_offscreen() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut buffer = Vec::new();
    let mut spec = player_bolt(Position::new(100.0, 100.0, 0.0), 1.0, DamageType::Kinetic);
    spec.projectile.life_ticks = 0;
    let expired = spawn_projectile(&mut world, spec);
    let live = spawn_projectile(
        &mut world,
        player_bolt(Position::new(100.0, 100.0, 0.0), 1.0, DamageType::Kinetic),
    );
    let gone = spawn_enemy_at(
        &mut world,
        catalog.enemy("scout").unwrap(),
        Position::new(100.0, FIELD_HEIGHT + FIELD_MARGIN + 1.0, 0.0),
        1.0,
    );
    let boss = spawn_boss(&mut world, catalog.enemy("warden").unwrap(), 1);
    world.get::<&mut Position>(boss).unwrap().y = -FIELD_MARGIN * 3.0;

    cleanup::run(&mut world, &mut buffer);

    assert!(!world.contains(expired));
    assert!(world.contains(live));
    assert!(!world.contains(gone));
    assert!(world.contains(boss));
}

#[test]
fn test_oversized_ship_is_pinned_instead_of_panicking() {
    let mut catalog = Catalog::default();
    for ship in &mut catalog.ships {
        ship.radius = FIELD_HEIGHT / 2.0 + 50.0;
    }
    let mut sim = Simulation::new(SimConfig::default(), catalog, &Loadout::default());

    let snapshot = sim.tick(&InputSnapshot {
        thrust_x: 1.0,
        ..idle()
    });

    assert_eq!(snapshot.ship.position.y, FIELD_HEIGHT / 2.0);
    assert!(snapshot.ship.position.x <= FIELD_WIDTH - (FIELD_HEIGHT / 2.0 + 50.0));
}

// ---- Enemy AI system ----

#[test]
fn test_boss_fires_pattern() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    spawn_player_ship(&mut world, &catalog, &Loadout::default());
    spawn_boss(&mut world, catalog.enemy("dreadnought").unwrap(), 1);

    enemy_ai::run(&mut world, &catalog, &mut rng, 1, 0.0);
    assert_eq!(registry::population(&world).enemy_projectiles, 5);

    // Fire rate 1.2/s: nothing new a tick later.
    enemy_ai::run(&mut world, &catalog, &mut rng, 1, DT_MS);
    assert_eq!(registry::population(&world).enemy_projectiles, 5);
}

#[test]
fn test_fighter_fires_only_when_aligned() {
    let catalog = Catalog::default();
    let fighter = catalog.enemy("fighter").unwrap();
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    spawn_player_ship(&mut world, &catalog, &Loadout::default());
    spawn_enemy_at(&mut world, fighter, Position::new(PLAYER_START_X + 300.0, 100.0, 0.0), 1.0);

    enemy_ai::run(&mut world, &catalog, &mut rng, 1, 0.0);
    assert_eq!(registry::population(&world).enemy_projectiles, 0);

    spawn_enemy_at(&mut world, fighter, Position::new(PLAYER_START_X, 100.0, 0.0), 1.0);
    enemy_ai::run(&mut world, &catalog, &mut rng, 1, DT_MS);
    assert_eq!(registry::population(&world).enemy_projectiles, 1);
}

#[test]
fn test_enemy_shield_regen_needs_difficulty() {
    let catalog = Catalog::default();
    let mut world = World::new();
    let fighter = spawn_enemy_at(
        &mut world,
        catalog.enemy("fighter").unwrap(),
        Position::new(400.0, 100.0, 0.0),
        1.0,
    );
    world.get::<&mut EnemyShield>(fighter).unwrap().current = 5.0;

    enemy_ai::regenerate_shields(&mut world, 1, 10_000.0);
    assert_eq!(world.get::<&EnemyShield>(fighter).unwrap().current, 5.0);

    world.get::<&mut EnemyState>(fighter).unwrap().last_damaged_ms = Some(9_000.0);
    enemy_ai::regenerate_shields(&mut world, 2, 10_000.0);
    assert_eq!(world.get::<&EnemyShield>(fighter).unwrap().current, 5.0);

    enemy_ai::regenerate_shields(&mut world, 2, 13_000.0);
    assert!(world.get::<&EnemyShield>(fighter).unwrap().current > 5.0);
}

// ---- Snapshot ----

#[test]
fn test_contacts_sorted_for_rendering() {
    let mut sim = sim(6);
    for _ in 0..400 {
        sim.tick(&InputSnapshot {
            fire_primary: true,
            ..Default::default()
        });
    }
    let snap = sim.tick(&idle());
    assert!(!snap.contacts.is_empty());
    for pair in snap.contacts.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.kind < b.kind || (a.kind == b.kind && a.position.x <= b.position.x));
    }
}

#[test]
fn test_snapshot_reports_loadout() {
    let mut sim = sim(6);
    let snap = sim.tick(&idle());
    assert_eq!(snap.ship.weapons.len(), 3);
    assert_eq!(snap.ship.weapons[0].rounds, None);
    assert_eq!(snap.ship.weapons[1].rounds, Some(40));
    assert_eq!(snap.ship.shields.len(), 2);
    assert_eq!(snap.run_state, RunState::Active);
    assert_eq!(snap.phase, MissionPhase::Travel);
}

// ---- Invariants ----

fn input_strategy() -> impl Strategy<Value = InputSnapshot> {
    (-1.5f64..1.5, -1.5f64..1.5, any::<u16>(), prop::option::of(0.0f64..3000.0)).prop_map(
        |(thrust_x, thrust_y, bits, mega)| InputSnapshot {
            thrust_x,
            thrust_y,
            fire_primary: bits & 1 != 0,
            fire_secondary: bits & 2 != 0,
            fire_tertiary: bits & 4 != 0,
            burst: bits & 8 != 0,
            fire_missile: bits & 16 != 0,
            drop_mine: bits & 32 != 0,
            mega_shot_release: if bits & 64 != 0 { mega } else { None },
            toggle_shields: bits & 0x0f00 == 0x0f00,
            manual: starwake_core::commands::ManualActions {
                refuel: bits & 128 != 0,
                reload: bits & 256 != 0,
                repair: bits & 512 != 0,
                energize: bits & 1024 != 0,
                rehydrate: bits & 2048 != 0,
            },
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn resources_stay_clamped(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let mut sim = sim(seed);
        for input in &inputs {
            let snap = sim.tick(input);
            let ship = &snap.ship;
            prop_assert!((0.0..=HULL_MAX).contains(&ship.hull));
            prop_assert!((0.0..=ship.max_energy).contains(&ship.energy));
            prop_assert!((0.0..=CAPACITOR_MAX).contains(&ship.capacitor));
            prop_assert!((0.0..=ship.max_fuel).contains(&ship.fuel));
            for pool in &ship.shields {
                prop_assert!(pool.current >= 0.0 && pool.current <= pool.capacity);
            }
        }
    }
}
