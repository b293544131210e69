//! Phase-driven spawning of enemies and asteroids.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starwake_core::defs::{Catalog, EnemyDef};
use starwake_core::enums::MissionPhase;

use crate::mission::{spawn_policy, MissionState};
use crate::registry;
use crate::world_setup::{spawn_asteroid, spawn_boss, spawn_enemy};

/// Advance spawn timers and spawn whatever the current phase policy allows.
/// Nothing spawns once the mission has ended.
pub fn run(
    world: &mut World,
    catalog: &Catalog,
    rng: &mut ChaCha8Rng,
    mission: &mut MissionState,
    difficulty: u32,
) {
    if mission.is_terminal() {
        return;
    }
    let policy = spawn_policy(mission.phase, difficulty);

    if let Some(interval) = policy.enemy_interval {
        mission.enemy_spawn_ticks += 1;
        if mission.enemy_spawn_ticks >= interval {
            mission.enemy_spawn_ticks = 0;
            if registry::enemy_count(world) < policy.enemy_cap {
                if let Some(def) = pick(rng, &catalog.regular_enemies()) {
                    spawn_enemy(world, rng, def);
                }
            }
        }
    }

    if let Some(interval) = policy.asteroid_interval {
        mission.asteroid_spawn_ticks += 1;
        if mission.asteroid_spawn_ticks >= interval {
            mission.asteroid_spawn_ticks = 0;
            spawn_asteroid(world, rng, mission.phase == MissionPhase::Scavenge);
        }
    }
}

/// Spawn the phase boss, once per mission. Returns the chosen definition id.
pub fn spawn_phase_boss(
    world: &mut World,
    catalog: &Catalog,
    rng: &mut ChaCha8Rng,
    mission: &mut MissionState,
    difficulty: u32,
) -> Option<String> {
    if mission.boss_spawned {
        return None;
    }
    let roster = catalog.boss_roster();
    let Some(def) = pick(rng, &roster) else {
        log::warn!("boss roster is empty, no boss spawned");
        return None;
    };
    spawn_boss(world, def, difficulty);
    mission.boss_spawned = true;
    log::info!("boss {} spawned at difficulty {difficulty}", def.id);
    Some(def.id.clone())
}

fn pick<'a>(rng: &mut ChaCha8Rng, defs: &[&'a EnemyDef]) -> Option<&'a EnemyDef> {
    if defs.is_empty() {
        return None;
    }
    Some(defs[rng.gen_range(0..defs.len())])
}
