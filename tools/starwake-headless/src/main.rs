//! starwake-headless: run a mission without a frontend.
//!
//! Usage:
//!   starwake-headless run --seed 7 --difficulty 2 --max-ticks 20000
//!   starwake-headless run --catalog roster.json --loadout loadout.json
//!   starwake-headless catalog > roster.json

use std::fs;
use std::path::PathBuf;
use std::process;

use starwake_core::commands::{InputSnapshot, ManualActions, PlayerCommand};
use starwake_core::defs::{Catalog, Loadout};
use starwake_core::enums::{ContactKind, RunState};
use starwake_core::state::{MissionOutcome, MissionSnapshot};
use starwake_sim::{MissionHooks, SimConfig, Simulation};

/// Hard stop when no `--max-ticks` is given: an hour of simulated time.
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 60;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "catalog" => cmd_catalog(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "starwake-headless: STARWAKE headless mission runner\n\
         \n\
         Commands:\n\
         \n\
         run       Fly a mission on autopilot and print the outcome as JSON\n\
         \n\
           --seed <N>          RNG seed (default: 42)\n\
           --difficulty <N>    Difficulty 1-4 (default: 1)\n\
           --max-ticks <N>     Abort after N ticks (default: one simulated hour)\n\
           --catalog <path>    Definitions catalog JSON (default: built-in roster)\n\
           --loadout <path>    Loadout JSON (default: built-in loadout)\n\
           --speed <X>         Travel speed multiplier (default: 1.0)\n\
         \n\
         catalog   Print the built-in definitions catalog as JSON\n"
    );
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    match flag(args, name) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid value for {name}: {raw}");
            process::exit(1);
        }),
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(PathBuf::from(path)).unwrap_or_else(|e| {
        eprintln!("Error: cannot read {path}: {e}");
        process::exit(1);
    })
}

fn load_catalog(args: &[String]) -> Catalog {
    let Some(path) = flag(args, "--catalog") else {
        return Catalog::default();
    };
    Catalog::from_json(&read_file(path)).unwrap_or_else(|e| {
        eprintln!("Error: {path}: {e}");
        process::exit(1);
    })
}

fn load_loadout(args: &[String]) -> Loadout {
    let Some(path) = flag(args, "--loadout") else {
        return Loadout::default();
    };
    serde_json::from_str(&read_file(path)).unwrap_or_else(|e| {
        eprintln!("Error: {path}: {e}");
        process::exit(1);
    })
}

/// Logs lifecycle callbacks.
struct LogHooks;

impl MissionHooks for LogHooks {
    fn on_star_system_created(&mut self, seed: u64) {
        log::info!("star system generated from seed {seed}");
    }

    fn on_mission_end(&mut self, outcome: &MissionOutcome) {
        log::info!(
            "mission ended: {:?}, final score {}",
            outcome.kind,
            outcome.final_score
        );
    }
}

fn cmd_run(args: &[String]) {
    let config = SimConfig {
        seed: parse_flag(args, "--seed", 42),
        difficulty: parse_flag(args, "--difficulty", 1),
    };
    let max_ticks: u64 = parse_flag(args, "--max-ticks", DEFAULT_MAX_TICKS);
    let speed: f64 = parse_flag(args, "--speed", 1.0);
    let catalog = load_catalog(args);
    let loadout = load_loadout(args);

    let mut sim = Simulation::new(config, catalog, &loadout).with_hooks(LogHooks);
    sim.queue_command(PlayerCommand::SetTravelSpeed { multiplier: speed });

    let mut input = InputSnapshot::default();
    let mut ticks = 0u64;
    loop {
        let snapshot = sim.tick(&input);
        ticks += 1;
        if snapshot.run_state == RunState::Ended {
            break;
        }
        if ticks >= max_ticks {
            log::warn!("tick limit {max_ticks} reached, aborting");
            sim.queue_command(PlayerCommand::Abort);
            input = InputSnapshot::default();
            continue;
        }
        input = autopilot(&snapshot);
    }

    let Some(outcome) = sim.outcome() else {
        eprintln!("Error: mission ended without an outcome");
        process::exit(1);
    };
    match serde_json::to_string_pretty(outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn cmd_catalog() {
    match Catalog::default().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Chase the nearest hostile's x, keep the guns hot, and launch missiles at
/// the boss.
fn autopilot(snapshot: &MissionSnapshot) -> InputSnapshot {
    let ship = &snapshot.ship;
    let target = snapshot
        .contacts
        .iter()
        .filter(|c| matches!(c.kind, ContactKind::Enemy | ContactKind::Boss))
        .min_by(|a, b| {
            let da = (a.position.x - ship.position.x).abs();
            let db = (b.position.x - ship.position.x).abs();
            da.total_cmp(&db)
        });

    let thrust_x = target.map_or(0.0, |t| {
        ((t.position.x - ship.position.x) / 100.0).clamp(-1.0, 1.0)
    });
    let boss_up = snapshot.boss.is_some();

    InputSnapshot {
        thrust_x,
        fire_primary: target.is_some(),
        fire_secondary: target.is_some(),
        fire_missile: boss_up && ship.missiles > 0,
        manual: ManualActions::default(),
        ..Default::default()
    }
}
