//! Simulation engine: the core of the game.
//!
//! `Simulation` owns the hecs ECS world, the pausable clock, the mission
//! state and the seeded RNG. It applies queued player commands at the tick
//! boundary, runs all systems in a fixed order and produces
//! `MissionSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use starwake_core::commands::{InputSnapshot, PlayerCommand};
use starwake_core::components::Ship;
use starwake_core::constants::{DIFFICULTY_MAX, DIFFICULTY_MIN, DT_MS};
use starwake_core::defs::{Catalog, Loadout};
use starwake_core::enums::{MissionPhase, OutcomeKind, RunState};
use starwake_core::events::CombatEvent;
use starwake_core::state::{MissionOutcome, MissionSnapshot, ResourceReturn};
use starwake_core::types::SimTime;

use crate::alerts::AlertChannel;
use crate::clock::SimulationClock;
use crate::mission::{MissionState, PhaseTransition};
use crate::ship::resource_return;
use crate::systems;
use crate::systems::combat::CombatContext;
use crate::systems::resources::ResourceContext;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Difficulty level, clamped to 1..=4.
    pub difficulty: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: 1,
        }
    }
}

/// Callbacks into the mission lifecycle owner.
pub trait MissionHooks {
    /// Called once when the star system comes into view.
    fn on_star_system_created(&mut self, _seed: u64) {}

    /// Called exactly once when the mission ends, however it ends.
    fn on_mission_end(&mut self, outcome: &MissionOutcome);
}

/// Hooks that ignore every callback.
#[derive(Debug, Default)]
pub struct NoopHooks;

impl MissionHooks for NoopHooks {
    fn on_mission_end(&mut self, _outcome: &MissionOutcome) {}
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct Simulation {
    world: World,
    catalog: Catalog,
    clock: SimulationClock,
    run_state: RunState,
    mission: MissionState,
    difficulty: u32,
    rng: ChaCha8Rng,
    player: Entity,
    hooks: Box<dyn MissionHooks>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<CombatEvent>,
    alerts: AlertChannel,
    outcome: Option<MissionOutcome>,
}

impl Simulation {
    /// Create a simulation with the player ship built from `loadout`.
    pub fn new(config: SimConfig, catalog: Catalog, loadout: &Loadout) -> Self {
        let difficulty = config.difficulty.clamp(DIFFICULTY_MIN, DIFFICULTY_MAX);
        let mut world = World::new();
        let player = world_setup::spawn_player_ship(&mut world, &catalog, loadout);
        log::info!(
            "mission start: seed {}, difficulty {difficulty}, ship {}",
            config.seed,
            loadout.ship_id
        );

        let mut alerts = AlertChannel::default();
        alerts.info(MissionPhase::Travel.banner(), 0);

        Self {
            world,
            catalog,
            clock: SimulationClock::new(),
            run_state: RunState::Active,
            mission: MissionState::new(difficulty),
            difficulty,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player,
            hooks: Box::new(NoopHooks),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            alerts,
            outcome: None,
        }
    }

    /// Replace the lifecycle hooks.
    pub fn with_hooks(mut self, hooks: impl MissionHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self, input: &InputSnapshot) -> MissionSnapshot {
        self.clock.begin_frame();
        self.process_commands();

        if self.run_state == RunState::Active {
            self.run_systems(input);
            self.clock.advance();
        }

        self.snapshot()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn phase(&self) -> MissionPhase {
        self.mission.phase
    }

    pub fn time(&self) -> SimTime {
        self.clock.time()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn outcome(&self) -> Option<&MissionOutcome> {
        self.outcome.as_ref()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player ship, if it is still in the world.
    pub fn ship(&self) -> Option<Ship> {
        self.world.get::<&Ship>(self.player).ok().map(|s| (*s).clone())
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn mission_mut(&mut self) -> &mut MissionState {
        &mut self.mission
    }

    #[cfg(test)]
    pub(crate) fn player_entity(&self) -> Entity {
        self.player
    }

    #[cfg(test)]
    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.run_state == RunState::Active && self.clock.pause() {
                    self.run_state = RunState::Paused;
                    log::info!("paused at frame {}", self.clock.frame());
                }
            }
            PlayerCommand::Resume => {
                if self.run_state == RunState::Paused && self.clock.resume() {
                    self.run_state = RunState::Active;
                    log::info!("resumed at frame {}", self.clock.frame());
                }
            }
            PlayerCommand::Abort => {
                if self.run_state != RunState::Ended {
                    self.mission.aborted = true;
                    self.finish_mission();
                }
            }
            PlayerCommand::SetTravelSpeed { multiplier } => {
                if self.run_state == RunState::Active {
                    self.mission.set_travel_speed(multiplier);
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &InputSnapshot) {
        let now_ms = self.clock.now_ms();
        let tick = self.clock.time().tick;

        systems::player::run(&mut self.world, input);
        systems::weapons::run(
            &mut self.world,
            &self.catalog,
            &mut self.rng,
            input,
            now_ms,
            tick,
            &mut self.alerts,
            &mut self.events,
        );
        systems::enemy_ai::run(
            &mut self.world,
            &self.catalog,
            &mut self.rng,
            self.difficulty,
            now_ms,
        );
        systems::movement::run(&mut self.world);

        let was_destroyed = self.mission.player_destroyed;
        systems::combat::run(
            &mut self.world,
            &mut CombatContext {
                mission: &mut self.mission,
                events: &mut self.events,
                despawn: &mut self.despawn_buffer,
                difficulty: self.difficulty,
                now_ms,
            },
        );
        if self.mission.player_destroyed && !was_destroyed {
            self.alerts.error("HULL BREACHED", tick);
        }

        systems::resources::run(
            &mut self.world,
            &input.manual,
            &mut ResourceContext {
                catalog: &self.catalog,
                mission: &mut self.mission,
                alerts: &mut self.alerts,
                events: &mut self.events,
                now_ms,
                tick,
            },
        );

        if let Some(transition) = self.mission.advance(DT_MS) {
            self.on_phase_change(transition, tick);
        }
        systems::spawner::run(
            &mut self.world,
            &self.catalog,
            &mut self.rng,
            &mut self.mission,
            self.difficulty,
        );
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        if self.mission.is_terminal() {
            self.finish_mission();
        }
    }

    fn on_phase_change(&mut self, transition: PhaseTransition, tick: u64) {
        let PhaseTransition { from, to } = transition;
        log::info!("phase {from:?} -> {to:?} at tick {tick}");
        self.events.push(CombatEvent::PhaseChanged { from, to });
        self.alerts.info(to.banner(), tick);

        match to {
            MissionPhase::Observation if !self.mission.star_system_created => {
                self.mission.star_system_created = true;
                let seed: u64 = self.rng.gen();
                self.hooks.on_star_system_created(seed);
            }
            MissionPhase::BossFight => {
                systems::spawner::spawn_phase_boss(
                    &mut self.world,
                    &self.catalog,
                    &mut self.rng,
                    &mut self.mission,
                    self.difficulty,
                );
            }
            _ => {}
        }
    }

    /// Resolve the outcome and notify the hooks. Runs at most once.
    fn finish_mission(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let kind = if self.mission.boss_defeated {
            OutcomeKind::Victory
        } else if self.mission.player_destroyed {
            OutcomeKind::Rescue
        } else {
            OutcomeKind::Aborted
        };
        let resources = self
            .world
            .get::<&Ship>(self.player)
            .map(|ship| resource_return(&ship))
            .unwrap_or_else(|_| ResourceReturn::default());

        let outcome = MissionOutcome {
            kind,
            success: kind == OutcomeKind::Victory,
            aborted: kind == OutcomeKind::Aborted,
            final_score: self.mission.score,
            resources,
        };
        log::info!("mission over: {kind:?}, score {}", outcome.final_score);

        let tick = self.clock.time().tick;
        match kind {
            OutcomeKind::Victory => self.alerts.success("MISSION COMPLETE", tick),
            OutcomeKind::Rescue => self.alerts.error("SHIP DISABLED, RESCUE INBOUND", tick),
            OutcomeKind::Aborted => self.alerts.warning("MISSION ABORTED", tick),
        }

        self.hooks.on_mission_end(&outcome);
        self.outcome = Some(outcome);
        self.clock.resume();
        self.run_state = RunState::Ended;
    }

    fn snapshot(&mut self) -> MissionSnapshot {
        let events = std::mem::take(&mut self.events);
        let time = self.clock.time();
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time,
                frame: self.clock.frame(),
                run_state: self.run_state,
                mission: &self.mission,
                now_ms: self.clock.now_ms(),
                alert: self.alerts.current(time.tick),
                outcome: self.outcome.clone(),
            },
            events,
        )
    }
}
