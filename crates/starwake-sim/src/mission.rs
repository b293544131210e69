//! Mission phase machine and per-phase spawn policy.
//!
//! Phases run `Travel → Scavenge → Gap → Observation → BossFight`, each
//! entered exactly once. Transitions out of the first four phases are a pure
//! function of (phase, countdown, travel elapsed, travel duration); the boss
//! fight only ends through a terminal flag.

use starwake_core::constants::*;
use starwake_core::enums::MissionPhase;

/// Spawn rates for one (phase, difficulty) pair. Intervals are in ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub enemy_interval: Option<u64>,
    pub enemy_cap: usize,
    pub asteroid_interval: Option<u64>,
}

/// Spawn policy for a phase at a difficulty.
pub fn spawn_policy(phase: MissionPhase, difficulty: u32) -> SpawnPolicy {
    let difficulty = difficulty.max(DIFFICULTY_MIN);
    match phase {
        MissionPhase::Travel => SpawnPolicy {
            enemy_interval: Some((ENEMY_SPAWN_BASE_TICKS / difficulty as u64).max(ENEMY_SPAWN_MIN_TICKS)),
            enemy_cap: ENEMY_CAP_BASE + ENEMY_CAP_PER_DIFFICULTY * difficulty as usize,
            asteroid_interval: Some(ASTEROID_SPAWN_TICKS),
        },
        MissionPhase::Scavenge => SpawnPolicy {
            enemy_interval: None,
            enemy_cap: 0,
            asteroid_interval: Some(SCAVENGE_ASTEROID_SPAWN_TICKS),
        },
        MissionPhase::Gap | MissionPhase::Observation => SpawnPolicy {
            enemy_interval: None,
            enemy_cap: 0,
            asteroid_interval: None,
        },
        MissionPhase::BossFight => SpawnPolicy {
            enemy_interval: None,
            enemy_cap: 0,
            asteroid_interval: Some(ASTEROID_SPAWN_TICKS),
        },
    }
}

/// Travel duration at a difficulty (ms).
pub fn travel_duration_ms(difficulty: u32) -> f64 {
    let step = difficulty.max(DIFFICULTY_MIN) - DIFFICULTY_MIN;
    BASE_TRAVEL_MS * (1.0 + TRAVEL_DIFFICULTY_STEP * step as f64)
}

/// The phase to enter next, if the current one is finished.
pub fn next_phase(
    phase: MissionPhase,
    countdown: u64,
    travel_elapsed_ms: f64,
    travel_duration_ms: f64,
) -> Option<MissionPhase> {
    match phase {
        MissionPhase::Travel if travel_elapsed_ms >= travel_duration_ms => phase.next(),
        MissionPhase::Scavenge | MissionPhase::Gap | MissionPhase::Observation
            if countdown == 0 =>
        {
            phase.next()
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: MissionPhase,
    pub to: MissionPhase,
}

/// Mission progress and terminal flags.
#[derive(Debug, Clone)]
pub struct MissionState {
    pub phase: MissionPhase,
    /// Ticks left in a countdown phase.
    pub countdown: u64,
    pub travel_elapsed_ms: f64,
    pub travel_duration_ms: f64,
    /// Player-controlled travel speed multiplier.
    pub travel_speed: f64,
    pub score: u64,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
    pub player_destroyed: bool,
    pub aborted: bool,
    pub star_system_created: bool,
    pub enemy_spawn_ticks: u64,
    pub asteroid_spawn_ticks: u64,
}

impl MissionState {
    pub fn new(difficulty: u32) -> Self {
        Self {
            phase: MissionPhase::Travel,
            countdown: MissionPhase::Travel.initial_countdown(),
            travel_elapsed_ms: 0.0,
            travel_duration_ms: travel_duration_ms(difficulty),
            travel_speed: 1.0,
            score: 0,
            boss_spawned: false,
            boss_defeated: false,
            player_destroyed: false,
            aborted: false,
            star_system_created: false,
            enemy_spawn_ticks: 0,
            asteroid_spawn_ticks: 0,
        }
    }

    /// Whether the mission has reached an end condition.
    pub fn is_terminal(&self) -> bool {
        self.boss_defeated || self.player_destroyed || self.aborted
    }

    /// Travel progress (0.0 - 1.0).
    pub fn travel_progress(&self) -> f64 {
        if self.travel_duration_ms <= 0.0 {
            return 1.0;
        }
        (self.travel_elapsed_ms / self.travel_duration_ms).clamp(0.0, 1.0)
    }

    pub fn set_travel_speed(&mut self, multiplier: f64) {
        self.travel_speed = if multiplier.is_finite() {
            multiplier.clamp(TRAVEL_SPEED_MIN, TRAVEL_SPEED_MAX)
        } else {
            1.0
        };
    }

    /// Advance one tick. Returns the transition taken, if any.
    pub fn advance(&mut self, dt_ms: f64) -> Option<PhaseTransition> {
        if self.is_terminal() {
            return None;
        }
        match self.phase {
            MissionPhase::Travel => self.travel_elapsed_ms += dt_ms * self.travel_speed,
            MissionPhase::BossFight => {}
            _ => self.countdown = self.countdown.saturating_sub(1),
        }

        let to = next_phase(
            self.phase,
            self.countdown,
            self.travel_elapsed_ms,
            self.travel_duration_ms,
        )?;
        let from = self.phase;
        self.phase = to;
        self.countdown = to.initial_countdown();
        self.enemy_spawn_ticks = 0;
        self.asteroid_spawn_ticks = 0;
        Some(PhaseTransition { from, to })
    }

    /// Record the boss kill. True only the first time.
    pub fn record_boss_defeat(&mut self) -> bool {
        if self.boss_defeated {
            return false;
        }
        self.boss_defeated = true;
        true
    }
}
