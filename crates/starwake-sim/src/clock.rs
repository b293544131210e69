//! Pausable simulation clock.
//!
//! Simulation time only advances on running ticks. Every deadline in the
//! engine (reloads, operations, cooldowns) is measured against it.

use starwake_core::types::SimTime;

#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    time: SimTime,
    /// Display frames seen, paused or not.
    frame: u64,
    paused: bool,
    paused_since_frame: Option<u64>,
    paused_frames: u64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current simulation time (ms).
    pub fn now_ms(&self) -> f64 {
        self.time.elapsed_ms
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frames spent paused over the whole mission.
    pub fn paused_frames(&self) -> u64 {
        self.paused_frames
    }

    pub fn paused_since_frame(&self) -> Option<u64> {
        self.paused_since_frame
    }

    /// Count a display frame. Called once per `tick()` regardless of state.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        if self.paused {
            self.paused_frames += 1;
        }
    }

    /// Advance simulation time by one fixed step.
    pub fn advance(&mut self) {
        if !self.paused {
            self.time.advance();
        }
    }

    /// Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        self.paused_since_frame = Some(self.frame);
        true
    }

    /// Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.paused_since_frame = None;
        true
    }
}
