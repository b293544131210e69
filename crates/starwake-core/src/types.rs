//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEPTH_BAND, DT_MS};

/// Position on the playfield (pixels).
/// x = right, y = down (screen space), z = shallow depth used only for
/// same-plane collision gating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Velocity in playfield units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking. Only advances while the mission is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each running tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Planar (x, y) component.
    pub fn planar(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Planar distance to another position, ignoring depth.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.planar().distance(other.planar())
    }

    /// Whether two positions share a collision plane.
    pub fn same_plane(&self, other: &Position) -> bool {
        (self.z - other.z).abs() < DEPTH_BAND
    }

    /// Radius overlap test gated by the depth band.
    pub fn overlaps(&self, radius: f64, other: &Position, other_radius: f64) -> bool {
        self.same_plane(other) && self.distance_to(other) <= radius + other_radius
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from a planar vector with a depth rate.
    pub fn from_planar(v: DVec2, z: f64) -> Self {
        Self { x: v.x, y: v.y, z }
    }

    pub fn planar(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Planar speed magnitude.
    pub fn speed(&self) -> f64 {
        self.planar().length()
    }
}

impl SimTime {
    /// Milliseconds per tick at the fixed tick rate.
    pub fn dt_ms(&self) -> f64 {
        DT_MS
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms += self.dt_ms();
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }
}
