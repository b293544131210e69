//! Mine laying: proximity dwell followed by a random chance.

use starwake_core::constants::*;

/// Accumulate time spent within drop range; leaving range resets it.
pub fn update_dwell(dwell_ms: f64, distance_to_player: f64, dt_ms: f64) -> f64 {
    if distance_to_player <= MINE_DROP_RANGE {
        dwell_ms + dt_ms
    } else {
        0.0
    }
}

/// A mine drops once the dwell is satisfied and the roll succeeds.
pub fn mine_drop_due(dwell_ms: f64, roll: f64) -> bool {
    dwell_ms >= MINE_DROP_DWELL_MS && roll < MINE_DROP_CHANCE
}
