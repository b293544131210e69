//! Enemy fire decisions and boss attack patterns.

use glam::DVec2;

use starwake_core::constants::*;

/// Whether a non-boss enemy should shoot this tick.
///
/// Enemies only shoot from in front of the ship (above it on screen), when
/// roughly aligned and in the same plane.
pub fn enemy_fire_ready(
    interval_ms: f64,
    now_ms: f64,
    last_fired_ms: Option<f64>,
    enemy: DVec2,
    player: DVec2,
    same_plane: bool,
) -> bool {
    let cooled = last_fired_ms.map_or(true, |t| now_ms - t >= interval_ms);
    cooled && same_plane && enemy.y < player.y && (enemy.x - player.x).abs() < ENEMY_FIRE_ALIGN
}

/// Whether a boss weapon with the given rate is ready.
pub fn boss_fire_ready(fire_rate: f64, now_ms: f64, last_fired_ms: Option<f64>) -> bool {
    if fire_rate <= 0.0 {
        return false;
    }
    last_fired_ms.map_or(true, |t| now_ms - t >= 1000.0 / fire_rate)
}

/// Unit directions for a fan of `count` shots centered on `aim`.
pub fn pattern_directions(aim: DVec2, count: u32, spread: f64) -> Vec<DVec2> {
    let aim = aim.normalize_or_zero();
    if aim == DVec2::ZERO || count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![aim];
    }
    let step = spread / (count - 1) as f64;
    let start = -spread / 2.0;
    (0..count)
        .map(|i| DVec2::from_angle(start + step * i as f64).rotate(aim))
        .collect()
}
