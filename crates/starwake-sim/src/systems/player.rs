//! Player input: thrust and the shield switch.

use glam::DVec2;
use hecs::World;

use starwake_core::commands::InputSnapshot;
use starwake_core::components::{PlayerShip, Ship};
use starwake_core::constants::*;
use starwake_core::types::Velocity;

/// Apply thrust and toggles from this tick's input.
pub fn run(world: &mut World, input: &InputSnapshot) {
    for (_entity, (_player, vel, ship)) in
        world.query_mut::<(&PlayerShip, &mut Velocity, &mut Ship)>()
    {
        if ship.hull <= 0.0 {
            *vel = Velocity::default();
            continue;
        }

        if input.toggle_shields {
            ship.shields_enabled = !ship.shields_enabled;
        }

        let thrust = DVec2::new(input.thrust_x, input.thrust_y);
        let thrust = if thrust.is_finite() {
            thrust.clamp_length_max(1.0)
        } else {
            DVec2::ZERO
        };
        let authority = if ship.fuel > 0.0 {
            1.0
        } else {
            NO_FUEL_THRUST_FACTOR
        };
        *vel = Velocity::from_planar(thrust * PLAYER_SPEED * authority, 0.0);
        ship.fuel = (ship.fuel - THRUST_FUEL_PER_SEC * thrust.length() * DT).max(0.0);
    }
}
