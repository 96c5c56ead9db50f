//! Environmental forces applied to the player each frame

use glam::Vec2;

use super::state::{InputKey, KeyStates, Player};
use crate::consts::*;
use crate::settings::SimConfig;
use crate::smoothstep;

/// Newtonian surface gravity on a body of `mass` (N)
pub fn gravity_magnitude(mass: f32) -> f32 {
    (GRAVITY_CONSTANT * EARTH_MASS) * mass / (EARTH_RADIUS * EARTH_RADIUS)
}

/// Easing factor in [0, 1] that softens forces during the first seconds
pub fn intro_ramp(sim_time: f32, ramp_secs: f32) -> f32 {
    smoothstep(0.0, ramp_secs, sim_time)
}

/// Push this frame's gravity, thrust and lift onto the player.
///
/// Forces are appended; clearing is the kinematics step's job.
pub fn assign_forces(player: &mut Player, keys: &KeyStates, sim_time: f32, config: &SimConfig) {
    let body = &mut player.body;
    let ramp = intro_ramp(sim_time, config.intro_ramp_secs);

    let gravity = gravity_magnitude(body.mass) * config.gravity_multiplier * ramp;
    body.push_force(Vec2::new(0.0, -gravity));

    body.push_force(Vec2::new(config.thrust_force, 0.0));

    if keys.is_held(InputKey::Up) {
        body.push_force(Vec2::new(0.0, config.lift_force * ramp));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SimState;

    fn setup() -> (SimConfig, SimState) {
        let config = SimConfig::default();
        let state = SimState::new(&config);
        (config, state)
    }

    #[test]
    fn test_gravity_magnitude_is_earthlike() {
        // ~9.8 m/s² on a 10 kg body
        let g = gravity_magnitude(10.0);
        assert!((g - 98.03).abs() < 0.1, "gravity was {g}");
    }

    #[test]
    fn test_intro_ramp_bounds() {
        assert_eq!(intro_ramp(0.0, 3.0), 0.0);
        assert_eq!(intro_ramp(5.0, 3.0), 1.0);
        let mid = intro_ramp(1.0, 3.0);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_forces_at_start_have_no_vertical_component() {
        let (config, mut state) = setup();
        state.keys.set(InputKey::Up, true);

        assign_forces(&mut state.player, &state.keys, 0.0, &config);

        let total = state.player.body.total_force();
        assert!(total.y.abs() < 1e-6, "vertical force was {}", total.y);
        assert_eq!(total.x, 80.0);
        assert_eq!(state.player.body.active_forces.len(), 3);
    }

    #[test]
    fn test_forces_after_ramp_are_full_strength() {
        let (config, mut state) = setup();
        let gravity = gravity_magnitude(10.0) * 2.0;

        assign_forces(&mut state.player, &state.keys, 5.0, &config);
        let total = state.player.body.total_force();
        assert!((total.y + gravity).abs() < 1e-3);
        assert_eq!(state.player.body.active_forces.len(), 2);

        state.player.body.active_forces.clear();
        state.keys.set(InputKey::Up, true);
        assign_forces(&mut state.player, &state.keys, 5.0, &config);
        let total = state.player.body.total_force();
        assert!((total.y - (500.0 - gravity)).abs() < 1e-3);
    }

    #[test]
    fn test_forces_accumulate_without_clearing() {
        let (config, mut state) = setup();
        assign_forces(&mut state.player, &state.keys, 1.0, &config);
        assign_forces(&mut state.player, &state.keys, 1.0, &config);
        assert_eq!(state.player.body.active_forces.len(), 4);
    }
}
