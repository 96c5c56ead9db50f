//! Force integration for the player and smoothed follow for the camera

use glam::Vec2;

use super::state::{Entity, SimState};
use crate::settings::SimConfig;

/// Clamp `v` to `[-|cap|, |cap|]`, keeping its sign.
///
/// Older builds derived the sign as `(v + 1) / |v + 1|`, which divides by zero
/// at `v == -1` and flips the sign of anything in `(-1, 0)`. This is the plain
/// clamp that expression was meant to be.
#[inline]
pub fn cap_component(v: f32, cap: f32) -> f32 {
    let cap = cap.abs();
    let magnitude = v.abs().min(cap);
    if v < 0.0 { -magnitude } else { magnitude }
}

/// Integrate one force-driven body over `dt` seconds
pub fn integrate(entity: &mut Entity, dt: f32, cap_vertical: bool) {
    let acceleration = entity.total_force() / entity.mass;
    entity.velocity += acceleration * dt;

    entity.velocity.x = cap_component(entity.velocity.x, entity.velocity_cap.x);
    if cap_vertical {
        entity.velocity.y = cap_component(entity.velocity.y, entity.velocity_cap.y);
    }

    entity.position += entity.velocity * dt;
}

/// Pull the camera a fixed fraction of the way toward `target`.
///
/// The fraction is applied per call, not per second, so the approach rate
/// depends on frame rate.
pub fn follow(camera: &mut Entity, target: Vec2, smoothing: f32) {
    camera.position += (target - camera.position) * smoothing;
}

/// Advance player and camera by `dt` seconds and drain all active forces
pub fn update_kinematics(state: &mut SimState, config: &SimConfig, dt: f32) {
    assert!(dt.is_finite() && dt > 0.0, "kinematics step needs dt > 0, got {dt}");
    assert!(state.player.body.mass > 0.0, "player mass must be positive");

    integrate(&mut state.player.body, dt, config.cap_vertical_velocity);

    let target = state.player.body.position + Vec2::from(config.camera_offset);
    follow(&mut state.camera, target, config.camera_smoothing);

    assert!(
        state.player.body.position.is_finite() && state.camera.position.is_finite(),
        "non-finite position after integration"
    );

    state.player.body.active_forces.clear();
    state.camera.active_forces.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn setup() -> (SimConfig, SimState) {
        let config = SimConfig::default();
        let state = SimState::new(&config);
        (config, state)
    }

    #[test]
    fn test_cap_component() {
        assert_eq!(cap_component(15.0, 12.0), 12.0);
        assert_eq!(cap_component(-15.0, 12.0), -12.0);
        assert_eq!(cap_component(5.0, 12.0), 5.0);
        assert_eq!(cap_component(-0.5, 12.0), -0.5);
        assert_eq!(cap_component(-1.0, 12.0), -1.0);
        assert_eq!(cap_component(0.0, 12.0), 0.0);
        assert_eq!(cap_component(20.0, -12.0), 12.0);
    }

    #[test]
    fn test_no_singularity_at_minus_one() {
        let (config, mut state) = setup();
        state.player.body.velocity = Vec2::new(-1.0, 0.0);
        update_kinematics(&mut state, &config, 1.0 / 60.0);
        assert!(state.player.body.velocity.x.is_finite());
        assert_eq!(state.player.body.velocity.x, -1.0);
    }

    #[test]
    fn test_forces_drained_after_update() {
        let (config, mut state) = setup();
        state.player.body.push_force(Vec2::new(80.0, 0.0));
        state.player.body.push_force(Vec2::new(0.0, -5.0));
        state.camera.push_force(Vec2::new(1.0, 1.0));

        update_kinematics(&mut state, &config, 0.016);

        assert!(state.player.body.active_forces.is_empty());
        assert!(state.camera.active_forces.is_empty());
    }

    #[test]
    fn test_acceleration_is_force_over_mass() {
        let (config, mut state) = setup();
        let start = state.player.body.position;
        state.player.body.push_force(Vec2::new(20.0, -30.0));

        update_kinematics(&mut state, &config, 0.5);

        // a = (2, -3); v = a * 0.5; p += v * 0.5
        assert!((state.player.body.velocity - Vec2::new(1.0, -1.5)).length() < 1e-6);
        let moved = state.player.body.position - start;
        assert!((moved - Vec2::new(0.5, -0.75)).length() < 1e-6);
    }

    #[test]
    fn test_vertical_cap_is_optional() {
        let (mut config, mut state) = setup();
        state.player.body.velocity = Vec2::new(0.0, -100.0);
        update_kinematics(&mut state, &config, 0.01);
        assert_eq!(state.player.body.velocity.y, -100.0);

        config.cap_vertical_velocity = true;
        update_kinematics(&mut state, &config, 0.01);
        assert_eq!(state.player.body.velocity.y, -20.0);
    }

    #[test]
    fn test_camera_ignores_forces() {
        let (config, mut state) = setup();
        let target = state.player.body.position + Vec2::new(10.0, 0.0);
        let expected = state.camera.position + (target - state.camera.position) * 0.1;
        state.camera.push_force(Vec2::new(1000.0, 1000.0));

        update_kinematics(&mut state, &config, 0.016);

        // Player moved 0 (no forces), so the target is unchanged
        assert!((state.camera.position - expected).length() < 1e-5);
        assert_eq!(state.camera.velocity, Vec2::ZERO);
    }

    #[test]
    #[should_panic(expected = "dt > 0")]
    fn test_zero_dt_fails_fast() {
        let (config, mut state) = setup();
        update_kinematics(&mut state, &config, 0.0);
    }

    proptest! {
        #[test]
        fn velocity_x_never_exceeds_cap(
            vx in -1000.0f32..1000.0,
            fx in -1.0e5f32..1.0e5,
            dt in 0.0001f32..0.5,
        ) {
            let (config, mut state) = setup();
            state.player.body.velocity.x = vx;
            state.player.body.push_force(Vec2::new(fx, 0.0));
            update_kinematics(&mut state, &config, dt);
            prop_assert!(state.player.body.velocity.x.abs() <= 12.0);
        }

        #[test]
        fn camera_gap_shrinks_by_constant_factor(
            dt in 0.0001f32..1.0,
            steps in 1usize..30,
        ) {
            let (config, mut state) = setup();
            let target = state.player.body.position + Vec2::new(10.0, 0.0);
            let initial_gap = target - state.camera.position;

            for _ in 0..steps {
                update_kinematics(&mut state, &config, dt);
            }

            // No forces: player is still, so gap = initial * 0.9^steps regardless of dt
            let expected = initial_gap * 0.9f32.powi(steps as i32);
            let gap = target - state.camera.position;
            prop_assert!((gap - expected).length() < 1e-3);
        }
    }
}
