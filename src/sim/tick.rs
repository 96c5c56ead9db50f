//! Per-frame update pipeline
//!
//! One `Game::update` per displayed frame: forces, collision probe,
//! kinematics, cave sampling, history, clock, then uniform packing. While the
//! canvas is unfocused the whole pipeline is skipped and state stays frozen.

use glam::Vec2;

use super::cave::{CaveProfile, CaveSampler};
use super::forces::assign_forces;
use super::kinematics::update_kinematics;
use super::state::{GameEvent, InputKey, SimState};
use super::worm::{compute_segments, pack_worm_blocks};
use crate::consts::CAVE_GAP_PX;
use crate::renderer::{FrameUniforms, UniformSink};
use crate::settings::{ConfigError, SimConfig};
use crate::{to_pixels, to_pixels_v};

/// Host events delivered between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(InputKey),
    KeyUp(InputKey),
    FocusGained,
    FocusLost,
}

/// Simulation state plus the collaborators one frame needs
pub struct Game {
    state: SimState,
    config: SimConfig,
    profile: Box<dyn CaveProfile>,
    sampler: CaveSampler,
    uniforms: FrameUniforms,
}

impl Game {
    /// Build a game whose cave samples line up with `sink`'s texture
    pub fn new(
        config: SimConfig,
        profile: Box<dyn CaveProfile>,
        sink: &dyn UniformSink,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let texel_count = config.cave_texel_count();
        let expected = sink.cave_texel_count();
        if texel_count != expected {
            return Err(ConfigError::TexelCountMismatch {
                expected,
                actual: texel_count,
            });
        }

        let state = SimState::new(&config);
        let sampler = CaveSampler::new(config.canvas_width, config.cave_sample_spacing());
        debug_assert_eq!(sampler.texel_count(), texel_count);

        log::info!(
            "Game created: {}x{} canvas, {} cave texels, history length {}",
            config.canvas_width,
            config.canvas_height,
            texel_count,
            config.history_length
        );

        Ok(Self {
            state,
            config,
            profile,
            sampler,
            uniforms: FrameUniforms::new(texel_count),
        })
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Uniforms packed by the last active frame
    pub fn uniforms(&self) -> &FrameUniforms {
        &self.uniforms
    }

    pub fn is_focused(&self) -> bool {
        self.state.focused
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.state.keys.set(key, true),
            InputEvent::KeyUp(key) => self.state.keys.set(key, false),
            InputEvent::FocusGained => {
                if !self.state.focused {
                    log::info!("Focus gained, resuming at t={:.2}s", self.state.time);
                }
                self.state.focused = true;
            }
            InputEvent::FocusLost => {
                if self.state.focused {
                    log::info!("Focus lost, freezing at t={:.2}s", self.state.time);
                }
                self.state.focused = false;
            }
        }
    }

    /// Advance one frame. `timestamp_ms` is the host clock, `delta_ms` the
    /// time since the previous frame; both in milliseconds.
    pub fn update(&mut self, timestamp_ms: f64, delta_ms: f64) {
        if !self.state.focused {
            return;
        }
        assert!(timestamp_ms.is_finite(), "non-finite frame timestamp {timestamp_ms}");
        assert!(
            delta_ms.is_finite() && delta_ms > 0.0,
            "frame delta must be > 0, got {delta_ms}ms"
        );

        let dt = (delta_ms / 1000.0) as f32;
        let state = &mut self.state;

        assign_forces(&mut state.player, &state.keys, state.time, &self.config);

        if let Some(event) = probe_collision(state, self.profile.as_ref()) {
            state.events.push(event);
        }

        update_kinematics(state, &self.config, dt);

        let camera_px = to_pixels_v(state.camera.position);
        self.sampler.sample(self.profile.as_ref(), camera_px.x);

        let player_px = player_pixel_position(state);
        state.history.record_and_advance(player_px.x, player_px.y);

        advance_clock(state, timestamp_ms);

        self.map_state_to_uniforms();
    }

    /// Push the current uniforms to the rendering surface
    pub fn render(&self, sink: &mut dyn UniformSink) {
        sink.upload(&self.uniforms);
    }

    fn map_state_to_uniforms(&mut self) {
        let state = &self.state;
        let player_px = player_pixel_position(state);

        let segments = compute_segments(
            player_px,
            &state.history,
            self.config.worm_block_spacing,
            state.initial_player_y_px(),
        );
        let (worm_data, worm_data2) = pack_worm_blocks(&segments);

        let uniforms = &mut self.uniforms;
        uniforms.time = state.time;
        uniforms.player_pos = player_px;
        uniforms.camera_pos = to_pixels_v(state.camera.position);
        uniforms.worm_data = worm_data;
        uniforms.worm_data2 = worm_data2;
        uniforms.cave_heights.copy_from_slice(self.sampler.heights());
    }
}

/// Flag the player as dying on first contact with cave rock.
///
/// Rock is everything above the top surface or more than `CAVE_GAP_PX` below
/// it, the same test the background shader uses.
pub fn probe_collision(state: &mut SimState, profile: &dyn CaveProfile) -> Option<GameEvent> {
    let player = &mut state.player;
    if player.dying {
        return None;
    }

    let pos = player.body.position;
    let top_px = to_pixels(profile.height_at(pos.x));
    let y_px = to_pixels(pos.y);

    if y_px > top_px || y_px < top_px - CAVE_GAP_PX {
        player.dying = true;
        log::info!("Player crashed at ({:.2}, {:.2}) t={:.2}s", pos.x, pos.y, state.time);
        Some(GameEvent::PlayerCrashed { position: pos })
    } else {
        None
    }
}

/// Set simulated seconds from the host timestamp, never moving backwards
fn advance_clock(state: &mut SimState, timestamp_ms: f64) {
    assert!(timestamp_ms.is_finite(), "non-finite frame timestamp");
    let time = (timestamp_ms / 1000.0) as f32;
    if time < state.time {
        log::warn!("Ignoring clock rewind from {:.3}s to {:.3}s", state.time, time);
        return;
    }
    state.time = time;
}

/// Pixel-space head position
pub fn player_pixel_position(state: &SimState) -> Vec2 {
    to_pixels_v(state.player.body.position)
}
