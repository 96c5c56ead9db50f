//! Cave Worm - a side-scrolling cave flyer
//!
//! Core modules:
//! - `sim`: Frame simulation (forces, kinematics, history buffer, cave sampling, worm)
//! - `renderer`: Uniform contract with the fragment shader
//! - `settings`: Data-driven tuning, loadable from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{ConfigError, SimConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen pixels per world meter
    pub const PIXELS_PER_METER: f32 = 40.0;

    /// Slots in the player Y history ring (one per horizontal pixel, mod length)
    pub const Y_HISTORY_LENGTH: usize = 1000;
    /// Horizontal spacing between cave height samples (pixels)
    pub const CAVE_SAMPLE_DIST: f32 = 8.0;
    /// Vertical size of the open tunnel below the cave top surface (pixels)
    pub const CAVE_GAP_PX: f32 = 800.0;

    /// Trailing worm segments behind the head
    pub const WORM_SEGMENTS: usize = 6;
    /// Horizontal gap between worm segments (pixels)
    pub const WORM_BLOCK_SPACING: f32 = 80.0;
    /// Segments packed into one 16-float uniform block
    pub const WORM_SEGMENTS_PER_BLOCK: usize = 4;

    /// Newtonian gravity inputs
    pub const GRAVITY_CONSTANT: f32 = 6.673e-11;
    pub const EARTH_MASS: f32 = 5.98e24;
    pub const EARTH_RADIUS: f32 = 6.38e6;
}

/// Convert world meters to pixels
#[inline]
pub fn to_pixels(meters: f32) -> f32 {
    meters * consts::PIXELS_PER_METER
}

/// Convert pixels to world meters
#[inline]
pub fn to_meters(pixels: f32) -> f32 {
    pixels / consts::PIXELS_PER_METER
}

#[inline]
pub fn to_pixels_v(v: Vec2) -> Vec2 {
    v * consts::PIXELS_PER_METER
}

#[inline]
pub fn to_meters_v(v: Vec2) -> Vec2 {
    v / consts::PIXELS_PER_METER
}

/// Hermite smoothstep: 0 at or below `edge0`, 1 at or above `edge1`
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
