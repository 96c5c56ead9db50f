//! Simulation tuning and viewport configuration
//!
//! Every field defaults to the reference feel; a JSON file can override any subset.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration rejected at load or setup time
#[derive(Debug)]
pub enum ConfigError {
    /// JSON could not be parsed
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: String },
    /// Cave sample count disagrees with the rendering surface's texel count
    TexelCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
            ConfigError::TexelCountMismatch { expected, actual } => write!(
                f,
                "cave texel count mismatch: surface expects {expected}, config produces {actual}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Viewport ===
    /// Canvas width in CSS pixels
    pub canvas_width: f32,
    /// Canvas height in CSS pixels
    pub canvas_height: f32,
    /// Device pixel ratio of the rendering surface
    pub device_pixel_ratio: f32,

    // === Player ===
    pub player_mass: f32,
    /// Per-axis speed limit (m/s); only X is enforced unless `cap_vertical_velocity`
    pub player_velocity_cap: [f32; 2],
    /// Apply the Y component of `player_velocity_cap` too
    pub cap_vertical_velocity: bool,
    /// Constant forward push (N)
    pub thrust_force: f32,
    /// Upward push while Up is held, before the intro ramp (N)
    pub lift_force: f32,
    /// Gravity is scaled by this on top of the physical value
    pub gravity_multiplier: f32,
    /// Seconds for forces to ramp in from zero
    pub intro_ramp_secs: f32,

    // === Camera ===
    pub camera_mass: f32,
    pub camera_velocity_cap: [f32; 2],
    /// Camera target relative to the player (m)
    pub camera_offset: [f32; 2],
    /// Fraction of the remaining distance covered per frame (not dt-scaled)
    pub camera_smoothing: f32,

    // === Cave / worm ===
    pub history_length: usize,
    pub cave_sample_dist: f32,
    pub worm_block_spacing: f32,
    /// Seed for the procedural cave profile
    pub cave_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            device_pixel_ratio: 1.0,

            player_mass: 10.0,
            player_velocity_cap: [12.0, 20.0],
            cap_vertical_velocity: false,
            thrust_force: 80.0,
            lift_force: 500.0,
            gravity_multiplier: 2.0,
            intro_ramp_secs: 3.0,

            camera_mass: 2.0,
            camera_velocity_cap: [20.0, 60.0],
            camera_offset: [10.0, 0.0],
            camera_smoothing: 0.1,

            history_length: Y_HISTORY_LENGTH,
            cave_sample_dist: CAVE_SAMPLE_DIST,
            worm_block_spacing: WORM_BLOCK_SPACING,
            cave_seed: 0x5eed,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid {
            field: "path",
            reason: format!("{}: {e}", path.display()),
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("device_pixel_ratio", self.device_pixel_ratio)?;
        positive("player_mass", self.player_mass)?;
        positive("camera_mass", self.camera_mass)?;
        positive("cave_sample_dist", self.cave_sample_dist)?;
        positive("intro_ramp_secs", self.intro_ramp_secs)?;
        if self.history_length == 0 {
            return Err(invalid("history_length", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.camera_smoothing) {
            return Err(invalid("camera_smoothing", "must be within [0, 1]"));
        }
        let texels = self.cave_texels_exact();
        if (texels - texels.round()).abs() > 1e-3 {
            return Err(invalid(
                "cave_sample_dist",
                format!("canvas width {} does not divide into whole texels ({texels})", self.canvas_width),
            ));
        }
        Ok(())
    }

    /// Number of cave height texels the shader samples across the canvas
    pub fn cave_texel_count(&self) -> usize {
        self.cave_texels_exact().round() as usize
    }

    /// Distance between cave samples in CSS pixels; one sample per
    /// `cave_sample_dist` device pixels
    pub fn cave_sample_spacing(&self) -> f32 {
        self.cave_sample_dist / self.device_pixel_ratio
    }

    fn cave_texels_exact(&self) -> f32 {
        self.canvas_width / self.cave_sample_spacing()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and > 0, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cave_texel_count(), 100);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SimConfig::from_json(r#"{ "canvas_width": 1600, "cap_vertical_velocity": true }"#)
            .expect("valid config");
        assert_eq!(config.canvas_width, 1600.0);
        assert!(config.cap_vertical_velocity);
        assert_eq!(config.player_mass, 10.0);
        assert_eq!(config.cave_texel_count(), 200);
    }

    #[test]
    fn test_device_pixel_ratio_scales_texels() {
        let config = SimConfig {
            device_pixel_ratio: 2.0,
            ..Default::default()
        };
        assert_eq!(config.cave_texel_count(), 200);
        assert_eq!(config.cave_sample_spacing(), 4.0);
        // Samples still cover exactly the visible width
        let span = config.cave_texel_count() as f32 * config.cave_sample_spacing();
        assert_eq!(span, config.canvas_width);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SimConfig::from_json(r#"{ "player_mass": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "player_mass", .. }));

        let err = SimConfig::from_json(r#"{ "canvas_width": 801 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "cave_sample_dist", .. }));

        let err = SimConfig::from_json(r#"{ "camera_smoothing": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera_smoothing", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SimConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse config"));
    }
}
