//! Cave silhouette: the height profile and its per-frame sampling
//!
//! The profile gives the cave's top surface in world space. The sampler turns
//! it into a fixed-length pixel-space height array aligned with the left edge
//! of the view, which the fragment shader reads as a 1D texture.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{to_meters, to_pixels};

/// Source of cave top-surface heights
pub trait CaveProfile {
    /// Top-surface Y (m) at world X (m); defined for every finite x
    fn height_at(&self, world_x: f32) -> f32;
}

impl<F> CaveProfile for F
where
    F: Fn(f32) -> f32,
{
    fn height_at(&self, world_x: f32) -> f32 {
        self(world_x)
    }
}

/// One sine layer of the procedural profile
#[derive(Debug, Clone, Copy)]
struct Octave {
    amplitude: f32,
    frequency: f32,
    phase: f32,
}

/// Deterministic procedural cave: a base height plus seeded sine octaves
#[derive(Debug, Clone)]
pub struct LayeredCave {
    base_height: f32,
    octaves: Vec<Octave>,
}

impl LayeredCave {
    /// Octave count for `new`
    pub const DEFAULT_OCTAVES: usize = 4;

    /// Base surface height (m); sits a few meters above a default player
    pub const DEFAULT_BASE_HEIGHT: f32 = 11.0;

    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, Self::DEFAULT_BASE_HEIGHT, Self::DEFAULT_OCTAVES)
    }

    /// Each octave halves the amplitude and roughly doubles the frequency
    pub fn with_params(seed: u64, base_height: f32, octave_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut amplitude = 1.5;
        let mut frequency = 0.08;

        let octaves = (0..octave_count)
            .map(|_| {
                let octave = Octave {
                    amplitude,
                    frequency: frequency * rng.random_range(0.8..1.25),
                    phase: rng.random_range(0.0..std::f32::consts::TAU),
                };
                amplitude *= 0.5;
                frequency *= 2.0;
                octave
            })
            .collect();

        log::debug!("Generated cave profile: seed={seed}, octaves={octave_count}");
        Self { base_height, octaves }
    }

    /// Largest distance the surface strays from the base height
    pub fn max_deviation(&self) -> f32 {
        self.octaves.iter().map(|o| o.amplitude).sum()
    }
}

impl CaveProfile for LayeredCave {
    fn height_at(&self, world_x: f32) -> f32 {
        self.octaves.iter().fold(self.base_height, |h, o| {
            h + o.amplitude * (o.frequency * world_x + o.phase).sin()
        })
    }
}

/// Samples a profile across the visible width each frame
#[derive(Debug, Clone)]
pub struct CaveSampler {
    /// Visible width (CSS pixels)
    visible_width: f32,
    /// Horizontal distance between samples (pixels)
    spacing: f32,
    heights: Vec<f32>,
}

impl CaveSampler {
    /// One texel every `spacing` pixels across `visible_width`
    pub fn new(visible_width: f32, spacing: f32) -> Self {
        assert!(spacing > 0.0, "cave sample spacing must be positive");
        let exact = visible_width / spacing;
        let texel_count = exact.round() as usize;
        assert!(
            (exact - texel_count as f32).abs() < 1e-3,
            "{visible_width}px visible width is not a whole number of {spacing}px samples"
        );
        Self {
            visible_width,
            spacing,
            heights: vec![0.0; texel_count],
        }
    }

    pub fn texel_count(&self) -> usize {
        self.heights.len()
    }

    /// Latest pixel-space heights, left edge of the view first
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Pixel X of sample `i` for a camera centered at `camera_px_x`
    pub fn sample_x(&self, i: usize, camera_px_x: f32) -> f32 {
        let left = camera_px_x.floor() - (self.visible_width / 2.0).floor();
        i as f32 * self.spacing + left
    }

    /// Overwrite every height from `profile`, relative to the camera
    pub fn sample(&mut self, profile: &dyn CaveProfile, camera_px_x: f32) -> &[f32] {
        assert!(camera_px_x.is_finite(), "cave sample at non-finite camera x");
        for i in 0..self.heights.len() {
            let x = self.sample_x(i, camera_px_x);
            self.heights[i] = to_pixels(profile.height_at(to_meters(x)));
        }
        log::trace!(
            "Sampled {} cave texels from x={}",
            self.heights.len(),
            self.sample_x(0, camera_px_x)
        );
        &self.heights
    }
}
