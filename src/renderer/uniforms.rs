//! Uniform values handed to the cave/worm fragment shader

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::worm::WormBlock;

/// Everything the shader reads for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    /// Simulated seconds
    pub time: f32,
    /// Pixel space
    pub player_pos: Vec2,
    /// Pixel space
    pub camera_pos: Vec2,
    pub worm_data: WormBlock,
    pub worm_data2: WormBlock,
    /// Pixel-space cave heights, one per texel
    pub cave_heights: Vec<f32>,
}

impl FrameUniforms {
    pub fn new(texel_count: usize) -> Self {
        Self {
            time: 0.0,
            player_pos: Vec2::ZERO,
            camera_pos: Vec2::ZERO,
            worm_data: [0.0; 16],
            worm_data2: [0.0; 16],
            cave_heights: vec![0.0; texel_count],
        }
    }

    /// GPU layout of the scalar/vector/matrix uniforms
    pub fn globals(&self) -> Globals {
        Globals {
            time: self.time,
            _pad0: 0.0,
            player_pos: self.player_pos.to_array(),
            camera_pos: self.camera_pos.to_array(),
            _pad1: [0.0; 2],
            worm_data: rows(&self.worm_data),
            worm_data2: rows(&self.worm_data2),
        }
    }
}

fn rows(block: &WormBlock) -> [[f32; 4]; 4] {
    std::array::from_fn(|r| std::array::from_fn(|c| block[r * 4 + c]))
}

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Globals {
    pub time: f32,                   // offset 0
    pub _pad0: f32,                  // offset 4 - align vec2 to 8 bytes
    pub player_pos: [f32; 2],        // offset 8
    pub camera_pos: [f32; 2],        // offset 16
    pub _pad1: [f32; 2],             // offset 24 - align mat4 to 16 bytes
    pub worm_data: [[f32; 4]; 4],    // offset 32
    pub worm_data2: [[f32; 4]; 4],   // offset 96
}

/// Destination for per-frame uniforms
pub trait UniformSink {
    /// Texel count of the surface's `caveHeights` texture
    fn cave_texel_count(&self) -> usize;

    fn upload(&mut self, uniforms: &FrameUniforms);
}

/// Sink without a GPU; keeps the last upload for inspection
#[derive(Debug, Clone)]
pub struct HeadlessSink {
    texel_count: usize,
    pub uploads: u64,
    pub last: Option<FrameUniforms>,
}

impl HeadlessSink {
    pub fn new(texel_count: usize) -> Self {
        Self {
            texel_count,
            uploads: 0,
            last: None,
        }
    }
}

impl UniformSink for HeadlessSink {
    fn cave_texel_count(&self) -> usize {
        self.texel_count
    }

    fn upload(&mut self, uniforms: &FrameUniforms) {
        self.uploads += 1;
        log::trace!(
            "upload #{}: time={:.3} player={:?} camera={:?}",
            self.uploads,
            uniforms.time,
            uniforms.player_pos,
            uniforms.camera_pos
        );
        self.last = Some(uniforms.clone());
    }
}
