//! Trailing worm segments
//!
//! Each segment sits a fixed pixel distance behind the head and takes the Y
//! the head had when it passed that X, read back from the history buffer.

use glam::Vec2;

use super::history::HistoryBuffer;
use crate::consts::{WORM_SEGMENTS, WORM_SEGMENTS_PER_BLOCK};

/// One packed 4x4 uniform block
pub type WormBlock = [f32; 16];

/// Floats reserved per segment inside a block (one mat4 row)
const SEGMENT_STRIDE: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrailSegment {
    /// Pixel-space position
    pub position: Vec2,
    /// Always 0 for now; the shader reads it but nothing sets it
    pub rotation: f32,
}

/// Segment positions for a head at `head_px`.
///
/// The head must already have been recorded into `history` this frame.
pub fn compute_segments(
    head_px: Vec2,
    history: &HistoryBuffer,
    spacing: f32,
    fallback_y: f32,
) -> [TrailSegment; WORM_SEGMENTS] {
    std::array::from_fn(|k| {
        let x = head_px.x - spacing * k as f32;
        TrailSegment {
            position: Vec2::new(x, history.lookup(x, fallback_y)),
            rotation: 0.0,
        }
    })
}

/// Pack segments into the `wormData` / `wormData2` blocks.
///
/// Segment `k` occupies row `k % 4` of block `k / 4` as `(x, y, rotation, 0)`;
/// rows without a segment stay zero.
pub fn pack_worm_blocks(segments: &[TrailSegment]) -> (WormBlock, WormBlock) {
    assert!(
        segments.len() <= 2 * WORM_SEGMENTS_PER_BLOCK,
        "{} segments do not fit in two blocks",
        segments.len()
    );

    let mut first = [0.0; 16];
    let mut second = [0.0; 16];

    for (k, segment) in segments.iter().enumerate() {
        let (block, row) = if k < WORM_SEGMENTS_PER_BLOCK {
            (&mut first, k)
        } else {
            (&mut second, k - WORM_SEGMENTS_PER_BLOCK)
        };
        let i = row * SEGMENT_STRIDE;
        block[i] = segment.position.x;
        block[i + 1] = segment.position.y;
        block[i + 2] = segment.rotation;
    }

    (first, second)
}
