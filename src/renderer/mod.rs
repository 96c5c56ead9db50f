//! Rendering boundary
//!
//! The cave and worm are drawn entirely in a fragment shader; this module only
//! owns the uniform contract and the buffers that carry it.

pub mod gpu;
pub mod uniforms;

pub use gpu::GpuUniforms;
pub use uniforms::{FrameUniforms, Globals, HeadlessSink, UniformSink};
