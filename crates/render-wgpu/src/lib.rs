//! wgpu render backend for the aviator scene.
//!
//! Draws every mesh of the scene graph with hemisphere and directional
//! lighting, a PCF-filtered shadow map and distance fog. Translucent
//! materials are drawn last with alpha blending.
//!
//! # Invariants
//! - Renderer never mutates the scene graph.
//! - GPU meshes are uploaded once per registered geometry.
//! - Colors are converted to linear space before reaching the sRGB target.

mod gpu;
mod shaders;
mod surface;

pub use gpu::WgpuRenderer;
pub use surface::{GpuError, GpuSurface, SurfaceFrame};
