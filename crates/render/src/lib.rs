//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the scene graph and camera; they never mutate them.
//! - Render state is derived from the scene every frame.
//!
//! The GPU backend lives in `aviator-render-wgpu`. `DebugTextRenderer` here
//! implements the same trait for headless runs and tests.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer};
