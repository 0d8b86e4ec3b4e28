//! wgpu render backend for the cube viewer.
//!
//! Draws every vertex marker as an instanced UV sphere and every edge as a
//! line-list segment colored by its material, on a white background.
//!
//! # Invariants
//! - The renderer never mutates scene state.
//! - Marker instances and line vertices are rebuilt from the scene each
//!   frame, so material changes show up on the next draw.

mod context;
mod gpu;
mod shaders;
mod viewport;

pub use context::{GpuContext, GpuInitError};
pub use gpu::WgpuRenderer;
pub use viewport::Viewport;
