//! Orbit camera for the cube viewer.
//!
//! # Invariants
//! - Camera state lives outside the scene; controls never mutate scene truth.
//! - The projection is perspective with parameters fixed at construction;
//!   only the aspect ratio follows the viewport.

pub mod orbit;

pub use orbit::OrbitCamera;
