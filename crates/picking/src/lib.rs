//! Pointer picking for the cube viewer.
//!
//! Converts a click position into a world-space ray, intersects it against
//! every vertex marker, and reports the nearest hit. Edge lines carry no
//! surface and are never hit-testable; only markers are.
//!
//! # Invariants
//! - Picking never mutates scene state; the scene applies highlights.
//! - Hits are ordered by distance from the camera; the nearest wins.

pub mod ray;

pub use ray::{PickHit, Ray, pick_marker, ray_sphere, screen_to_ndc};
