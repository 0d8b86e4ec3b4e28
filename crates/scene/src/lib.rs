//! Scene state for the cube viewer.
//!
//! The scene owns the truth: cube instances built by the factory, the marker
//! registry used to resolve picks back to vertices, and the highlight
//! operations that mutate edge materials.
//!
//! # Invariants
//! - The cube list is append-only; creation order is preserved.
//! - Edge topology is fixed by the geometry crate's adjacency table and never
//!   changes after construction.
//! - Edge endpoints always equal their vertices' positions.

pub mod model;
pub mod set;

pub use model::{Cube, Edge, LineMaterial, LineSegment, Marker, MarkerId, VertexRef, Vertice};
pub use set::{SceneSet, spawn_random_cubes};
