//! Cube geometry model: the unit cube's corner table, the fixed vertex
//! adjacency table, and display-color generation.
//!
//! # Invariants
//! - `CUBE_EDGES` is the single source of truth for edge topology.
//! - Corner positions are a pure transform of (offset, scale); nothing here
//!   mutates state.

pub mod color;
pub mod cube;

pub use color::Color;
pub use cube::{CUBE_EDGES, CUBE_VERTEX_COUNT, EDGES_PER_VERTEX, UNIT_CORNERS, corner_positions};
