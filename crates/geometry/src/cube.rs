use glam::Vec3;

/// Number of vertices in a cube.
pub const CUBE_VERTEX_COUNT: usize = 8;

/// Number of directed edges originating from each vertex.
pub const EDGES_PER_VERTEX: usize = 3;

// Corner layout:
//
//   6+--------+7
//   /|       /|
// 5+--------+4|
//  | |      | |
//  |1+------|-+2
//  |/       |/
// 0+--------+3
//
/// Corner offsets of the unit cube, in vertex-index order.
#[rustfmt::skip]
pub const UNIT_CORNERS: [[f32; 3]; CUBE_VERTEX_COUNT] = [
    [0.0, 0.0,  0.0], // 0
    [0.0, 0.0, -1.0], // 1
    [1.0, 0.0, -1.0], // 2
    [1.0, 0.0,  0.0], // 3
    [1.0, 1.0,  0.0], // 4
    [0.0, 1.0,  0.0], // 5
    [0.0, 1.0, -1.0], // 6
    [1.0, 1.0, -1.0], // 7
];

/// Vertex adjacency table: the three vertex indices each vertex connects to.
///
/// A cube treated as a directed graph: 8 vertices, 24 directed edges, each of
/// the 12 undirected edges appearing once from each endpoint.
pub const CUBE_EDGES: [[usize; EDGES_PER_VERTEX]; CUBE_VERTEX_COUNT] = [
    [1, 3, 5],
    [0, 2, 6],
    [1, 3, 7],
    [0, 2, 4],
    [3, 5, 7],
    [0, 4, 6],
    [1, 5, 7],
    [2, 4, 6],
];

/// Positions of a cube instance's eight corners.
///
/// Each corner is `(unit_corner + offset) * scale`. Any finite inputs are
/// legal; a zero or negative scale produces a degenerate or mirrored cube.
pub fn corner_positions(offset: Vec3, scale: f32) -> [Vec3; CUBE_VERTEX_COUNT] {
    UNIT_CORNERS.map(|c| (Vec3::from_array(c) + offset) * scale)
}
