use glam::Vec3;
use latticeview_geometry::Color;
use uuid::Uuid;

/// Default line width for edge materials.
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

/// Line width applied to highlighted edges.
pub const HIGHLIGHT_LINE_WIDTH: f32 = 5.0;

/// Unique identifier for a vertex marker in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub Uuid);

impl MarkerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MarkerId {
    fn default() -> Self {
        Self::new()
    }
}

/// Index-based reference to a vertex: which cube, which of its 8 vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    pub cube: usize,
    pub vertex: usize,
}

/// The rendered sphere that marks a vertex.
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub id: MarkerId,
    pub center: Vec3,
    pub radius: f32,
}

/// Material of a rendered edge line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
    pub width: f32,
}

impl Default for LineMaterial {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl LineMaterial {
    /// The material swapped in when an edge's vertex is picked.
    pub fn highlight(color: Color) -> Self {
        Self {
            color,
            width: HIGHLIGHT_LINE_WIDTH,
        }
    }
}

/// A straight line segment with its material.
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub material: LineMaterial,
}

/// A directed edge owned by its source vertex.
///
/// Rendered as an undirected line; tracked per-origin so each undirected cube
/// edge yields two records, one from each endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub line: LineSegment,
}

/// A cube corner: fixed position, its sphere marker, its display color, and
/// the three outgoing edges.
#[derive(Debug, Clone)]
pub struct Vertice {
    pub position: Vec3,
    pub color: Color,
    pub marker: Marker,
    pub edges: Vec<Edge>,
}

/// Eight vertices positioned by a per-instance offset and uniform scale.
#[derive(Debug, Clone)]
pub struct Cube {
    vertices: Vec<Vertice>,
}

impl Cube {
    pub(crate) fn from_vertices(vertices: Vec<Vertice>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vertice] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertice] {
        &mut self.vertices
    }

    /// Total directed edges owned by this cube.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }
}
