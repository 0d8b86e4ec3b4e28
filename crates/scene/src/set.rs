use crate::model::{Cube, Edge, LineMaterial, LineSegment, Marker, MarkerId, VertexRef, Vertice};
use glam::Vec3;
use latticeview_geometry::{CUBE_EDGES, Color, corner_positions};
use rand::Rng;
use std::collections::BTreeMap;

/// Brightness floor for generated marker colors.
const COLOR_FLOOR: u8 = 1;

/// Marker radius as a fraction of cube size.
const MARKER_RADIUS_DIVISOR: f32 = 10.0;

/// Offset range for randomly placed cubes, per axis.
const OFFSET_RANGE: std::ops::Range<f32> = -5.0..5.0;

/// Size range for randomly placed cubes.
const SIZE_RANGE: std::ops::Range<f32> = 0.0..5.0;

/// The live scene: every cube created this session plus the marker registry.
///
/// Cubes are append-only. The registry maps each marker back to its owning
/// vertex so a pick resolves without scanning the whole scene.
#[derive(Debug, Clone, Default)]
pub struct SceneSet {
    cubes: Vec<Cube>,
    markers: BTreeMap<MarkerId, VertexRef>,
}

impl SceneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All cubes, in creation order.
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    /// Background clear color. The viewer draws on solid white.
    pub fn background(&self) -> Color {
        Color::WHITE
    }

    /// Total renderable objects: one marker per vertex, one line per edge.
    pub fn renderable_count(&self) -> usize {
        self.cubes
            .iter()
            .map(|c| c.vertices().len() + c.edge_count())
            .sum()
    }

    /// Resolve a marker to its owning vertex.
    pub fn vertex_of_marker(&self, id: MarkerId) -> Option<VertexRef> {
        self.markers.get(&id).copied()
    }

    pub fn vertex(&self, vref: VertexRef) -> Option<&Vertice> {
        self.cubes.get(vref.cube)?.vertices().get(vref.vertex)
    }

    /// Build a cube at `(x_offset, y_offset, z_offset)` with the given size
    /// and register its markers and edge lines.
    ///
    /// Every call creates fully independent geometry; coincident cubes do not
    /// share vertices or markers.
    pub fn create_cube(
        &mut self,
        x_offset: f32,
        y_offset: f32,
        z_offset: f32,
        size: f32,
        rng: &mut impl Rng,
    ) -> &Cube {
        let cube_index = self.cubes.len();
        let positions = corner_positions(Vec3::new(x_offset, y_offset, z_offset), size);
        let radius = size / MARKER_RADIUS_DIVISOR;

        let mut vertices = Vec::with_capacity(positions.len());
        for (i, position) in positions.iter().copied().enumerate() {
            let edges = CUBE_EDGES[i]
                .iter()
                .map(|&neighbor| Edge {
                    source: i,
                    target: neighbor,
                    line: LineSegment {
                        start: position,
                        end: positions[neighbor],
                        material: LineMaterial::default(),
                    },
                })
                .collect();

            let marker = Marker {
                id: MarkerId::new(),
                center: position,
                radius,
            };
            self.markers.insert(
                marker.id,
                VertexRef {
                    cube: cube_index,
                    vertex: i,
                },
            );

            vertices.push(Vertice {
                position,
                color: Color::random(COLOR_FLOOR, rng),
                marker,
                edges,
            });
        }

        self.cubes.push(Cube::from_vertices(vertices));
        tracing::debug!(
            cube = cube_index,
            x_offset,
            y_offset,
            z_offset,
            size,
            "created cube"
        );
        &self.cubes[cube_index]
    }

    /// Replace the material of every edge owned by the vertex with a
    /// highlight in that vertex's color.
    ///
    /// One-way: nothing ever un-highlights. Re-applying to the same vertex
    /// writes an identical material. Returns false for a dangling reference.
    pub fn highlight_vertex(&mut self, vref: VertexRef) -> bool {
        let Some(cube) = self.cubes.get_mut(vref.cube) else {
            return false;
        };
        let Some(vertice) = cube.vertices_mut().get_mut(vref.vertex) else {
            return false;
        };
        let material = LineMaterial::highlight(vertice.color);
        for edge in &mut vertice.edges {
            edge.line.material = material;
        }
        tracing::debug!(cube = vref.cube, vertex = vref.vertex, "highlighted vertex");
        true
    }

    /// Resolve a picked marker through the registry and highlight its vertex.
    pub fn highlight_marker(&mut self, id: MarkerId) -> bool {
        match self.vertex_of_marker(id) {
            Some(vref) => self.highlight_vertex(vref),
            None => false,
        }
    }
}

/// Populate the scene with `count` cubes at random offsets and sizes.
///
/// Offsets are uniform in [-5, 5] per axis, sizes uniform in [0, 5]; a size
/// of zero legally produces a degenerate, invisible cube.
pub fn spawn_random_cubes(scene: &mut SceneSet, count: u32, rng: &mut impl Rng) {
    for _ in 0..count {
        let x = rng.random_range(OFFSET_RANGE);
        let y = rng.random_range(OFFSET_RANGE);
        let z = rng.random_range(OFFSET_RANGE);
        let size = rng.random_range(SIZE_RANGE);
        scene.create_cube(x, y, z, size, rng);
    }
    tracing::info!(count, total = scene.cube_count(), "spawned random cubes");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_LINE_WIDTH, HIGHLIGHT_LINE_WIDTH};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn cube_has_eight_vertices_with_three_edges_each() {
        let mut scene = SceneSet::new();
        let cube = scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        assert_eq!(cube.vertices().len(), 8);
        for v in cube.vertices() {
            assert_eq!(v.edges.len(), 3);
        }
        assert_eq!(cube.edge_count(), 24);
    }

    #[test]
    fn edges_reproduce_the_adjacency_table() {
        let mut scene = SceneSet::new();
        let cube = scene.create_cube(1.0, 2.0, 3.0, 2.0, &mut rng());

        let built: BTreeSet<(usize, usize)> = cube
            .vertices()
            .iter()
            .flat_map(|v| v.edges.iter().map(|e| (e.source, e.target)))
            .collect();
        let expected: BTreeSet<(usize, usize)> = CUBE_EDGES
            .iter()
            .enumerate()
            .flat_map(|(v, neighbors)| neighbors.iter().map(move |&n| (v, n)))
            .collect();

        assert_eq!(built.len(), 24);
        assert_eq!(built, expected);
    }

    #[test]
    fn edge_endpoints_match_vertex_positions() {
        let mut scene = SceneSet::new();
        let cube = scene.create_cube(-2.0, 0.5, 4.0, 3.0, &mut rng());
        for v in cube.vertices() {
            for e in &v.edges {
                assert_eq!(e.line.start, cube.vertices()[e.source].position);
                assert_eq!(e.line.end, cube.vertices()[e.target].position);
            }
        }
    }

    #[test]
    fn new_edges_carry_the_default_material() {
        let mut scene = SceneSet::new();
        let cube = scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        for v in cube.vertices() {
            for e in &v.edges {
                assert_eq!(e.line.material.color, Color::BLACK);
                assert_eq!(e.line.material.width, DEFAULT_LINE_WIDTH);
            }
        }
    }

    #[test]
    fn marker_radius_is_a_tenth_of_size() {
        let mut scene = SceneSet::new();
        let cube = scene.create_cube(0.0, 0.0, 0.0, 3.0, &mut rng());
        for v in cube.vertices() {
            assert_eq!(v.marker.radius, 0.3);
            assert_eq!(v.marker.center, v.position);
        }
    }

    #[test]
    fn markers_resolve_back_to_their_vertices() {
        let mut scene = SceneSet::new();
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        scene.create_cube(3.0, 0.0, 0.0, 1.0, &mut rng());

        for (ci, cube) in scene.cubes().iter().enumerate() {
            for (vi, v) in cube.vertices().iter().enumerate() {
                let vref = scene.vertex_of_marker(v.marker.id).unwrap();
                assert_eq!(vref, VertexRef { cube: ci, vertex: vi });
            }
        }
    }

    #[test]
    fn coincident_cubes_share_no_geometry() {
        let mut scene = SceneSet::new();
        let mut r = rng();
        scene.create_cube(1.0, 1.0, 1.0, 2.0, &mut r);
        scene.create_cube(1.0, 1.0, 1.0, 2.0, &mut r);

        let ids: BTreeSet<MarkerId> = scene
            .cubes()
            .iter()
            .flat_map(|c| c.vertices().iter().map(|v| v.marker.id))
            .collect();
        assert_eq!(ids.len(), 16);
        assert_eq!(scene.renderable_count(), 2 * (8 + 24));
    }

    #[test]
    fn highlight_replaces_all_three_edge_materials() {
        let mut scene = SceneSet::new();
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        let vref = VertexRef { cube: 0, vertex: 4 };
        assert!(scene.highlight_vertex(vref));

        let v = scene.vertex(vref).unwrap();
        for e in &v.edges {
            assert_eq!(e.line.material.color, v.color);
            assert_eq!(e.line.material.width, HIGHLIGHT_LINE_WIDTH);
        }
    }

    #[test]
    fn highlight_is_idempotent() {
        let mut scene = SceneSet::new();
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        let vref = VertexRef { cube: 0, vertex: 2 };

        scene.highlight_vertex(vref);
        let first: Vec<LineMaterial> = scene
            .vertex(vref)
            .unwrap()
            .edges
            .iter()
            .map(|e| e.line.material)
            .collect();

        scene.highlight_vertex(vref);
        scene.highlight_vertex(vref);
        let after: Vec<LineMaterial> = scene
            .vertex(vref)
            .unwrap()
            .edges
            .iter()
            .map(|e| e.line.material)
            .collect();

        assert_eq!(first, after);
    }

    #[test]
    fn highlight_is_one_way() {
        let mut scene = SceneSet::new();
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        let first = VertexRef { cube: 0, vertex: 0 };
        let second = VertexRef { cube: 0, vertex: 7 };

        scene.highlight_vertex(first);
        scene.highlight_vertex(second);

        // Highlighting a second vertex leaves the first one's edges alone.
        let v = scene.vertex(first).unwrap();
        for e in &v.edges {
            assert_eq!(e.line.material.width, HIGHLIGHT_LINE_WIDTH);
            assert_eq!(e.line.material.color, v.color);
        }
    }

    #[test]
    fn unknown_marker_changes_nothing() {
        let mut scene = SceneSet::new();
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        assert!(!scene.highlight_marker(MarkerId::new()));
        for v in scene.cubes()[0].vertices() {
            for e in &v.edges {
                assert_eq!(e.line.material, LineMaterial::default());
            }
        }
    }

    #[test]
    fn dangling_vertex_ref_is_rejected() {
        let mut scene = SceneSet::new();
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng());
        assert!(!scene.highlight_vertex(VertexRef { cube: 5, vertex: 0 }));
        assert!(!scene.highlight_vertex(VertexRef { cube: 0, vertex: 9 }));
    }

    #[test]
    fn spawn_three_cubes_end_to_end() {
        let mut scene = SceneSet::new();
        spawn_random_cubes(&mut scene, 3, &mut rng());

        assert_eq!(scene.cube_count(), 3);
        for cube in scene.cubes() {
            assert_eq!(cube.vertices().len(), 8);
            assert_eq!(cube.edge_count(), 24);
        }
        assert_eq!(scene.renderable_count(), 96);
    }

    #[test]
    fn spawned_cubes_stay_in_bounds() {
        let mut scene = SceneSet::new();
        spawn_random_cubes(&mut scene, 20, &mut rng());

        // |(corner + offset) * scale| <= (1 + 5) * 5 per axis.
        for cube in scene.cubes() {
            for v in cube.vertices() {
                assert!(v.position.is_finite());
                assert!(v.position.abs().max_element() <= 30.0);
            }
        }
    }

    #[test]
    fn spawn_zero_cubes_is_empty() {
        let mut scene = SceneSet::new();
        spawn_random_cubes(&mut scene, 0, &mut rng());
        assert_eq!(scene.cube_count(), 0);
        assert_eq!(scene.renderable_count(), 0);
    }
}
