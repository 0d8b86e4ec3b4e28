use glam::{Vec3, Vec4Swizzles};
use latticeview_camera::OrbitCamera;
use latticeview_scene::{MarkerId, SceneSet};

/// A world-space ray cast from the camera through a screen point.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// The nearest marker a ray hit, and how far along the ray it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub marker: MarkerId,
    pub distance: f32,
}

/// Window coordinates to normalized device coordinates in [-1, 1].
///
/// x grows left to right; y is inverted so up is positive.
pub fn screen_to_ndc(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    ((x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0)
}

impl Ray {
    /// Ray from the camera eye through the given window coordinates.
    pub fn from_screen(camera: &OrbitCamera, x: f32, y: f32, width: f32, height: f32) -> Self {
        let (nx, ny) = screen_to_ndc(x, y, width, height);
        let inv = camera.view_projection().inverse();

        // Unproject a point on the far plane (wgpu NDC depth runs 0..1); the
        // ray from the eye through it passes through the near-plane point too.
        let far = inv * glam::Vec4::new(nx, ny, 1.0, 1.0);
        let far = far.xyz() / far.w;

        let origin = camera.eye();
        Self {
            origin,
            dir: (far - origin).normalize(),
        }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Distance along the ray to the first intersection with a sphere.
///
/// Substituting the parametric ray into the sphere equation gives a
/// quadratic in t; the smaller non-negative root is the visible hit. A ray
/// starting inside the sphere hits on the way out. Hits behind the origin
/// are discarded.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.dir.length_squared();
    let b = 2.0 * oc.dot(ray.dir);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();

    let t0 = (-b - sqrt_d) / (2.0 * a);
    if t0 >= 0.0 {
        return Some(t0);
    }
    let t1 = (-b + sqrt_d) / (2.0 * a);
    if t1 >= 0.0 {
        return Some(t1);
    }
    None
}

/// Intersect the ray against every marker in the scene and return the
/// nearest hit, if any.
pub fn pick_marker(ray: &Ray, scene: &SceneSet) -> Option<PickHit> {
    let mut nearest: Option<PickHit> = None;
    for cube in scene.cubes() {
        for vertice in cube.vertices() {
            let marker = &vertice.marker;
            if let Some(t) = ray_sphere(ray, marker.center, marker.radius) {
                if nearest.is_none_or(|hit| t < hit.distance) {
                    nearest = Some(PickHit {
                        marker: marker.id,
                        distance: t,
                    });
                }
            }
        }
    }
    if let Some(hit) = nearest {
        tracing::trace!(distance = hit.distance, "marker hit");
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use latticeview_scene::{LineMaterial, VertexRef};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ndc_center_and_corners() {
        assert_eq!(screen_to_ndc(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
        assert_eq!(screen_to_ndc(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
        assert_eq!(screen_to_ndc(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = OrbitCamera::default();
        let ray = Ray::from_screen(&camera, 400.0, 300.0, 800.0, 600.0);
        assert_eq!(ray.origin, camera.eye());
        let to_target = (camera.target - camera.eye()).normalize();
        assert!(ray.dir.dot(to_target) > 0.999);
    }

    #[test]
    fn sphere_hit_in_front() {
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::NEG_Z,
        };
        let t = ray_sphere(&ray, Vec3::new(0.0, 0.0, -5.0), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert!((ray.point_at(t) - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);
    }

    #[test]
    fn sphere_off_axis_misses() {
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::NEG_Z,
        };
        assert!(ray_sphere(&ray, Vec3::new(0.0, 3.0, -5.0), 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_misses() {
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::NEG_Z,
        };
        assert!(ray_sphere(&ray, Vec3::new(0.0, 0.0, 5.0), 1.0).is_none());
    }

    #[test]
    fn origin_inside_sphere_hits_on_exit() {
        let ray = Ray {
            origin: Vec3::ZERO,
            dir: Vec3::NEG_Z,
        };
        let t = ray_sphere(&ray, Vec3::new(0.0, 0.0, -1.0), 2.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn nearest_marker_wins() {
        let mut scene = SceneSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        // Vertex 0 sits at the offset * size; vertex 1 is one unit behind it.
        scene.create_cube(0.0, 0.0, 0.0, 2.0, &mut rng);

        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::NEG_Z,
        };
        let hit = pick_marker(&ray, &scene).unwrap();
        let vref = scene.vertex_of_marker(hit.marker).unwrap();
        assert_eq!(vref, VertexRef { cube: 0, vertex: 0 });
        // Marker radius is 0.2, center at the origin.
        assert!((hit.distance - 4.8).abs() < 1e-4);
    }

    #[test]
    fn near_cube_shadows_far_cube() {
        let mut scene = SceneSet::new();
        let mut rng = StdRng::seed_from_u64(2);
        scene.create_cube(0.0, 0.0, -10.0, 1.0, &mut rng);
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng);

        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::NEG_Z,
        };
        let hit = pick_marker(&ray, &scene).unwrap();
        let vref = scene.vertex_of_marker(hit.marker).unwrap();
        assert_eq!(vref.cube, 1);
    }

    #[test]
    fn miss_returns_none_and_nothing_changes() {
        let mut scene = SceneSet::new();
        let mut rng = StdRng::seed_from_u64(3);
        scene.create_cube(0.0, 0.0, 0.0, 1.0, &mut rng);

        let ray = Ray {
            origin: Vec3::new(100.0, 100.0, 100.0),
            dir: Vec3::Y,
        };
        assert!(pick_marker(&ray, &scene).is_none());
        for v in scene.cubes()[0].vertices() {
            for e in &v.edges {
                assert_eq!(e.line.material, LineMaterial::default());
            }
        }
    }

    #[test]
    fn repeated_pick_highlights_identically() {
        let mut scene = SceneSet::new();
        let mut rng = StdRng::seed_from_u64(4);
        scene.create_cube(0.0, 0.0, 0.0, 2.0, &mut rng);

        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            dir: Vec3::NEG_Z,
        };

        let first_hit = pick_marker(&ray, &scene).unwrap();
        scene.highlight_marker(first_hit.marker);
        let vref = scene.vertex_of_marker(first_hit.marker).unwrap();
        let before: Vec<LineMaterial> = scene
            .vertex(vref)
            .unwrap()
            .edges
            .iter()
            .map(|e| e.line.material)
            .collect();

        let second_hit = pick_marker(&ray, &scene).unwrap();
        assert_eq!(first_hit, second_hit);
        scene.highlight_marker(second_hit.marker);
        let after: Vec<LineMaterial> = scene
            .vertex(vref)
            .unwrap()
            .edges
            .iter()
            .map(|e| e.line.material)
            .collect();

        assert_eq!(before, after);
    }
}
