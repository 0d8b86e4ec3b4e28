use glam::{Mat4, Vec3};

/// Orbit camera: the eye circles a target point at a given distance.
///
/// Rotation and panning are driven by pointer-drag deltas in pixels; zoom by
/// scroll lines. Pitch is clamped short of the poles so the view never flips.
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub rotate_sensitivity: f32,
    pub pan_sensitivity: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 30.0,
            yaw: -0.46,
            pitch: 0.73,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            rotate_sensitivity: 0.005,
            pan_sensitivity: 0.0015,
            min_distance: 0.5,
            max_distance: 200.0,
        }
    }
}

impl OrbitCamera {
    /// Unit vector from the target toward the eye.
    fn offset_dir(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.offset_dir() * self.distance
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye()).normalize()
    }

    /// Fold a pointer-drag delta (pixels) into yaw and pitch.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.rotate_sensitivity;
        self.pitch += dy * self.rotate_sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    /// Translate the target in the camera's screen plane.
    ///
    /// Scaled by distance so a drag covers a similar on-screen span at any
    /// zoom level. Dragging right moves the scene right (camera slides left).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let fwd = self.forward();
        let right = fwd.cross(Vec3::Y).normalize();
        let up = right.cross(fwd).normalize();
        let scale = self.distance * self.pan_sensitivity;
        self.target += (-dx * right + dy * up) * scale;
    }

    /// Zoom by scroll lines; positive lines move the eye closer.
    pub fn zoom(&mut self, lines: f32) {
        let factor = 1.1_f32.powf(lines);
        self.distance = (self.distance / factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_projection_parameters() {
        let cam = OrbitCamera::default();
        assert!((cam.fov - 75.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 1000.0);
    }

    #[test]
    fn view_projection_is_finite() {
        let cam = OrbitCamera::default();
        let vp = cam.view_projection();
        for col in 0..4 {
            assert!(vp.col(col).is_finite());
        }
    }

    #[test]
    fn eye_sits_at_distance_from_target() {
        let cam = OrbitCamera::default();
        assert!(((cam.eye() - cam.target).length() - cam.distance).abs() < 1e-4);
    }

    #[test]
    fn set_aspect_changes_projection() {
        let mut cam = OrbitCamera::default();
        let before = cam.projection_matrix();
        cam.set_aspect(2.0);
        assert_eq!(cam.aspect, 2.0);
        assert_ne!(cam.projection_matrix().col(0).x, before.col(0).x);
    }

    #[test]
    fn zoom_clamps_distance() {
        let mut cam = OrbitCamera::default();
        cam.zoom(1000.0);
        assert_eq!(cam.distance, cam.min_distance);
        cam.zoom(-1000.0);
        assert_eq!(cam.distance, cam.max_distance);
    }

    #[test]
    fn rotate_clamps_pitch() {
        let mut cam = OrbitCamera::default();
        cam.rotate(0.0, 1.0e6);
        assert!(cam.pitch <= 89.0_f32.to_radians());
        cam.rotate(0.0, -2.0e6);
        assert!(cam.pitch >= -89.0_f32.to_radians());
        // Still produces a valid view at the clamp.
        assert!(cam.view_projection().col(0).is_finite());
    }

    #[test]
    fn pan_moves_target_not_distance() {
        let mut cam = OrbitCamera::default();
        let start = cam.target;
        cam.pan(50.0, -30.0);
        assert_ne!(cam.target, start);
        assert!(((cam.eye() - cam.target).length() - cam.distance).abs() < 1e-3);
    }

    #[test]
    fn rotation_orbits_without_changing_distance() {
        let mut cam = OrbitCamera::default();
        let eye_before = cam.eye();
        cam.rotate(120.0, 40.0);
        assert_ne!(cam.eye(), eye_before);
        assert!(((cam.eye() - cam.target).length() - cam.distance).abs() < 1e-3);
    }
}
