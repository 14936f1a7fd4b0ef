use glam::{Mat4, Vec3};

/// Drawable area in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`, with a zero height treated as 1.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Perspective camera looking down its local -Z axis.
///
/// The projection matrix is cached; call `update_projection_matrix` after
/// changing `fov_degrees`, `aspect`, `near` or `far`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            position: Vec3::ZERO,
            fov_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam
    }

    /// The scene camera: 60° fov, near 1, far 10000, parked at (0, 100, 200).
    pub fn for_viewport(viewport: Viewport) -> Self {
        let mut cam = Self::new(60.0, viewport.aspect(), 1.0, 10_000.0);
        cam.position = Vec3::new(0.0, 100.0, 200.0);
        cam
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_camera_defaults() {
        let cam = PerspectiveCamera::for_viewport(Viewport::new(1280, 720));
        assert_eq!(cam.position, Vec3::new(0.0, 100.0, 200.0));
        assert_eq!(cam.fov_degrees, 60.0);
        assert_eq!(cam.aspect, 1280.0 / 720.0);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn projection_tracks_aspect_after_update() {
        let mut cam = PerspectiveCamera::for_viewport(Viewport::new(100, 100));
        let before = cam.projection_matrix();
        cam.aspect = 2.0;
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
    }

    #[test]
    fn point_ahead_projects_to_center() {
        let cam = PerspectiveCamera::for_viewport(Viewport::new(800, 600));
        let ndc = cam.view_projection().project_point3(Vec3::new(0.0, 100.0, 0.0));
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn zero_height_viewport_does_not_divide_by_zero() {
        assert_eq!(Viewport::new(640, 0).aspect(), 640.0);
    }
}
