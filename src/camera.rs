use glam::{Mat4, Vec3};

use crate::viewport::ProjectionCamera;

/// Perspective projection descriptor used by every demo scene.
///
/// The stored aspect ratio is exactly what the viewport adapter wrote;
/// clamping against degenerate values happens only inside the projection
/// computation, mirroring how the field is treated as surface truth.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    aspect: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_y: f32, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 2.0, 6.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y,
            near: 0.1,
            far: 1000.0,
            aspect,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Repositions the camera while keeping projection parameters.
    pub fn looking_from(mut self, position: Vec3, target: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}

impl ProjectionCamera for PerspectiveCamera {
    fn aspect(&self) -> f32 {
        self.aspect
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh_gl(
            self.fov_y.to_radians(),
            self.aspect.max(0.01),
            self.near,
            self.far,
        );
    }
}
