use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::geometry::{self, Mesh};
use crate::scene::{SceneObject, SceneView};

/// The starter scene: one lit cube spinning over a ground plane.
#[derive(Debug, Default)]
pub struct BaseScene {
    spin: f32,
}

impl BaseScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneView for BaseScene {
    fn title(&self) -> &str {
        "Base"
    }

    fn camera(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(60.0, aspect)
            .looking_from(Vec3::new(0.0, 2.0, 5.0), Vec3::new(0.0, 0.5, 0.0))
    }

    fn meshes(&self) -> Vec<(String, Mesh)> {
        vec![
            ("cube".to_string(), geometry::cube(1.0)),
            ("ground".to_string(), geometry::plane(10.0, 10.0)),
        ]
    }

    fn update(&mut self, dt: f32) {
        self.spin = (self.spin + 40.0 * dt) % 360.0;
    }

    fn objects(&self) -> Vec<SceneObject> {
        vec![
            SceneObject::new("cube", "cube")
                .at(Vec3::new(0.0, 0.75, 0.0))
                .rotated(Vec3::new(0.0, self.spin, 0.0))
                .tinted(Vec3::new(0.91, 0.44, 0.22)),
            SceneObject::new("ground", "ground").tinted(Vec3::splat(0.35)),
        ]
    }
}
