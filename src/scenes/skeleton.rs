use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::geometry::{self, Mesh};
use crate::scene::{SceneObject, SceneView};

pub(crate) const BONE_COUNT: usize = 6;
const BONE_LENGTH: f32 = 0.8;
const SWAY_DEGREES: f32 = 18.0;

/// Articulated chain of bone boxes swaying with per-joint phase offsets.
#[derive(Debug, Default)]
pub struct SkeletonScene {
    time: f32,
}

impl SkeletonScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated joint angle (degrees about Z) at the given bone.
    fn joint_angle(&self, bone: usize) -> f32 {
        (0..=bone)
            .map(|joint| (self.time * (2.0 + joint as f32 * 0.35)).sin() * SWAY_DEGREES)
            .sum()
    }
}

impl SceneView for SkeletonScene {
    fn title(&self) -> &str {
        "Skeleton"
    }

    fn camera(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(50.0, aspect)
            .looking_from(Vec3::new(0.0, 0.5, 7.0), Vec3::new(0.0, 0.2, 0.0))
    }

    fn meshes(&self) -> Vec<(String, Mesh)> {
        vec![("bone".to_string(), geometry::cube(1.0))]
    }

    fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    fn objects(&self) -> Vec<SceneObject> {
        let mut objects = Vec::with_capacity(BONE_COUNT);
        let mut origin = Vec3::new(0.0, 2.5, 0.0);
        for bone in 0..BONE_COUNT {
            let angle = self.joint_angle(bone);
            let radians = angle.to_radians();
            // Direction of the bone: -Y rotated by the joint angle about Z.
            let direction = Vec3::new(radians.sin(), -radians.cos(), 0.0);
            let midpoint = origin + direction * (BONE_LENGTH * 0.5);
            objects.push(
                SceneObject::new(format!("bone-{bone}"), "bone")
                    .at(midpoint)
                    .rotated(Vec3::new(0.0, 0.0, angle))
                    .scaled(Vec3::new(0.22, BONE_LENGTH, 0.22))
                    .tinted(Vec3::new(0.85, 0.85, 0.9)),
            );
            origin += direction * BONE_LENGTH;
        }
        objects
    }
}
