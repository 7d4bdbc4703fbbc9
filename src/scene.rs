use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::PerspectiveCamera;
use crate::geometry::Mesh;

/// Renderable object snapshot produced by a scene each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    #[serde(default = "default_color")]
    pub color: Vec3,
    #[serde(default)]
    pub position: Vec3,
    /// Euler rotation in degrees, applied Z then Y then X.
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            mesh: None,
            color: default_color(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn tinted(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

fn default_color() -> Vec3 {
    Vec3::ONE
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

/// Single light illuminating a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(3.0, 5.0, -3.0),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// One routed demo.  The shell owns the window, renderer and viewport
/// binding; the scene owns geometry, animation state and its camera setup.
pub trait SceneView {
    fn title(&self) -> &str;

    /// Initial camera for the scene, built for the current surface aspect.
    fn camera(&self, aspect: f32) -> PerspectiveCamera;

    /// Meshes the renderer should have resident while this scene is
    /// mounted, keyed by the names the object snapshots refer to.
    fn meshes(&self) -> Vec<(String, Mesh)>;

    fn light(&self) -> Light {
        Light::default()
    }

    /// Advances animation state by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// Snapshot of the objects to draw this frame.
    fn objects(&self) -> Vec<SceneObject>;
}
