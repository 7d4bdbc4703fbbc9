use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::geometry::{self, Mesh};
use crate::scene::{Light, SceneObject, SceneView};

const ROOM_SIZE: f32 = 12.0;
const DRIFTER_COUNT: usize = 6;

/// Inside-a-room panorama: the camera sits at the origin of an inverted
/// cube while a handful of drifters float past.
#[derive(Debug, Default)]
pub struct PanoramaScene {
    time: f32,
}

impl PanoramaScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneView for PanoramaScene {
    fn title(&self) -> &str {
        "Vr"
    }

    fn camera(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(75.0, aspect).looking_from(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
    }

    fn meshes(&self) -> Vec<(String, Mesh)> {
        vec![
            ("room".to_string(), geometry::cube(ROOM_SIZE).inverted()),
            ("drifter".to_string(), geometry::cube(0.4)),
        ]
    }

    fn light(&self) -> Light {
        Light {
            position: Vec3::new(0.0, ROOM_SIZE * 0.4, 0.0),
            color: Vec3::new(1.0, 0.95, 0.85),
            intensity: 1.4,
        }
    }

    fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    fn objects(&self) -> Vec<SceneObject> {
        let mut objects = vec![SceneObject::new("room", "room").tinted(Vec3::new(0.25, 0.3, 0.45))];
        for slot in 0..DRIFTER_COUNT {
            let phase = slot as f32 * std::f32::consts::TAU / DRIFTER_COUNT as f32;
            let orbit = self.time * 0.4 + phase;
            objects.push(
                SceneObject::new(format!("drifter-{slot}"), "drifter")
                    .at(Vec3::new(
                        orbit.cos() * 3.5,
                        (self.time * 0.9 + phase).sin() * 1.5,
                        orbit.sin() * 3.5,
                    ))
                    .rotated(Vec3::new(self.time * 25.0, self.time * 40.0, 0.0))
                    .tinted(Vec3::new(0.9, 0.6 + 0.4 * phase.sin().abs(), 0.3)),
            );
        }
        objects
    }
}
