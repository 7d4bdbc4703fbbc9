use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::geometry::{self, Mesh};
use crate::scene::{SceneObject, SceneView};

const TILE_COUNT: usize = 8;
const RING_RADIUS: f32 = 3.2;

/// Landing scene: a carousel of tumbling cubes.
#[derive(Debug, Default)]
pub struct HomeScene {
    time: f32,
}

impl HomeScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneView for HomeScene {
    fn title(&self) -> &str {
        "Home"
    }

    fn camera(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(55.0, aspect).looking_from(Vec3::new(0.0, 3.0, 8.0), Vec3::ZERO)
    }

    fn meshes(&self) -> Vec<(String, Mesh)> {
        vec![("tile".to_string(), geometry::cube(0.9))]
    }

    fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    fn objects(&self) -> Vec<SceneObject> {
        let carousel = self.time * 12.0;
        (0..TILE_COUNT)
            .map(|slot| {
                let angle = (carousel + slot as f32 * 360.0 / TILE_COUNT as f32).to_radians();
                let hue = slot as f32 / TILE_COUNT as f32;
                SceneObject::new(format!("tile-{slot}"), "tile")
                    .at(Vec3::new(
                        angle.cos() * RING_RADIUS,
                        (self.time * 1.5 + slot as f32).sin() * 0.4,
                        angle.sin() * RING_RADIUS,
                    ))
                    .tinted(Vec3::new(0.3 + 0.7 * hue, 0.5, 1.0 - 0.6 * hue))
                    .rotated(Vec3::new(self.time * 35.0, self.time * 50.0, 0.0))
            })
            .collect()
    }
}
