use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::geometry::{self, Mesh};
use crate::scene::{Light, SceneObject, SceneView};

const MOON_ORBIT_RADIUS: f32 = 3.0;
const MOON_ORBIT_DEGREES_PER_SECOND: f32 = 16.0;
const EARTH_SPIN_DEGREES_PER_SECOND: f32 = 9.0;

/// Spinning earth with an orbiting moon, lit from a distant sun.
#[derive(Debug, Default)]
pub struct EarthScene {
    time: f32,
}

impl EarthScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn moon_position(&self) -> Vec3 {
        let angle = (self.time * MOON_ORBIT_DEGREES_PER_SECOND).to_radians();
        Vec3::new(
            angle.cos() * MOON_ORBIT_RADIUS,
            angle.sin() * 0.6,
            angle.sin() * MOON_ORBIT_RADIUS,
        )
    }
}

impl SceneView for EarthScene {
    fn title(&self) -> &str {
        "Earth"
    }

    fn camera(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(45.0, aspect).looking_from(Vec3::new(0.0, 1.5, 7.0), Vec3::ZERO)
    }

    fn meshes(&self) -> Vec<(String, Mesh)> {
        vec![
            ("earth".to_string(), geometry::uv_sphere(1.0, 24, 48)),
            ("moon".to_string(), geometry::uv_sphere(0.27, 16, 32)),
        ]
    }

    fn light(&self) -> Light {
        Light {
            position: Vec3::new(12.0, 3.0, 6.0),
            color: Vec3::new(1.0, 0.98, 0.9),
            intensity: 1.6,
        }
    }

    fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    fn objects(&self) -> Vec<SceneObject> {
        vec![
            SceneObject::new("earth", "earth")
                .rotated(Vec3::new(
                    0.0,
                    self.time * EARTH_SPIN_DEGREES_PER_SECOND,
                    0.0,
                ))
                .tinted(Vec3::new(0.2, 0.45, 0.85)),
            SceneObject::new("moon", "moon")
                .at(self.moon_position())
                .tinted(Vec3::splat(0.7)),
        ]
    }
}
