use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::geometry::{self, Mesh};
use crate::scene::{SceneObject, SceneView};

const FRAGMENT_COUNT: usize = 80;
const BURST_PERIOD: f32 = 4.0;
const GRAVITY: f32 = -6.0;

/// Looping explosion: fragments burst from the origin, arc under gravity
/// and reset each period.
#[derive(Debug)]
pub struct BombScene {
    time: f32,
    fragments: Vec<Fragment>,
}

#[derive(Debug, Clone, Copy)]
struct Fragment {
    velocity: Vec3,
    tint: Vec3,
}

impl Default for BombScene {
    fn default() -> Self {
        let fragments = (0..FRAGMENT_COUNT as u32)
            .map(Fragment::scattered)
            .collect();
        Self {
            time: 0.0,
            fragments,
        }
    }
}

impl BombScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the most recent burst.
    fn burst_age(&self) -> f32 {
        self.time % BURST_PERIOD
    }
}

impl Fragment {
    fn scattered(seed: u32) -> Self {
        let yaw = unit_hash(seed, 1) * std::f32::consts::TAU;
        let pitch = unit_hash(seed, 2) * std::f32::consts::PI - std::f32::consts::FRAC_PI_2;
        let speed = 3.0 + unit_hash(seed, 3) * 4.0;
        let direction = Vec3::new(
            pitch.cos() * yaw.cos(),
            pitch.sin().abs() + 0.3,
            pitch.cos() * yaw.sin(),
        );
        Self {
            velocity: direction.normalize() * speed,
            tint: Vec3::new(1.0, 0.3 + unit_hash(seed, 4) * 0.6, 0.1),
        }
    }

    fn position_at(&self, age: f32) -> Vec3 {
        self.velocity * age + Vec3::new(0.0, 0.5 * GRAVITY * age * age, 0.0)
    }
}

/// Deterministic hash mapped into `[0, 1)`; keeps the burst reproducible
/// without a random-number dependency.
fn unit_hash(seed: u32, salt: u32) -> f32 {
    let mut x = seed
        .wrapping_mul(0x9E37_79B9)
        .wrapping_add(salt.wrapping_mul(0x85EB_CA6B));
    x ^= x >> 15;
    x = x.wrapping_mul(0x2C1B_3C6D);
    x ^= x >> 12;
    (x >> 8) as f32 / 16_777_216.0
}

impl SceneView for BombScene {
    fn title(&self) -> &str {
        "Bomb"
    }

    fn camera(&self, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(65.0, aspect)
            .looking_from(Vec3::new(0.0, 3.0, 12.0), Vec3::new(0.0, 2.0, 0.0))
    }

    fn meshes(&self) -> Vec<(String, Mesh)> {
        vec![
            ("shard".to_string(), geometry::cube(0.18)),
            ("ground".to_string(), geometry::plane(24.0, 24.0)),
        ]
    }

    fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    fn objects(&self) -> Vec<SceneObject> {
        let age = self.burst_age();
        let mut objects = vec![SceneObject::new("ground", "ground").tinted(Vec3::splat(0.2))];
        objects.extend(self.fragments.iter().enumerate().map(|(index, fragment)| {
            SceneObject::new(format!("shard-{index}"), "shard")
                .at(fragment.position_at(age))
                .rotated(Vec3::new(age * 90.0, age * 120.0, 0.0))
                .tinted(fragment.tint)
        }));
        objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_resets_each_period() {
        let mut scene = BombScene::new();
        scene.update(BURST_PERIOD + 0.25);
        assert!((scene.burst_age() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn fragments_start_at_origin_and_rise() {
        let scene = BombScene::new();
        for fragment in &scene.fragments {
            assert_eq!(fragment.position_at(0.0), Vec3::ZERO);
            assert!(fragment.velocity.y > 0.0);
        }
    }

    #[test]
    fn scatter_is_deterministic() {
        let a = Fragment::scattered(7);
        let b = Fragment::scattered(7);
        assert_eq!(a.velocity, b.velocity);
        assert_ne!(a.velocity, Fragment::scattered(8).velocity);
    }
}
