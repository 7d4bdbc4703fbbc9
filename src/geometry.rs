//! Procedural meshes feeding the renderer.  Vertices are interleaved
//! position + normal (six floats), indexed as `u32` triangle lists.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub const FLOATS_PER_VERTEX: usize = 6;

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::FLOATS_PER_VERTEX
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z,
        ]);
    }

    /// Flips normals and winding, turning a solid into a room seen from
    /// the inside.
    pub fn inverted(mut self) -> Self {
        for vertex in self.vertices.chunks_mut(Self::FLOATS_PER_VERTEX) {
            vertex[3] = -vertex[3];
            vertex[4] = -vertex[4];
            vertex[5] = -vertex[5];
        }
        for triangle in self.indices.chunks_mut(3) {
            triangle.swap(1, 2);
        }
        self
    }
}

/// Axis-aligned cube with per-face normals.
pub fn cube(size: f32) -> Mesh {
    let half = size * 0.5;
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let mut mesh = Mesh::default();
    for (normal, tangent, bitangent) in faces {
        let base = mesh.vertex_count() as u32;
        for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = (normal + tangent * u + bitangent * v) * half;
            mesh.push_vertex(position, normal);
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Latitude/longitude sphere with smooth normals.
pub fn uv_sphere(radius: f32, rings: u32, segments: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for ring in 0..=rings {
        let theta = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for segment in 0..=segments {
            let phi = std::f32::consts::TAU * segment as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            mesh.push_vertex(normal * radius, normal);
        }
    }
    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            mesh.indices
                .extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    mesh
}

/// Flat ground quad in the XZ plane, normal up.
pub fn plane(width: f32, depth: f32) -> Mesh {
    let (hw, hd) = (width * 0.5, depth * 0.5);
    let mut mesh = Mesh::default();
    for (x, z) in [(-hw, -hd), (hw, -hd), (hw, hd), (-hw, hd)] {
        mesh.push_vertex(Vec3::new(x, 0.0, z), Vec3::Y);
    }
    mesh.indices.extend_from_slice(&[0, 2, 1, 0, 3, 2]);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_index(mesh: &Mesh) -> u32 {
        mesh.indices.iter().copied().max().unwrap()
    }

    #[test]
    fn cube_has_four_vertices_per_face() {
        let mesh = cube(2.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!((max_index(&mesh) as usize) < mesh.vertex_count());
    }

    #[test]
    fn sphere_normals_are_unit_length() {
        let mesh = uv_sphere(3.0, 8, 12);
        for vertex in mesh.vertices.chunks(Mesh::FLOATS_PER_VERTEX) {
            let normal = Vec3::new(vertex[3], vertex[4], vertex[5]);
            assert!((normal.length() - 1.0).abs() < 1e-4);
            let position = Vec3::new(vertex[0], vertex[1], vertex[2]);
            assert!((position.length() - 3.0).abs() < 1e-3);
        }
        assert!((max_index(&mesh) as usize) < mesh.vertex_count());
    }

    #[test]
    fn inverted_flips_normals_and_winding() {
        let solid = cube(1.0);
        let room = cube(1.0).inverted();
        assert_eq!(solid.vertices[3], -room.vertices[3]);
        assert_eq!(solid.indices[1], room.indices[2]);
        assert_eq!(solid.indices[2], room.indices[1]);
    }
}
