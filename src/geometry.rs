use std::f32::consts::PI;

use crate::renderer::Vertex;

/// UV sphere centered on the origin.
#[derive(Debug, Clone)]
pub struct SphereGeometry {
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let (sin_phi, cos_phi) = (v * PI).sin_cos();
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let (sin_theta, cos_theta) = (u * 2.0 * PI).sin_cos();
                let normal = glam::Vec3::new(-cos_theta * sin_phi, cos_phi, sin_theta * sin_phi);
                vertices.push(Vertex {
                    position: (normal * radius).to_array(),
                    normal: normal.normalize_or_zero().to_array(),
                });
            }
        }

        let row = width_segments + 1;
        let mut indices = Vec::with_capacity((width_segments * (height_segments - 1) * 6) as usize);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // The pole rows collapse to a point, one triangle per quad is degenerate there.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            radius,
            width_segments,
            height_segments,
            vertices,
            indices,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn segments(&self) -> (u32, u32) {
        (self.width_segments, self.height_segments)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let sphere = SphereGeometry::new(3.0, 64, 64);
        assert_eq!(sphere.vertices().len(), 65 * 65);
        assert_eq!(sphere.indices().len(), 64 * (2 * 64 - 2) * 3);
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let sphere = SphereGeometry::new(3.0, 16, 8);
        for vertex in sphere.vertices() {
            let position = glam::Vec3::from_array(vertex.position);
            let normal = glam::Vec3::from_array(vertex.normal);
            assert!((position.length() - 3.0).abs() < 1e-4);
            assert!((normal.length() - 1.0).abs() < 1e-4);
            assert!(normal.dot(position.normalize()) > 0.999);
        }
    }

    #[test]
    fn indices_are_in_bounds() {
        let sphere = SphereGeometry::new(1.0, 8, 6);
        let count = sphere.vertices().len() as u32;
        assert!(sphere.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn triangles_face_outward() {
        let sphere = SphereGeometry::new(1.0, 12, 8);
        for triangle in sphere.indices().chunks(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                .map(|i| glam::Vec3::from_array(sphere.vertices()[i as usize].position));
            let face_normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(face_normal.dot(center) > 0.0);
        }
    }

    #[test]
    fn segment_counts_are_clamped() {
        let sphere = SphereGeometry::new(1.0, 0, 0);
        assert_eq!(sphere.segments(), (3, 2));
    }
}
