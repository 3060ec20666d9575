//! Pin markers and billboard label quads, rebuilt on the CPU every frame

use crate::sphere::{uv_sphere, SphereMesh};
use bytemuck::{Pod, Zeroable};
use terraglobe_core::{billboard, Point3f, Vector3};

/// Marker sphere radius, matching the original pin size on a unit globe
pub const MARKER_RADIUS: f32 = 0.02;

/// Marker color (red, opaque)
pub const MARKER_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Label quad size in world units (width, height)
pub const LABEL_SIZE: (f32, f32) = (0.3, 0.15);

/// Label quad color (white at 80% opacity)
pub const LABEL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.8];

/// Vertex data for flat-colored geometry
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FlatVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl FlatVertex {
    /// Vertex buffer layout descriptor
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FlatVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Accumulates marker spheres and label quads into one vertex/index pair.
///
/// Marker positions depend on the globe's current rotation and label
/// orientation on the current viewer position, so the mesh is cleared and
/// rebuilt each frame; the low-resolution template sphere is generated once.
pub struct FlatMeshBuilder {
    template: SphereMesh,
    pub vertices: Vec<FlatVertex>,
    pub indices: Vec<u32>,
}

impl FlatMeshBuilder {
    pub fn new() -> Self {
        Self {
            template: uv_sphere(1.0, 8, 8),
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a marker sphere at a world position
    pub fn push_marker(&mut self, center: Point3f, radius: f32, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for vertex in &self.template.vertices {
            self.vertices.push(FlatVertex {
                position: [
                    center.x + radius * vertex.position[0],
                    center.y + radius * vertex.position[1],
                    center.z + radius * vertex.position[2],
                ],
                color,
            });
        }
        self.indices
            .extend(self.template.indices.iter().map(|i| base + i));
    }

    /// Append a quad centered on `anchor`, oriented to face the viewer
    pub fn push_label_quad(
        &mut self,
        anchor: Point3f,
        viewer: Point3f,
        size: (f32, f32),
        color: [f32; 4],
    ) {
        let orientation = billboard::face_viewer(anchor, viewer);
        let (half_w, half_h) = (size.0 / 2.0, size.1 / 2.0);
        let corners = [
            Vector3::new(-half_w, -half_h, 0.0),
            Vector3::new(half_w, -half_h, 0.0),
            Vector3::new(half_w, half_h, 0.0),
            Vector3::new(-half_w, half_h, 0.0),
        ];

        let base = self.vertices.len() as u32;
        for corner in corners {
            let world = anchor + orientation * corner;
            self.vertices.push(FlatVertex {
                position: [world.x, world.y, world.z],
                color,
            });
        }
        self.indices
            .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
}

impl Default for FlatMeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clear_resets_the_mesh() {
        let mut builder = FlatMeshBuilder::new();
        builder.push_marker(Point3f::new(0.0, 1.02, 0.0), MARKER_RADIUS, MARKER_COLOR);
        assert!(!builder.is_empty());
        builder.clear();
        assert!(builder.is_empty());
        assert!(builder.vertices.is_empty());
    }

    #[test]
    fn test_marker_vertices_surround_the_center() {
        let center = Point3f::new(0.3, 0.9, -0.2);
        let mut builder = FlatMeshBuilder::new();
        builder.push_marker(center, MARKER_RADIUS, MARKER_COLOR);

        for vertex in &builder.vertices {
            let p = Point3f::new(vertex.position[0], vertex.position[1], vertex.position[2]);
            assert_relative_eq!((p - center).norm(), MARKER_RADIUS, epsilon = 1e-5);
            assert_eq!(vertex.color, MARKER_COLOR);
        }
    }

    #[test]
    fn test_two_markers_index_disjoint_vertices() {
        let mut builder = FlatMeshBuilder::new();
        builder.push_marker(Point3f::origin(), 0.02, MARKER_COLOR);
        let split = builder.indices.len();
        builder.push_marker(Point3f::new(1.0, 0.0, 0.0), 0.02, MARKER_COLOR);

        let per_marker = builder.vertices.len() as u32 / 2;
        assert!(builder.indices[..split].iter().all(|&i| i < per_marker));
        assert!(builder.indices[split..].iter().all(|&i| i >= per_marker));
    }

    #[test]
    fn test_label_quad_faces_the_viewer() {
        let anchor = Point3f::new(0.0, 1.12, 0.0);
        let viewer = Point3f::new(0.0, 0.0, 3.0);
        let mut builder = FlatMeshBuilder::new();
        builder.push_label_quad(anchor, viewer, LABEL_SIZE, LABEL_COLOR);

        assert_eq!(builder.vertices.len(), 4);
        assert_eq!(builder.indices.len(), 6);

        // The quad normal (from its winding) points toward the viewer.
        let p = |i: usize| {
            Point3f::new(
                builder.vertices[i].position[0],
                builder.vertices[i].position[1],
                builder.vertices[i].position[2],
            )
        };
        let normal = (p(1) - p(0)).cross(&(p(2) - p(0))).normalize();
        let to_viewer = (viewer - anchor).normalize();
        assert_relative_eq!(normal.dot(&to_viewer), 1.0, epsilon = 1e-4);

        // Corners stay centered on the anchor.
        let centroid = (p(0).coords + p(1).coords + p(2).coords + p(3).coords) / 4.0;
        assert_relative_eq!(centroid, anchor.coords, epsilon = 1e-5);
    }

    #[test]
    fn test_label_quad_has_requested_extent() {
        let anchor = Point3f::new(0.4, 1.0, 0.3);
        let viewer = Point3f::new(2.0, 2.0, 2.0);
        let mut builder = FlatMeshBuilder::new();
        builder.push_label_quad(anchor, viewer, (0.3, 0.15), LABEL_COLOR);

        let p = |i: usize| {
            Point3f::new(
                builder.vertices[i].position[0],
                builder.vertices[i].position[1],
                builder.vertices[i].position[2],
            )
        };
        assert_relative_eq!((p(1) - p(0)).norm(), 0.3, epsilon = 1e-5);
        assert_relative_eq!((p(3) - p(0)).norm(), 0.15, epsilon = 1e-5);
    }
}
