//! Polygonal scene models.
//!
//! A [`Model`] owns its local-space vertices and a list of [`Face`]s whose indices
//! point into that vertex list. Each model carries its own [`Transform`] and base
//! color; there is no parent/child hierarchy.

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::transform::Transform;

/// A planar polygon described by an ordered loop of vertex indices.
///
/// Index order sets the winding: the face normal is
/// `cross(v1 - v0, v2 - v0)` and should point out of the solid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Faces with fewer than three indices are skipped by the pipeline.
    pub fn is_degenerate(&self) -> bool {
        self.indices.len() < 3
    }
}

/// A 3D model: vertices, faces, pose and base color.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    name: String,
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    transform: Transform,
    base_color: Color,
}

impl Model {
    /// Create a model from raw geometry.
    ///
    /// Every face index must be a valid position in `vertices`; this is checked
    /// in debug builds and indexing panics otherwise.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vec3>,
        faces: Vec<Face>,
        base_color: Color,
    ) -> Self {
        debug_assert!(
            faces
                .iter()
                .flat_map(|f| f.indices())
                .all(|&i| i < vertices.len()),
            "face index out of range"
        );
        Self {
            name: name.into(),
            vertices,
            faces,
            transform: Transform::default(),
            base_color,
        }
    }

    /// An axis-aligned cube of edge length `size` centered on the local origin.
    ///
    /// 8 vertices and 6 quads, each wound so its normal points outward.
    pub fn cube(size: f32, color: Color) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let faces = vec![
            Face::new(vec![0, 3, 2, 1]), // -Z
            Face::new(vec![4, 5, 6, 7]), // +Z
            Face::new(vec![0, 4, 7, 3]), // -X
            Face::new(vec![1, 2, 6, 5]), // +X
            Face::new(vec![3, 7, 6, 2]), // +Y
            Face::new(vec![0, 1, 5, 4]), // -Y
        ];
        Self::new("cube", vertices, faces, color)
    }

    /// A flat `width` x `depth` quad in the local XZ plane, facing +Y.
    pub fn plane(width: f32, depth: f32, color: Color) -> Self {
        let w = width * 0.5;
        let d = depth * 0.5;
        let vertices = vec![
            Vec3::new(-w, 0.0, -d),
            Vec3::new(w, 0.0, -d),
            Vec3::new(w, 0.0, d),
            Vec3::new(-w, 0.0, d),
        ];
        Self::new("plane", vertices, vec![Face::new(vec![0, 3, 2, 1])], color)
    }

    /// Get the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builder-style rename.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    // ============ Transform Accessors ============

    /// Get a reference to the model's transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get a mutable reference to the model's transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Local-space normal of a face from its first three vertices.
    pub fn face_normal(&self, face: &Face) -> Vec3 {
        let [a, b, c] = [0, 1, 2].map(|i| self.vertices[face.indices()[i]]);
        (b - a).cross(c - a).normalize()
    }
}
