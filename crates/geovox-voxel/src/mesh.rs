//! In-memory triangulated surface handed over by the mesh-loading
//! collaborator.
//!
//! Loading and parsing mesh files is outside this crate; whatever loads the
//! mesh is responsible for well-formed indices and for preserving the
//! original vertex order.

use glam::DVec3;

use geovox_math::Triangle;

/// A triangulated surface: a vertex list plus triangle index triples.
///
/// A mesh assembled from several disconnected sub-parts is treated as one
/// merged surface; sub-part boundaries have no meaning here.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Create a mesh from vertices and index triples.
    ///
    /// Indices must be in range for `vertices`; out-of-range indices panic
    /// on first access, which indicates a loader bug.
    pub fn new(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The `i`-th triangle with vertices in original order.
    pub fn triangle(&self, i: usize) -> Triangle {
        let [a, b, c] = self.faces[i];
        Triangle::new(
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        )
    }

    /// Iterate over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).map(|i| self.triangle(i))
    }

    /// Append another mesh's geometry to this one (merged-surface view).
    pub fn merge(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|&[a, b, c]| [a + base, b + base, c + base]));
    }
}
