use serde::Serialize;
use std::fmt;

use crate::errors::ValidationError;
use crate::face::Face;
use crate::vector::Vector3D;

/// An indexed triangle mesh. Faces refer to vertices by 0-based position.
///
/// Vertices are kept in their original order and never deduplicated.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Mesh {
    vertices: Vec<Vector3D>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Assemble a mesh, rejecting any face that indexes past the vertex list.
    pub fn new(vertices: Vec<Vector3D>, faces: Vec<Face>) -> Result<Self, ValidationError> {
        for (face_idx, face) in faces.iter().enumerate() {
            check_indices(face_idx, face.vertex_indices(), vertices.len())?;
        }
        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Vector3D] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Resolve a face's three corners to positions.
    pub fn face_vertices(&self, face: &Face) -> [Vector3D; 3] {
        // Indices were bounds-checked in `new`.
        face.vertex_indices().map(|i| self.vertices[i as usize])
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mesh(num_vertices={}, num_faces={})",
            self.num_vertices(),
            self.num_faces()
        )
    }
}

pub(crate) fn check_indices(
    face: usize,
    indices: [u32; 3],
    num_vertices: usize,
) -> Result<(), ValidationError> {
    for (corner, &index) in indices.iter().enumerate() {
        if index as usize >= num_vertices {
            return Err(ValidationError::VertexIndexOutOfRange {
                face,
                corner,
                index,
                num_vertices,
            });
        }
    }
    Ok(())
}
