use tracing::{debug, instrument};

use crate::errors::{BuildError, ValidationError};
use crate::face::Face;
use crate::mesh::{check_indices, Mesh};
use crate::vector::Vector3D;
use crate::MeshTolerance;

/// Assemble a [`Mesh`] from decoded vertex, face-index, and normal arrays.
///
/// `normals` is consumed three at a time in face order: `normals[3i + k]`
/// is the normal for corner `k` of face `i`. The vertex list is moved into
/// the mesh unchanged.
///
/// # Errors
///
/// - [`ValidationError::NormalCountMismatch`] unless `normals.len() == 3 * faces.len()`
/// - [`ValidationError::VertexIndexOutOfRange`] for any index `>= vertices.len()`
/// - [`BuildError::Geometry`] when a face's corner normals average to zero
#[instrument(skip_all, fields(vertices = vertices.len(), faces = faces.len()))]
pub fn build_mesh(
    vertices: Vec<Vector3D>,
    faces: &[[u32; 3]],
    normals: &[Vector3D],
    tolerance: &MeshTolerance,
) -> Result<Mesh, BuildError> {
    if normals.len() != faces.len() * 3 {
        return Err(ValidationError::NormalCountMismatch {
            faces: faces.len(),
            normals: normals.len(),
        }
        .into());
    }

    let mut built = Vec::with_capacity(faces.len());
    for (face_idx, (indices, corner_normals)) in
        faces.iter().zip(normals.chunks_exact(3)).enumerate()
    {
        check_indices(face_idx, *indices, vertices.len())?;
        let corner_normals = [corner_normals[0], corner_normals[1], corner_normals[2]];
        let face = Face::new(*indices, corner_normals, tolerance)
            .map_err(|source| BuildError::Geometry {
                face: face_idx,
                source,
            })?;
        built.push(face);
    }

    let mesh = Mesh::new(vertices, built)?;
    debug!(
        num_vertices = mesh.num_vertices(),
        num_faces = mesh.num_faces(),
        "mesh built"
    );
    Ok(mesh)
}
