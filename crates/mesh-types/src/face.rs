use serde::Serialize;
use std::fmt;

use crate::errors::GeometryError;
use crate::vector::Vector3D;
use crate::MeshTolerance;

/// A triangular face: three vertex indices into the owning mesh, the
/// per-corner normals paired with them, and the derived unit face normal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    vertex_indices: [u32; 3],
    vertex_normals: [Vector3D; 3],
    face_normal: Vector3D,
}

impl Face {
    /// Create a face, computing its normal from the three corner normals.
    ///
    /// `vertex_normals[k]` belongs to `vertex_indices[k]`. Index bounds are
    /// not checked here; the owning [`crate::Mesh`] does that.
    pub fn new(
        vertex_indices: [u32; 3],
        vertex_normals: [Vector3D; 3],
        tolerance: &MeshTolerance,
    ) -> Result<Self, GeometryError> {
        let face_normal = average_normal(&vertex_normals, tolerance)?;
        Ok(Self {
            vertex_indices,
            vertex_normals,
            face_normal,
        })
    }

    pub fn vertex_indices(&self) -> [u32; 3] {
        self.vertex_indices
    }

    pub fn vertex_normals(&self) -> &[Vector3D; 3] {
        &self.vertex_normals
    }

    /// Unit-length mean of the corner normals.
    pub fn face_normal(&self) -> Vector3D {
        self.face_normal
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.vertex_indices;
        let [n0, n1, n2] = &self.vertex_normals;
        write!(
            f,
            "Face(vertex_indices=[{a}, {b}, {c}], vertex_normals=[{n0}, {n1}, {n2}])"
        )
    }
}

/// Componentwise mean of `normals`, scaled to unit length.
///
/// Accumulates in f64 so three nearly-opposed f32 normals do not lose
/// the residual before the length test.
pub fn average_normal(
    normals: &[Vector3D; 3],
    tolerance: &MeshTolerance,
) -> Result<Vector3D, GeometryError> {
    let n = normals.len() as f64;
    let (sx, sy, sz) = normals.iter().fold((0.0f64, 0.0f64, 0.0f64), |acc, v| {
        (acc.0 + v.x as f64, acc.1 + v.y as f64, acc.2 + v.z as f64)
    });
    let (mx, my, mz) = (sx / n, sy / n, sz / n);
    let len = (mx * mx + my * my + mz * mz).sqrt();

    if !len.is_finite() || len <= tolerance.min_normal_length {
        return Err(GeometryError::DegenerateFaceNormal {
            mean: Vector3D::new(mx as f32, my as f32, mz as f32),
        });
    }

    Ok(Vector3D::new(
        (mx / len) as f32,
        (my / len) as f32,
        (mz / len) as f32,
    ))
}
