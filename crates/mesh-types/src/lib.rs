//! In-memory triangle mesh: vectors, faces with derived normals, and the
//! builder that assembles them from decoded arrays.

pub mod build;
pub mod errors;
pub mod face;
pub mod mesh;
pub mod vector;

pub use build::build_mesh;
pub use errors::{BuildError, GeometryError, ValidationError};
pub use face::Face;
pub use mesh::Mesh;
pub use vector::Vector3D;

/// Numeric thresholds applied while building faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTolerance {
    /// A mean corner normal at or below this length has no direction.
    /// Zero rejects only exact cancellation.
    pub min_normal_length: f64,
}

impl Default for MeshTolerance {
    fn default() -> Self {
        Self {
            min_normal_length: 0.0,
        }
    }
}
