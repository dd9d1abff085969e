use crate::vector::Vector3D;

/// A structurally valid mesh whose semantic invariants do not hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("expected 3 normals per face: {faces} faces but {normals} normals")]
    NormalCountMismatch { faces: usize, normals: usize },

    #[error("face {face} corner {corner}: vertex index {index} out of range (vertex count = {num_vertices})")]
    VertexIndexOutOfRange {
        face: usize,
        corner: usize,
        index: u32,
        num_vertices: usize,
    },
}

/// Numerically degenerate input that cannot produce a face normal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("degenerate face normal (mean of vertex normals = {mean})")]
    DegenerateFaceNormal { mean: Vector3D },
}

/// Errors from [`crate::build_mesh`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("face {face}: {source}")]
    Geometry {
        face: usize,
        #[source]
        source: GeometryError,
    },
}
