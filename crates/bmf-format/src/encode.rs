use mesh_types::Vector3D;

use crate::decode::RawMesh;
use crate::errors::FormatError;
use crate::layout::{self, EMPTY_SIZE, FACE_SIZE, VEC3_SIZE};

/// Encode arrays into a BMF buffer that [`crate::decode`] accepts.
///
/// Counts are written as given; no mesh invariants are checked, so a
/// deliberately invalid mesh (mismatched normals, bad indices) can be
/// encoded for testing the layers above.
pub fn encode(raw: &RawMesh) -> Result<Vec<u8>, FormatError> {
    let size = EMPTY_SIZE
        + raw.vertices.len() * VEC3_SIZE
        + raw.faces.len() * FACE_SIZE
        + raw.normals.len() * VEC3_SIZE;
    let mut buf = Vec::with_capacity(size);

    buf.extend_from_slice(&layout::HEADER);

    buf.extend_from_slice(&layout::START_OF_VERTICES);
    put_count(&mut buf, "num_vertices", raw.vertices.len())?;
    put_vectors(&mut buf, &raw.vertices);
    buf.extend_from_slice(&layout::END_OF_VERTICES);

    buf.extend_from_slice(&layout::START_OF_GROUP);

    buf.extend_from_slice(&layout::START_OF_FACES);
    put_count(&mut buf, "num_faces", raw.faces.len())?;
    for face in &raw.faces {
        for index in face {
            buf.extend_from_slice(&index.to_le_bytes());
        }
    }
    buf.extend_from_slice(&layout::END_OF_FACES);

    buf.extend_from_slice(&layout::START_OF_NORMALS);
    put_count(&mut buf, "num_normals", raw.normals.len())?;
    put_vectors(&mut buf, &raw.normals);
    buf.extend_from_slice(&layout::END_OF_NORMALS);

    buf.extend_from_slice(&layout::END_OF_GROUP);
    buf.extend_from_slice(&layout::FOOTER);

    Ok(buf)
}

fn put_count(buf: &mut Vec<u8>, field: &'static str, count: usize) -> Result<(), FormatError> {
    let n = u32::try_from(count).map_err(|_| FormatError::CountTooLarge { field, count })?;
    buf.extend_from_slice(&n.to_le_bytes());
    Ok(())
}

fn put_vectors(buf: &mut Vec<u8>, vectors: &[Vector3D]) {
    for v in vectors {
        for c in v.to_array() {
            buf.extend_from_slice(&c.to_le_bytes());
        }
    }
}
