use mesh_types::Vector3D;
use tracing::{debug, instrument};

use crate::errors::FormatError;
use crate::layout::{self, Marker, FACE_SIZE, VEC3_SIZE};

/// The three arrays carried by a BMF buffer, exactly as stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMesh {
    pub vertices: Vec<Vector3D>,
    pub faces: Vec<[u32; 3]>,
    pub normals: Vec<Vector3D>,
}

/// Decode a BMF buffer (already base64-decoded).
///
/// The parse is strict: every marker must match at its offset, every
/// declared count must be fully present, and nothing may follow the footer.
/// Vertex indices and the normal count are not checked here; see
/// [`mesh_types::build_mesh`].
#[instrument(skip_all, fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<RawMesh, FormatError> {
    let mut r = Reader::new(bytes);

    r.marker("header", layout::HEADER)?;

    r.marker("start_of_vertices", layout::START_OF_VERTICES)?;
    let num_vertices = r.u32("num_vertices")?;
    let vertices = r.vectors("vertices", num_vertices)?;
    r.marker("end_of_vertices", layout::END_OF_VERTICES)?;

    r.marker("start_of_group", layout::START_OF_GROUP)?;

    r.marker("start_of_faces", layout::START_OF_FACES)?;
    let num_faces = r.u32("num_faces")?;
    let faces = r.faces("faces", num_faces)?;
    r.marker("end_of_faces", layout::END_OF_FACES)?;

    r.marker("start_of_normals", layout::START_OF_NORMALS)?;
    let num_normals = r.u32("num_normals")?;
    let normals = r.vectors("normals", num_normals)?;
    r.marker("end_of_normals", layout::END_OF_NORMALS)?;

    r.marker("end_of_group", layout::END_OF_GROUP)?;
    r.marker("footer", layout::FOOTER)?;
    r.finish()?;

    debug!(num_vertices, num_faces, num_normals, "BMF decoded");
    Ok(RawMesh {
        vertices,
        faces,
        normals,
    })
}

/// Forward-only little-endian reader over a borrowed buffer.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, field: &'static str, n: usize) -> Result<&'a [u8], FormatError> {
        if n > self.remaining() {
            return Err(FormatError::Truncated {
                field,
                offset: self.pos,
                needed: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn marker(&mut self, field: &'static str, expected: Marker) -> Result<(), FormatError> {
        let offset = self.pos;
        let found = self.take(field, expected.len())?;
        if found != &expected[..] {
            return Err(FormatError::BadMarker {
                field,
                offset,
                expected: expected.escape_ascii().to_string(),
                found: found.escape_ascii().to_string(),
            });
        }
        Ok(())
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, FormatError> {
        let b = self.take(field, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Claim `count` records of `size` bytes up front so a corrupt count
    /// fails before anything is allocated.
    fn records(
        &mut self,
        field: &'static str,
        count: u32,
        size: usize,
    ) -> Result<&'a [u8], FormatError> {
        let total = (count as usize).saturating_mul(size);
        self.take(field, total)
    }

    fn vectors(&mut self, field: &'static str, count: u32) -> Result<Vec<Vector3D>, FormatError> {
        let bytes = self.records(field, count, VEC3_SIZE)?;
        Ok(bytes
            .chunks_exact(VEC3_SIZE)
            .map(|c| {
                Vector3D::new(
                    f32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                    f32::from_le_bytes([c[4], c[5], c[6], c[7]]),
                    f32::from_le_bytes([c[8], c[9], c[10], c[11]]),
                )
            })
            .collect())
    }

    fn faces(&mut self, field: &'static str, count: u32) -> Result<Vec<[u32; 3]>, FormatError> {
        let bytes = self.records(field, count, FACE_SIZE)?;
        Ok(bytes
            .chunks_exact(FACE_SIZE)
            .map(|c| {
                [
                    u32::from_le_bytes([c[0], c[1], c[2], c[3]]),
                    u32::from_le_bytes([c[4], c[5], c[6], c[7]]),
                    u32::from_le_bytes([c[8], c[9], c[10], c[11]]),
                ]
            })
            .collect())
    }

    fn finish(self) -> Result<(), FormatError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(FormatError::TrailingBytes {
                offset: self.pos,
                remaining,
            }),
        }
    }
}
