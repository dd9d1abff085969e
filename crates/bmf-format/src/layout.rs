//! Fixed markers of the BMF layout.
//!
//! ```text
//! "0FMB"                      header
//! "0VoS" u32 n  n × [f32; 3]  "0VoE"   vertices
//! "0GoS"                               start of group
//! "0FoS" u32 m  m × [u32; 3]  "0FoE"   faces
//! "0NoS" u32 k  k × [f32; 3]  "0NoE"   normals (k = 3m for a valid mesh)
//! "0GoE"                               end of group
//! "0BMF"                      footer
//! ```
//!
//! All integers and floats are little-endian.

pub type Marker = [u8; 4];

pub const HEADER: Marker = *b"0FMB";
pub const START_OF_VERTICES: Marker = *b"0VoS";
pub const END_OF_VERTICES: Marker = *b"0VoE";
pub const START_OF_GROUP: Marker = *b"0GoS";
pub const START_OF_FACES: Marker = *b"0FoS";
pub const END_OF_FACES: Marker = *b"0FoE";
pub const START_OF_NORMALS: Marker = *b"0NoS";
pub const END_OF_NORMALS: Marker = *b"0NoE";
pub const END_OF_GROUP: Marker = *b"0GoE";
pub const FOOTER: Marker = *b"0BMF";

/// Bytes in one encoded vector (3 × f32).
pub const VEC3_SIZE: usize = 12;

/// Bytes in one encoded face (3 × u32).
pub const FACE_SIZE: usize = 12;

/// Size of a buffer holding no vertices, faces, or normals: ten markers
/// and three counts.
pub const EMPTY_SIZE: usize = 10 * 4 + 3 * 4;
