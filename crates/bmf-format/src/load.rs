use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, instrument};

use crate::decode::{decode, RawMesh};
use crate::errors::LoadError;

/// Decode base64 text into the raw BMF bytes.
///
/// ASCII whitespace is ignored so line-wrapped files decode the same as
/// single-line ones.
pub fn unwrap_base64(text: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}

/// Decode a base64-wrapped BMF buffer.
pub fn load_base64(text: &[u8]) -> Result<RawMesh, LoadError> {
    let bytes = unwrap_base64(text)?;
    Ok(decode(&bytes)?)
}

/// Read and decode a base64-wrapped BMF file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_file(path: impl AsRef<Path>) -> Result<RawMesh, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = text.len(), "read BMF file");
    load_base64(&text)
}
