use std::path::PathBuf;

/// Malformed BMF structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("bad {field} marker at offset {offset}: expected {expected:?}, found {found:?}")]
    BadMarker {
        field: &'static str,
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("buffer truncated reading {field} at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("{remaining} trailing bytes after footer at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },

    #[error("{field} count {count} does not fit in u32")]
    CountTooLarge { field: &'static str, count: usize },
}

/// Errors while reading a base64-wrapped BMF file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
