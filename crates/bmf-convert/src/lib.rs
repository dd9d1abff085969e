//! BMF to ASCII STL conversion: decode, build, and write, one file or many.
//!
//! # Key Components
//!
//! - [`decode_mesh`] — raw BMF bytes to a validated [`Mesh`]
//! - [`convert_bytes`] — raw BMF bytes to STL text
//! - [`convert_file`] — base64 BMF file to STL file, all-or-nothing
//! - [`convert_batch`] — independent files converted in parallel

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bmf_format::{FormatError, LoadError};
use mesh_types::{build_mesh, BuildError, GeometryError, Mesh, MeshTolerance, ValidationError};
use rayon::prelude::*;
use serde::Serialize;
use stl_export::{write_ascii_stl, StlOptions};
use tracing::{info, instrument};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Why a conversion failed.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("face {face}: {source}")]
    Geometry {
        face: usize,
        #[source]
        source: GeometryError,
    },

    #[error("refusing to overwrite input {}", .path.display())]
    OutputIsInput { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Taxonomy name: `format`, `validation`, `geometry`, `job`, or `io`.
    /// Bad base64 counts as a format error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Format(_) | Self::Base64(_) => "format",
            Self::Validation(_) => "validation",
            Self::Geometry { .. } => "geometry",
            Self::OutputIsInput { .. } => "job",
            Self::Io { .. } => "io",
        }
    }
}

impl From<BuildError> for ConvertError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Validation(v) => Self::Validation(v),
            BuildError::Geometry { face, source } => Self::Geometry { face, source },
        }
    }
}

impl From<LoadError> for ConvertError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Io { path, source } => Self::Io { path, source },
            LoadError::Base64(b) => Self::Base64(b),
            LoadError::Format(f) => Self::Format(f),
        }
    }
}

/// A batch whose jobs would overwrite each other or their own inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("{} and {} both write {}", .first.display(), .second.display(), .output.display())]
    DuplicateOutput {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("output of {} is the input itself", .path.display())]
    OutputIsInput { path: PathBuf },
}

// ── Options ─────────────────────────────────────────────────────────────────

/// Settings shared by every conversion in a run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub tolerance: MeshTolerance,
    pub stl: StlOptions,
}

// ── In-memory Conversion ────────────────────────────────────────────────────

/// Decode BMF bytes (already base64-decoded) and build the mesh.
pub fn decode_mesh(bytes: &[u8], tolerance: &MeshTolerance) -> Result<Mesh, ConvertError> {
    let raw = bmf_format::decode(bytes)?;
    Ok(build_mesh(raw.vertices, &raw.faces, &raw.normals, tolerance)?)
}

/// Convert BMF bytes (already base64-decoded) to ASCII STL text.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> Result<String, ConvertError> {
    let mesh = decode_mesh(bytes, &options.tolerance)?;
    Ok(stl_export::export_ascii_stl(&mesh, &options.stl))
}

// ── File Conversion ─────────────────────────────────────────────────────────

/// One input file and where its STL goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    /// Write the STL next to the input, swapping the extension.
    pub fn beside(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = input.with_extension("stl");
        Self { input, output }
    }

    /// Write the STL into `dir`, keeping the input's file stem.
    pub fn into_dir(input: impl Into<PathBuf>, dir: &Path) -> Self {
        let input = input.into();
        // Appended rather than `with_extension`, which would eat the last
        // dotted segment of a stem like `left.v1`.
        let mut name = input
            .file_stem()
            .unwrap_or(input.as_os_str())
            .to_os_string();
        name.push(".stl");
        let output = dir.join(name);
        Self { input, output }
    }
}

/// Outcome of a successful file conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub num_vertices: usize,
    pub num_faces: usize,
    pub bytes_written: usize,
}

/// Convert a base64-wrapped BMF file into an ASCII STL file.
///
/// The whole STL is rendered in memory first; the output file is only
/// created once decoding and building have succeeded, so a failed
/// conversion leaves no output behind.
#[instrument(skip_all, fields(input = %input.display()))]
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport, ConvertError> {
    if input == output {
        return Err(ConvertError::OutputIsInput {
            path: input.to_path_buf(),
        });
    }

    info!("Reading BMF file: {}", input.display());
    let raw = bmf_format::load_file(input)?;
    info!("BMF parsed");

    let mesh = build_mesh(raw.vertices, &raw.faces, &raw.normals, &options.tolerance)?;
    info!("Generated Mesh: {mesh}");

    let mut stl = Vec::new();
    write_ascii_stl(&mesh, &options.stl, &mut stl).map_err(|source| ConvertError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    write_output(output, &stl)?;
    info!("STL file written to: {}", output.display());

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        num_vertices: mesh.num_vertices(),
        num_faces: mesh.num_faces(),
        bytes_written: stl.len(),
    })
}

/// The file handle is dropped (closed) on every return path.
fn write_output(path: &Path, contents: &[u8]) -> Result<(), ConvertError> {
    let io_err = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    writer.write_all(contents).map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// Reject jobs that would clobber their own input or share an output.
///
/// Paths are compared as written (component-wise), not canonicalized.
pub fn check_jobs(jobs: &[ConversionJob]) -> Result<(), BatchError> {
    let mut seen: HashMap<&Path, &Path> = HashMap::with_capacity(jobs.len());
    for job in jobs {
        if job.input == job.output {
            return Err(BatchError::OutputIsInput {
                path: job.input.clone(),
            });
        }
        if let Some(first) = seen.insert(&job.output, &job.input) {
            return Err(BatchError::DuplicateOutput {
                output: job.output.clone(),
                first: first.to_path_buf(),
                second: job.input.clone(),
            });
        }
    }
    Ok(())
}

/// Convert many files in parallel. Results come back in job order, and a
/// failure in one job does not affect the others.
///
/// Nothing runs unless [`check_jobs`] accepts the whole batch.
pub fn convert_batch(
    jobs: &[ConversionJob],
    options: &ConvertOptions,
) -> Result<Vec<Result<ConversionReport, ConvertError>>, BatchError> {
    check_jobs(jobs)?;
    Ok(jobs
        .par_iter()
        .map(|job| convert_file(&job.input, &job.output, options))
        .collect())
}
