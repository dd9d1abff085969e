//! ASCII STL export from a [`Mesh`].
//!
//! ```text
//! solid <name>
//! facet normal nx ny nz
//! outer loop
//! vertex x y z
//! vertex x y z
//! vertex x y z
//! endloop
//! endfacet
//! ...
//! endsolid <name>
//! ```
//!
//! Lines are not indented and end with a single `\n`. Numbers use the
//! shortest decimal form that reads back as the same `f32` (`1.0` is
//! written `1`).

use std::io::{self, Write};

use mesh_types::{Mesh, Vector3D};
use tracing::{debug, instrument};

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlOptions {
    /// Name written after `solid` and `endsolid`.
    pub solid_name: String,
}

impl Default for StlOptions {
    fn default() -> Self {
        Self {
            solid_name: "mesh".to_string(),
        }
    }
}

/// Stream a mesh as ASCII STL into `out`.
///
/// Faces are written in stored order, each with its face normal and its
/// three corners resolved through the mesh's vertex list. Write errors
/// from `out` are returned unchanged; `out` is not flushed.
#[instrument(skip_all, fields(faces = mesh.num_faces()))]
pub fn write_ascii_stl<W: Write>(
    mesh: &Mesh,
    options: &StlOptions,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "solid {}", options.solid_name)?;

    for face in mesh.faces() {
        write_vector(out, "facet normal", face.face_normal())?;
        writeln!(out, "outer loop")?;
        for vertex in mesh.face_vertices(face) {
            write_vector(out, "vertex", vertex)?;
        }
        writeln!(out, "endloop")?;
        writeln!(out, "endfacet")?;
    }

    writeln!(out, "endsolid {}", options.solid_name)?;
    debug!("ASCII STL written");
    Ok(())
}

/// Render a mesh as an ASCII STL string.
pub fn export_ascii_stl(mesh: &Mesh, options: &StlOptions) -> String {
    let mut buf = Vec::with_capacity(estimated_size(mesh, options));
    write_ascii_stl(mesh, options, &mut buf).expect("writing to Vec<u8> should never fail");
    String::from_utf8(buf).expect("STL text is built from UTF-8 pieces")
}

fn write_vector<W: Write>(out: &mut W, keyword: &str, v: Vector3D) -> io::Result<()> {
    writeln!(out, "{} {} {} {}", keyword, v.x, v.y, v.z)
}

fn estimated_size(mesh: &Mesh, options: &StlOptions) -> usize {
    2 * options.solid_name.len() + 20 + mesh.num_faces() * 200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_line_has_no_trailing_space() {
        let mut buf = Vec::new();
        write_vector(&mut buf, "vertex", Vector3D::new(1.5, -0.0, 2.0)).unwrap();
        assert_eq!(buf, b"vertex 1.5 -0 2\n");
    }

    #[test]
    fn default_solid_name_is_mesh() {
        assert_eq!(StlOptions::default().solid_name, "mesh");
    }
}
