//! Tests for ASCII STL export.

use std::io::{self, Write};

use mesh_types::{build_mesh, Mesh, MeshTolerance, Vector3D};
use proptest::prelude::*;
use stl_export::{export_ascii_stl, write_ascii_stl, StlOptions};

fn v(x: f32, y: f32, z: f32) -> Vector3D {
    Vector3D::new(x, y, z)
}

fn make_triangle_mesh() -> Mesh {
    build_mesh(
        vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0)],
        &[[0, 1, 2]],
        &[v(0.0, 0.0, 1.0); 3],
        &MeshTolerance::default(),
    )
    .unwrap()
}

/// Parse every `vertex x y z` line back into a vector.
fn vertex_lines(stl: &str) -> Vec<Vector3D> {
    stl.lines()
        .filter_map(|l| l.strip_prefix("vertex "))
        .map(|rest| {
            let c: Vec<f32> = rest.split(' ').map(|s| s.parse().unwrap()).collect();
            v(c[0], c[1], c[2])
        })
        .collect()
}

#[test]
fn single_triangle_exact_output() {
    let stl = export_ascii_stl(&make_triangle_mesh(), &StlOptions::default());
    assert_eq!(
        stl,
        "solid mesh\n\
         facet normal 0 0 1\n\
         outer loop\n\
         vertex 0 0 0\n\
         vertex 1 0 0\n\
         vertex 0 1 0\n\
         endloop\n\
         endfacet\n\
         endsolid mesh\n"
    );
}

#[test]
fn empty_mesh_is_just_the_solid() {
    let stl = export_ascii_stl(&Mesh::default(), &StlOptions::default());
    assert_eq!(stl, "solid mesh\nendsolid mesh\n");
}

#[test]
fn custom_solid_name() {
    let options = StlOptions {
        solid_name: "left".to_string(),
    };
    let stl = export_ascii_stl(&make_triangle_mesh(), &options);
    assert!(stl.starts_with("solid left\n"));
    assert!(stl.ends_with("endsolid left\n"));
}

#[test]
fn faces_keep_stored_order_and_resolve_shared_vertices() {
    let mesh = build_mesh(
        vec![
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(0.0, 1.0, 0.0),
        ],
        &[[2, 3, 0], [0, 1, 2]],
        &[v(0.0, 0.0, -1.0); 6],
        &MeshTolerance::default(),
    )
    .unwrap();
    let stl = export_ascii_stl(&mesh, &StlOptions::default());

    assert_eq!(stl.matches("facet normal 0 0 -1\n").count(), 2);
    assert_eq!(
        vertex_lines(&stl),
        vec![
            v(1.0, 1.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(0.0, 0.0, 0.0),
            v(0.0, 0.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
        ]
    );
}

#[test]
fn string_export_matches_streamed_bytes() {
    let options = StlOptions {
        solid_name: "pièce_ø".to_string(),
    };
    let mesh = make_triangle_mesh();
    let mut streamed = Vec::new();
    write_ascii_stl(&mesh, &options, &mut streamed).unwrap();

    let text = export_ascii_stl(&mesh, &options);
    assert_eq!(text.as_bytes(), streamed.as_slice());
    assert!(text.starts_with("solid pièce_ø\n"));
    assert!(text.ends_with("endsolid pièce_ø\n"));
}

#[test]
fn no_line_has_trailing_whitespace() {
    let stl = export_ascii_stl(&make_triangle_mesh(), &StlOptions::default());
    for line in stl.lines() {
        assert_eq!(line, line.trim_end(), "trailing whitespace in {line:?}");
    }
}

/// A sink that fails after accepting `budget` bytes.
struct FailingWriter {
    budget: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() > self.budget {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.budget -= buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_propagate_unchanged() {
    let mut sink = FailingWriter { budget: 20 };
    let err = write_ascii_stl(&make_triangle_mesh(), &StlOptions::default(), &mut sink)
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert_eq!(err.to_string(), "disk full");
}

fn arb_coord() -> impl Strategy<Value = f32> {
    prop_oneof![-1e4f32..1e4, any::<i16>().prop_map(f32::from)]
}

proptest! {
    #[test]
    fn vertex_lines_project_mesh_vertices_exactly(
        coords in prop::collection::vec((arb_coord(), arb_coord(), arb_coord()), 1..12),
        picks in prop::collection::vec(any::<[u16; 3]>(), 1..12),
    ) {
        let vertices: Vec<Vector3D> = coords.into_iter().map(Vector3D::from).collect();
        let n = vertices.len() as u32;
        let faces: Vec<[u32; 3]> = picks
            .iter()
            .map(|p| p.map(|i| u32::from(i) % n))
            .collect();
        let normals = vec![v(0.0, 1.0, 0.0); faces.len() * 3];
        let mesh = build_mesh(vertices, &faces, &normals, &MeshTolerance::default()).unwrap();

        let stl = export_ascii_stl(&mesh, &StlOptions::default());
        let expected: Vec<Vector3D> = faces
            .iter()
            .flat_map(|f| f.map(|i| mesh.vertices()[i as usize]))
            .collect();
        prop_assert_eq!(vertex_lines(&stl), expected);
    }
}
