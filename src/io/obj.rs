//! Wavefront `.obj` reader and writer.
//!
//! # Supported format
//! - `v x y z [w]` vertex positions (`w` is ignored).
//! - `f` faces with `i`, `i/t`, `i//n` or `i/t/n` corners; negative indices
//!   count back from the most recent vertex.
//! - `#` comments and blank lines.
//!
//! # Limitations
//! - Texture coordinates, normals, groups, objects and materials are skipped.
//! - Free-form geometry and line elements are not supported (skipped).

use crate::geometry::key::Welding;
use crate::geometry::vector::{Point3, Triangle};
use crate::io::{MeshReader, MeshWriter, PolygonSoup};
use crate::mesh_error::MeshError;
use crate::topology::mesh::VertexIndex;
use std::io::{Read, Write};

/// OBJ reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjReader;

impl ObjReader {
    fn parse_coord(raw: Option<&str>, line: usize) -> Result<f64, MeshError> {
        let raw = raw.ok_or_else(|| parse_err(line, "vertex needs three coordinates"))?;
        raw.parse::<f64>()
            .map_err(|_| parse_err(line, format!("invalid coordinate: {raw}")))
    }

    fn parse_corner(raw: &str, vertex_count: usize, line: usize) -> Result<usize, MeshError> {
        let index = raw.split('/').next().unwrap_or(raw);
        let index = index
            .parse::<i64>()
            .map_err(|_| parse_err(line, format!("invalid face index: {raw}")))?;
        let resolved = match index {
            0 => None,
            i if i > 0 => usize::try_from(i - 1).ok(),
            i => usize::try_from(vertex_count as i64 + i).ok(),
        };
        resolved
            .filter(|&i| i < vertex_count)
            .ok_or_else(|| {
                parse_err(
                    line,
                    format!("face index {index} out of range ({vertex_count} vertices)"),
                )
            })
    }
}

impl MeshReader for ObjReader {
    fn read<R: Read>(&self, mut reader: R) -> Result<PolygonSoup, MeshError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;

        let mut vertices: Vec<Point3> = Vec::new();
        let mut soup = PolygonSoup::default();
        for (i, raw_line) in contents.lines().enumerate() {
            let line = i + 1;
            let mut parts = raw_line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    let x = Self::parse_coord(parts.next(), line)?;
                    let y = Self::parse_coord(parts.next(), line)?;
                    let z = Self::parse_coord(parts.next(), line)?;
                    vertices.push([x, y, z]);
                }
                Some("f") => {
                    let face = parts
                        .map(|c| Self::parse_corner(c, vertices.len(), line).map(|i| vertices[i]))
                        .collect::<Result<Vec<_>, _>>()?;
                    if face.is_empty() {
                        return Err(parse_err(line, "face has no vertices"));
                    }
                    soup.faces.push(face);
                }
                // comments, blank lines and unsupported statements
                _ => {}
            }
        }
        Ok(soup)
    }
}

/// OBJ writer; coincident corners are written once.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjWriter;

impl MeshWriter for ObjWriter {
    fn write<W: Write>(&self, mut writer: W, triangles: &[Triangle]) -> Result<(), MeshError> {
        let mut index = VertexIndex::new(Welding::Exact);
        let mut faces = Vec::with_capacity(triangles.len());
        for (face, t) in triangles.iter().enumerate() {
            let mut ids = [0usize; 3];
            for (corner, &p) in t.iter().enumerate() {
                ids[corner] = index
                    .insert(p)
                    .ok_or(MeshError::NonFiniteCoordinate { face, corner })?
                    .index();
            }
            faces.push(ids);
        }
        for p in index.positions() {
            writeln!(writer, "v {} {} {}", p[0], p[1], p[2])?;
        }
        for [a, b, c] in faces {
            writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn parse_err(line: usize, message: impl Into<String>) -> MeshError {
    MeshError::ObjParse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_AND_TRI: &str = "\
# two faces
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
f -4 -2 -1 2
";

    #[test]
    fn reads_vertices_and_faces() {
        let soup = ObjReader.read(QUAD_AND_TRI.as_bytes()).unwrap();
        assert_eq!(soup.faces.len(), 2);
        assert_eq!(
            soup.faces[0],
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]
        );
        assert_eq!(soup.faces[1].len(), 4);
        assert_eq!(soup.faces[1][0], [0.0, 0.0, 0.0]);
        assert_eq!(soup.faces[1][2], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn quad_is_not_triangular() {
        let soup = ObjReader.read(QUAD_AND_TRI.as_bytes()).unwrap();
        assert_eq!(
            soup.into_mesh(Welding::Exact).unwrap_err(),
            MeshError::NotTriangular {
                face: 1,
                vertices: 4
            }
        );
    }

    #[test]
    fn bad_index_reports_line() {
        let err = ObjReader.read("v 0 0 0\nf 1 2 3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::ObjParse { line: 2, .. }));
        let err = ObjReader.read("v 0 0 x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::ObjParse { line: 1, .. }));
        let err = ObjReader.read("v 0 0 0\nf 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::ObjParse { line: 2, .. }));
    }

    #[test]
    fn writer_shares_vertices() {
        let t: Vec<Triangle> = vec![
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ];
        let mut out = Vec::new();
        ObjWriter.write(&mut out, &t).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert!(text.contains("f 2 4 3"));

        let back = ObjReader.read(text.as_bytes()).unwrap();
        assert_eq!(back.faces, t.iter().map(|t| t.to_vec()).collect::<Vec<_>>());
    }
}
