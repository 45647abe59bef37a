//! STL (stereolithography) format support.
//!
//! STL has no notion of shared vertices, which makes it the typical input
//! that needs welding before boundary edges mean anything.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::TriangleSoup;

/// Load a triangle soup from an STL file.
///
/// Automatically detects binary vs ASCII format. Every triangle corner gets
/// its own position, in file order.
///
/// # Example
///
/// ```no_run
/// use facetline::io::stl;
///
/// let soup = stl::load("model.stl").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriangleSoup> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    read(&mut file).map_err(|message| MeshError::LoadError {
        path: path.to_path_buf(),
        message,
    })
}

/// Read a triangle soup from any STL source.
pub fn read<R: Read + Seek>(reader: &mut R) -> std::result::Result<TriangleSoup, String> {
    let stl = stl_io::read_stl(reader).map_err(|e| e.to_string())?;

    let mut positions: Vec<Point3<f64>> = Vec::with_capacity(stl.faces.len() * 3);
    for tri in &stl.faces {
        for &vi in &tri.vertices {
            let v = stl
                .vertices
                .get(vi)
                .ok_or_else(|| format!("face references missing vertex {}", vi))?;
            positions.push(Point3::new(v[0] as f64, v[1] as f64, v[2] as f64));
        }
    }

    if positions.is_empty() {
        return Err("STL file contains no triangles".to_string());
    }

    let indices = (0..positions.len()).collect();
    TriangleSoup::new(positions, indices).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SQUARE: &str = "solid square
facet normal 0 0 1
  outer loop
    vertex 0 0 0
    vertex 1 0 0
    vertex 1 1 0
  endloop
endfacet
facet normal 0 0 1
  outer loop
    vertex 0 0 0
    vertex 1 1 0
    vertex 0 1 0
  endloop
endfacet
endsolid square
";

    #[test]
    fn test_read_ascii_keeps_corners() {
        let soup = read(&mut Cursor::new(SQUARE.as_bytes())).unwrap();
        assert_eq!(soup.num_triangles(), 2);
        assert_eq!(soup.num_vertices(), 6);
        assert_eq!(soup.positions()[4], Point3::new(1.0, 1.0, 0.0));
        assert_eq!(soup.triangle(1), [3, 4, 5]);
    }

    #[test]
    fn test_read_garbage() {
        assert!(read(&mut Cursor::new(b"not an stl".to_vec())).is_err());
    }
}
