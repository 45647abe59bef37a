//! Wavefront OBJ output for outlines.
//!
//! Each normal group becomes an OBJ group (`g patch_N`), each boundary edge
//! a line element (`l i j`) over two freshly written `v` records, so the
//! file can be dropped straight into any viewer as a wireframe overlay.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::algo::outline::Outline;
use crate::error::{MeshError, Result};

/// Write an outline as OBJ line elements.
///
/// # Example
///
/// ```no_run
/// use facetline::algo::outline::Outline;
/// use facetline::io::obj;
///
/// obj::save_lines(&Outline::default(), "outline.obj").unwrap();
/// ```
pub fn save_lines<P: AsRef<Path>>(outline: &Outline, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_lines(outline, &mut writer).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    writer.flush()?;
    Ok(())
}

/// Write an outline as OBJ text to any writer.
pub fn write_lines<W: Write>(outline: &Outline, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "# Generated by facetline")?;
    writeln!(
        writer,
        "# {} groups, {} boundary edges",
        outline.groups.len(),
        outline.edge_count()
    )?;

    // OBJ vertex numbering is 1-based and global across groups.
    let mut next_vertex = 1usize;
    for (gi, group) in outline.groups.iter().enumerate() {
        if group.is_empty() {
            continue;
        }
        writeln!(writer, "g patch_{}", gi)?;
        for edge in &group.edges {
            writeln!(writer, "v {} {} {}", edge.a_pos.x, edge.a_pos.y, edge.a_pos.z)?;
            writeln!(writer, "v {} {} {}", edge.b_pos.x, edge.b_pos.y, edge.b_pos.z)?;
            writeln!(writer, "l {} {}", next_vertex, next_vertex + 1)?;
            next_vertex += 2;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::edge::{Edge, EdgeGroup};
    use crate::mesh::VertexId;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_write_lines() {
        let edge = Edge::new(
            VertexId::new(1),
            VertexId::new(0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        );
        let outline = Outline {
            groups: vec![
                EdgeGroup { normal: Vector3::z(), edges: vec![] },
                EdgeGroup { normal: -Vector3::z(), edges: vec![edge, edge] },
            ],
            vertex_count_before: 2,
            vertex_count_after: 2,
            triangle_count: 2,
        };

        let mut out = Vec::new();
        write_lines(&outline, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "# 2 groups, 2 boundary edges");
        assert_eq!(lines[2], "g patch_1");
        assert_eq!(lines[3], "v 0 0 0");
        assert_eq!(lines[4], "v 1 0 0");
        assert_eq!(lines[5], "l 1 2");
        assert_eq!(lines[8], "l 3 4");
        assert_eq!(lines.len(), 9);
    }
}
