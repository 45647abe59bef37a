//! Triangle records with face normals.

use nalgebra::{Point3, Vector3};

use super::index::VertexId;
use crate::error::{MeshError, Result};

/// A triangle of a welded mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex indices in winding order.
    pub vertices: [VertexId; 3],
    /// Unit face normal, or the zero vector for a zero-area triangle.
    pub normal: Vector3<f64>,
}

impl Triangle {
    /// The three directed edges `(v[i], v[(i + 1) % 3])` in winding order.
    pub fn edges(&self) -> [(VertexId, VertexId); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }

    /// Whether the triangle has no usable normal.
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }
}

/// Face normal of the triangle `(p0, p1, p2)`.
///
/// Computed as `normalize((p0 - p1) × (p2 - p1))`, i.e. both edge vectors
/// are taken from the middle vertex. For a counter-clockwise triangle seen
/// from +z this points to -z. Downstream grouping is sign sensitive, so
/// this exact edge choice matters.
///
/// A zero-area triangle yields the zero vector.
pub fn face_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    (p0 - p1)
        .cross(&(p2 - p1))
        .try_normalize(0.0)
        .unwrap_or_else(Vector3::zeros)
}

/// Build one [`Triangle`] per consecutive index triple, in input order.
///
/// # Example
/// ```
/// use facetline::mesh::build_triangles;
/// use nalgebra::{Point3, Vector3};
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ];
/// let triangles = build_triangles(&positions, &[0, 1, 2]).unwrap();
/// assert_eq!(triangles[0].normal, Vector3::new(0.0, 0.0, -1.0));
/// ```
pub fn build_triangles(positions: &[Point3<f64>], indices: &[usize]) -> Result<Vec<Triangle>> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::IndexCount { len: indices.len() });
    }

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    let mut degenerate = 0usize;

    for base in (0..indices.len()).step_by(3) {
        let p0 = corner(positions, indices, base)?;
        let p1 = corner(positions, indices, base + 1)?;
        let p2 = corner(positions, indices, base + 2)?;

        let triangle = Triangle {
            vertices: [
                VertexId::new(indices[base]),
                VertexId::new(indices[base + 1]),
                VertexId::new(indices[base + 2]),
            ],
            normal: face_normal(p0, p1, p2),
        };
        if triangle.is_degenerate() {
            degenerate += 1;
        }
        triangles.push(triangle);
    }

    if degenerate > 0 {
        log::warn!("{} of {} triangles are degenerate (zero normal)", degenerate, triangles.len());
    }

    Ok(triangles)
}

fn corner<'a>(
    positions: &'a [Point3<f64>],
    indices: &[usize],
    position: usize,
) -> Result<&'a Point3<f64>> {
    let index = indices[position];
    positions.get(index).ok_or(MeshError::IndexOutOfRange {
        position,
        index,
        vertex_count: positions.len(),
    })
}
