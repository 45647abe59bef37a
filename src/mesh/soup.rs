//! Raw triangle soup input.
//!
//! A [`TriangleSoup`] is what a mesh loader hands over: a position buffer and
//! a flat triangle index buffer. Nothing about it is shared or welded yet;
//! STL files, for example, usually repeat every corner position per triangle.

use nalgebra::Point3;

use crate::error::{MeshError, Result};

/// A position buffer plus a triangle index buffer.
///
/// The index buffer length is always a multiple of three. Index values are
/// *not* checked on construction; out-of-range entries are reported by the
/// welder as [`MeshError::IndexOutOfRange`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    positions: Vec<Point3<f64>>,
    indices: Vec<usize>,
}

impl TriangleSoup {
    /// Create a soup from a position buffer and a flat index buffer.
    ///
    /// # Example
    /// ```
    /// use facetline::mesh::TriangleSoup;
    /// use nalgebra::Point3;
    ///
    /// let soup = TriangleSoup::new(
    ///     vec![
    ///         Point3::new(0.0, 0.0, 0.0),
    ///         Point3::new(1.0, 0.0, 0.0),
    ///         Point3::new(0.0, 1.0, 0.0),
    ///     ],
    ///     vec![0, 1, 2],
    /// )
    /// .unwrap();
    /// assert_eq!(soup.num_triangles(), 1);
    /// ```
    pub fn new(positions: Vec<Point3<f64>>, indices: Vec<usize>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount { len: indices.len() });
        }
        Ok(Self { positions, indices })
    }

    /// Create a soup from a position buffer and a list of triangle faces.
    pub fn from_triangles(positions: Vec<Point3<f64>>, faces: &[[usize; 3]]) -> Self {
        let indices = faces.iter().flat_map(|f| f.iter().copied()).collect();
        Self { positions, indices }
    }

    /// An empty soup.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The position buffer.
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// The flat triangle index buffer.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of positions in the buffer.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles named by the index buffer.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the soup has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The three vertex indices of triangle `i`.
    ///
    /// # Panics
    /// Panics if `i >= num_triangles()`.
    pub fn triangle(&self, i: usize) -> [usize; 3] {
        let base = i * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Iterate over all triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Consume the soup, returning its buffers.
    pub fn into_parts(self) -> (Vec<Point3<f64>>, Vec<usize>) {
        (self.positions, self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> TriangleSoup {
        TriangleSoup::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_counts() {
        let soup = unit_quad();
        assert_eq!(soup.num_vertices(), 4);
        assert_eq!(soup.num_triangles(), 2);
        assert!(!soup.is_empty());
        assert_eq!(soup.triangle(1), [0, 2, 3]);
        assert_eq!(soup.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_from_triangles_matches_flat() {
        let soup = unit_quad();
        let (positions, _) = soup.clone().into_parts();
        let from_faces = TriangleSoup::from_triangles(positions, &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(soup, from_faces);
    }

    #[test]
    fn test_bad_index_count() {
        let result = TriangleSoup::new(vec![Point3::origin(); 3], vec![0, 1]);
        assert!(matches!(result, Err(MeshError::IndexCount { len: 2 })));
    }

    #[test]
    fn test_empty() {
        let soup = TriangleSoup::empty();
        assert!(soup.is_empty());
        assert_eq!(soup.num_triangles(), 0);
    }
}
