//! Renderable edges.
//!
//! Turns raw vertex-index pairs into [`Edge`] records that carry their
//! endpoint positions, so a renderer can draw them without the vertex buffer.

use std::hash::{Hash, Hasher};

use nalgebra::{Point3, Vector3};

use super::boundary::RawEdge;
use crate::error::{MeshError, Result};
use crate::mesh::VertexId;

/// An undirected edge with its endpoint positions.
///
/// The smaller vertex index is always stored first, and its position moves
/// with it. Equality and hashing only look at the index pair.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Smaller vertex index.
    pub a: VertexId,
    /// Larger vertex index.
    pub b: VertexId,
    /// Position of `a`.
    pub a_pos: Point3<f64>,
    /// Position of `b`.
    pub b_pos: Point3<f64>,
}

impl Edge {
    /// Create a canonical edge from two endpoints in any order.
    ///
    /// ```
    /// use facetline::algo::edge::Edge;
    /// use facetline::mesh::VertexId;
    /// use nalgebra::Point3;
    ///
    /// let e = Edge::new(
    ///     VertexId::new(5),
    ///     VertexId::new(2),
    ///     Point3::new(5.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    /// );
    /// assert_eq!(e.a, VertexId::new(2));
    /// assert_eq!(e.a_pos, Point3::new(2.0, 0.0, 0.0));
    /// ```
    pub fn new(v1: VertexId, v2: VertexId, p1: Point3<f64>, p2: Point3<f64>) -> Self {
        if v1 > v2 {
            Self { a: v2, b: v1, a_pos: p2, b_pos: p1 }
        } else {
            Self { a: v1, b: v2, a_pos: p1, b_pos: p2 }
        }
    }

    /// The canonical index pair.
    pub fn key(&self) -> (VertexId, VertexId) {
        (self.a, self.b)
    }

    /// Segment direction from `a_pos` to `b_pos`.
    pub fn vector(&self) -> Vector3<f64> {
        self.b_pos - self.a_pos
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Boundary edges of one normal group, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGroup {
    /// Representative normal of the originating group.
    pub normal: Vector3<f64>,
    /// Boundary edges in extraction order.
    pub edges: Vec<Edge>,
}

impl EdgeGroup {
    /// Number of edges in the group.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the group has no boundary edges (e.g. a closed patch).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Attach endpoint positions to raw edges, preserving order.
pub fn materialize(raw: &[RawEdge], positions: &[Point3<f64>]) -> Result<Vec<Edge>> {
    let lookup = |position: usize, v: VertexId| {
        positions.get(v.index()).copied().ok_or(MeshError::IndexOutOfRange {
            position,
            index: v.index(),
            vertex_count: positions.len(),
        })
    };

    raw.iter()
        .enumerate()
        .map(|(i, &(v1, v2))| -> Result<Edge> {
            Ok(Edge::new(v1, v2, lookup(2 * i, v1)?, lookup(2 * i + 1, v2)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_canonical_order_swaps_positions() {
        let e = Edge::new(v(3), v(1), Point3::new(3.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(e.key(), (v(1), v(3)));
        assert_eq!(e.a_pos, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(e.b_pos, Point3::new(3.0, 0.0, 0.0));
        assert!((e.length() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_identity_ignores_positions() {
        let a = Edge::new(v(0), v(1), Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let b = Edge::new(v(1), v(0), Point3::new(9.0, 9.0, 9.0), Point3::origin());
        assert_eq!(a, b);

        let set: HashSet<Edge> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_materialize_looks_up_positions() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let edges = materialize(&[(v(2), v(0)), (v(0), v(1))], &positions).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].key(), (v(0), v(2)));
        assert_eq!(edges[0].a_pos, positions[0]);
        assert_eq!(edges[0].b_pos, positions[2]);
        assert_eq!(edges[1].key(), (v(0), v(1)));
    }

    #[test]
    fn test_materialize_out_of_range() {
        let positions = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let result = materialize(&[(v(0), v(1)), (v(1), v(4))], &positions);
        assert!(matches!(
            result,
            Err(MeshError::IndexOutOfRange { position: 3, index: 4, vertex_count: 2 })
        ));
    }
}
