//! Boundary edges of a normal group.
//!
//! Within one group every triangle contributes its three edges in winding
//! order. An edge used by two triangles is interior to the patch; an edge
//! used by exactly one is on the patch outline. Edges used three or more
//! times (non-manifold) are not part of the outline either.

use std::collections::HashMap;

use super::cluster::NormalGroup;
use crate::mesh::{Triangle, VertexId};

/// A directed vertex pair as first encountered in winding order.
pub type RawEdge = (VertexId, VertexId);

/// Occurrence counts of undirected edges, keyed by the direction first seen.
///
/// Iteration follows first-insertion order.
#[derive(Debug, Default)]
struct EdgeCounter {
    slots: HashMap<RawEdge, usize>,
    edges: Vec<(RawEdge, usize)>,
}

impl EdgeCounter {
    fn add(&mut self, start: VertexId, end: VertexId) {
        let slot = self
            .slots
            .get(&(start, end))
            .or_else(|| self.slots.get(&(end, start)))
            .copied();

        match slot {
            Some(slot) => self.edges[slot].1 += 1,
            None => {
                self.slots.insert((start, end), self.edges.len());
                self.edges.push(((start, end), 1));
            }
        }
    }

    fn singles(self) -> Vec<RawEdge> {
        self.edges
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|(edge, _)| edge)
            .collect()
    }
}

/// Edges that occur exactly once among the given triangles.
///
/// Edges come back in the direction and order in which they were first seen.
/// A collapsed edge (both ends the same vertex) has no extent and is skipped.
pub fn boundary_edges_of(triangles: &[Triangle]) -> Vec<RawEdge> {
    let mut counter = EdgeCounter::default();

    for triangle in triangles {
        for (start, end) in triangle.edges() {
            if start == end {
                continue;
            }
            counter.add(start, end);
        }
    }

    counter.singles()
}

/// Boundary edges of one normal group.
///
/// # Example
/// ```
/// use facetline::algo::boundary::boundary_edges;
/// use facetline::algo::cluster::{cluster_by_normal, DEFAULT_NORMAL_THRESHOLD};
/// use facetline::mesh::build_triangles;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let triangles = build_triangles(&positions, &[0, 1, 2, 0, 2, 3]).unwrap();
/// let groups = cluster_by_normal(&triangles, DEFAULT_NORMAL_THRESHOLD);
///
/// // The shared diagonal 0-2 is interior.
/// assert_eq!(boundary_edges(&groups[0]).len(), 4);
/// ```
pub fn boundary_edges(group: &NormalGroup) -> Vec<RawEdge> {
    boundary_edges_of(&group.triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn tri(v: [usize; 3]) -> Triangle {
        Triangle {
            vertices: [VertexId::new(v[0]), VertexId::new(v[1]), VertexId::new(v[2])],
            normal: Vector3::z(),
        }
    }

    fn pairs(edges: &[RawEdge]) -> Vec<(usize, usize)> {
        edges.iter().map(|(a, b)| (a.index(), b.index())).collect()
    }

    #[test]
    fn test_single_triangle() {
        let edges = boundary_edges_of(&[tri([0, 1, 2])]);
        assert_eq!(pairs(&edges), vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_quad_excludes_diagonal() {
        let edges = boundary_edges_of(&[tri([0, 1, 2]), tri([0, 2, 3])]);
        assert_eq!(pairs(&edges), vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn test_same_direction_counts_as_shared() {
        // Inconsistent winding: both triangles walk 0 -> 1.
        let edges = boundary_edges_of(&[tri([0, 1, 2]), tri([0, 1, 3])]);
        assert_eq!(pairs(&edges), vec![(1, 2), (2, 0), (1, 3), (3, 0)]);
    }

    #[test]
    fn test_non_manifold_edge_excluded() {
        // Three triangles fan around edge 0-1.
        let edges = boundary_edges_of(&[tri([0, 1, 2]), tri([1, 0, 3]), tri([0, 1, 4])]);
        assert!(!pairs(&edges).iter().any(|&(a, b)| (a, b) == (0, 1) || (a, b) == (1, 0)));
        assert_eq!(pairs(&edges), vec![(1, 2), (2, 0), (0, 3), (3, 1), (1, 4), (4, 0)]);
    }

    #[test]
    fn test_closed_tetrahedron_has_no_boundary() {
        let edges = boundary_edges_of(&[
            tri([0, 2, 1]),
            tri([0, 1, 3]),
            tri([1, 2, 3]),
            tri([2, 0, 3]),
        ]);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_collapsed_edge_skipped() {
        let edges = boundary_edges_of(&[tri([0, 0, 2])]);
        // (0, 2) and its reverse (2, 0) cancel; (0, 0) is dropped.
        assert!(edges.is_empty());
    }

    #[test]
    fn test_fan_perimeter_order() {
        // Four triangles around a centre vertex 4 of the unit square.
        let edges = boundary_edges_of(&[
            tri([0, 1, 4]),
            tri([1, 2, 4]),
            tri([2, 3, 4]),
            tri([3, 0, 4]),
        ]);
        assert_eq!(pairs(&edges), vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }
}
