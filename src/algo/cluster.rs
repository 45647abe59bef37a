//! Greedy grouping of triangles by face normal.
//!
//! Triangles are visited in input order. Each one joins the *first* existing
//! group (in creation order) whose representative normal is similar to its
//! own, or starts a new group. The representative is the normal of the
//! triangle that created the group and never changes.
//!
//! This is a single-pass partition, not a global clustering: the result
//! depends on triangle order, and two triangles in the same group are only
//! guaranteed to be close to the representative, not to each other.

use nalgebra::Vector3;

use crate::mesh::{GroupId, Triangle};

/// Default cosine similarity threshold (about 8.1 degrees).
pub const DEFAULT_NORMAL_THRESHOLD: f64 = 0.99;

/// A set of triangles sharing a representative normal.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalGroup {
    /// Position of this group in creation order.
    pub id: GroupId,
    /// Normal of the first triangle assigned to the group.
    pub normal: Vector3<f64>,
    /// Member triangles in assignment order.
    pub triangles: Vec<Triangle>,
}

impl NormalGroup {
    fn new(id: usize, first: Triangle) -> Self {
        Self {
            id: GroupId::new(id),
            normal: first.normal,
            triangles: vec![first],
        }
    }

    /// Number of triangles in the group.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the group has no triangles (never true for clusterer output).
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Whether two normals point in nearly the same direction.
///
/// Similar iff `|cos(n1, n2) - 1| <= 1 - threshold`. A zero-length normal is
/// never similar to anything, including another zero-length normal.
/// Anti-parallel normals are not similar.
#[inline]
pub fn normals_similar(n1: &Vector3<f64>, n2: &Vector3<f64>, threshold: f64) -> bool {
    let magnitude_product = n1.norm() * n2.norm();
    if magnitude_product == 0.0 {
        return false;
    }

    let cosine_similarity = n1.dot(n2) / magnitude_product;
    (cosine_similarity - 1.0).abs() <= (1.0 - threshold)
}

/// Partition triangles into normal groups.
///
/// # Example
/// ```
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
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].len(), 2);
/// ```
pub fn cluster_by_normal(triangles: &[Triangle], threshold: f64) -> Vec<NormalGroup> {
    let mut groups: Vec<NormalGroup> = Vec::new();

    for triangle in triangles {
        match groups
            .iter_mut()
            .find(|g| normals_similar(&triangle.normal, &g.normal, threshold))
        {
            Some(group) => group.triangles.push(*triangle),
            None => {
                log::trace!(
                    "new normal group {} with normal ({:.4}, {:.4}, {:.4})",
                    groups.len(),
                    triangle.normal.x,
                    triangle.normal.y,
                    triangle.normal.z
                );
                groups.push(NormalGroup::new(groups.len(), *triangle));
            }
        }
    }

    log::debug!("clustered {} triangles into {} normal groups", triangles.len(), groups.len());
    groups
}
