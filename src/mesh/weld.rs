//! Tolerant vertex welding.
//!
//! Loaders such as STL emit one position per triangle corner, so shared
//! corners show up as separate (possibly slightly different) points. Welding
//! collapses them into one canonical vertex and rewrites the index buffer,
//! which is what lets the boundary extractor recognise shared edges at all.
//!
//! Two points are equal when they differ by less than `epsilon` on each of
//! x, y and z independently. The first vertex seen at a position owns the
//! slot; new indices follow order of first appearance.
//!
//! # Strategies
//!
//! - [`WeldStrategy::Grid`] buckets points into cells of size `epsilon` and
//!   probes the 27 surrounding cells, so any pair within tolerance is found
//!   regardless of where cell boundaries fall.
//! - [`WeldStrategy::Exact`] keys points by their raw coordinate bits. Only
//!   bit-identical points merge; near-duplicates with different bits do not.

use std::collections::HashMap;

use nalgebra::Point3;

use super::soup::TriangleSoup;
use crate::error::{MeshError, Result};

/// Default per-axis welding tolerance.
pub const DEFAULT_WELD_EPSILON: f64 = 1e-6;

/// How candidate duplicates are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeldStrategy {
    /// Spatial grid with cell size `epsilon` and a 27-cell neighbourhood probe.
    #[default]
    Grid,
    /// Bit-pattern keyed lookup; merges exact duplicates only.
    Exact,
}

/// Options for vertex welding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeldOptions {
    /// Per-axis tolerance; points closer than this on every axis are merged.
    pub epsilon: f64,

    /// Lookup strategy.
    pub strategy: WeldStrategy,
}

impl Default for WeldOptions {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_WELD_EPSILON,
            strategy: WeldStrategy::Grid,
        }
    }
}

impl WeldOptions {
    /// Set the per-axis tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the lookup strategy.
    pub fn with_strategy(mut self, strategy: WeldStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check that the tolerance is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(MeshError::invalid_param(
                "epsilon",
                self.epsilon,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// Result of welding a [`TriangleSoup`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeldedMesh {
    /// Deduplicated positions, in order of first appearance.
    pub positions: Vec<Point3<f64>>,
    /// Re-indexed triangle index buffer (same triangle count and winding).
    pub indices: Vec<usize>,
    /// Old vertex index → new vertex index.
    pub remap: Vec<usize>,
}

impl WeldedMesh {
    /// How many input vertices were folded into an earlier one.
    pub fn merged_count(&self) -> usize {
        self.remap.len() - self.positions.len()
    }

    /// Convert back into a soup, e.g. to weld again.
    pub fn into_soup(self) -> TriangleSoup {
        // The index count was a multiple of three on the way in.
        let faces: Vec<[usize; 3]> = self
            .indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        TriangleSoup::from_triangles(self.positions, &faces)
    }
}

/// Equality used by both strategies: strictly closer than `epsilon` on each axis.
#[inline]
pub fn within_epsilon(a: &Point3<f64>, b: &Point3<f64>, epsilon: f64) -> bool {
    (a.x - b.x).abs() < epsilon && (a.y - b.y).abs() < epsilon && (a.z - b.z).abs() < epsilon
}

/// Weld near-duplicate vertices of a soup.
///
/// # Example
/// ```
/// use facetline::mesh::{weld, TriangleSoup, WeldOptions};
/// use nalgebra::Point3;
///
/// let soup = TriangleSoup::new(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///     ],
///     vec![0, 1, 2, 3, 2, 1],
/// )
/// .unwrap();
///
/// let welded = weld(&soup, &WeldOptions::default()).unwrap();
/// assert_eq!(welded.positions.len(), 3);
/// assert_eq!(welded.indices, vec![0, 1, 2, 1, 2, 1]);
/// ```
pub fn weld(soup: &TriangleSoup, options: &WeldOptions) -> Result<WeldedMesh> {
    options.validate()?;

    let (positions, remap) = match options.strategy {
        WeldStrategy::Grid => weld_grid(soup.positions(), options.epsilon),
        WeldStrategy::Exact => weld_exact(soup.positions(), options.epsilon),
    };

    let indices = remap_indices(soup.indices(), &remap)?;

    log::debug!(
        "welded {} vertices into {} ({:?}, epsilon={})",
        remap.len(),
        positions.len(),
        options.strategy,
        options.epsilon
    );

    Ok(WeldedMesh {
        positions,
        indices,
        remap,
    })
}

/// Rewrite an index buffer through a remap table.
fn remap_indices(indices: &[usize], remap: &[usize]) -> Result<Vec<usize>> {
    indices
        .iter()
        .enumerate()
        .map(|(position, &old)| {
            remap.get(old).copied().ok_or(MeshError::IndexOutOfRange {
                position,
                index: old,
                vertex_count: remap.len(),
            })
        })
        .collect()
}

type Cell = (i64, i64, i64);

#[inline]
fn cell_of(p: &Point3<f64>, epsilon: f64) -> Cell {
    (
        (p.x / epsilon).floor() as i64,
        (p.y / epsilon).floor() as i64,
        (p.z / epsilon).floor() as i64,
    )
}

fn weld_grid(input: &[Point3<f64>], epsilon: f64) -> (Vec<Point3<f64>>, Vec<usize>) {
    let mut grid: HashMap<Cell, Vec<usize>> = HashMap::new();
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut remap = Vec::with_capacity(input.len());

    for p in input {
        let (cx, cy, cz) = cell_of(p, epsilon);

        // A point within epsilon lies at most one cell away on each axis.
        let mut found: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(slots) = grid.get(&cell) else {
                        continue;
                    };
                    for &slot in slots {
                        if within_epsilon(&positions[slot], p, epsilon)
                            && found.map_or(true, |f| slot < f)
                        {
                            found = Some(slot);
                        }
                    }
                }
            }
        }

        let new_index = match found {
            Some(slot) => slot,
            None => {
                let slot = positions.len();
                positions.push(*p);
                grid.entry((cx, cy, cz)).or_default().push(slot);
                slot
            }
        };
        remap.push(new_index);
    }

    (positions, remap)
}

#[inline]
fn bits_of(v: f64) -> u64 {
    // -0.0 and 0.0 compare equal, so they must share a key.
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

fn weld_exact(input: &[Point3<f64>], epsilon: f64) -> (Vec<Point3<f64>>, Vec<usize>) {
    let mut buckets: HashMap<[u64; 3], Vec<usize>> = HashMap::new();
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut remap = Vec::with_capacity(input.len());

    for p in input {
        let key = [bits_of(p.x), bits_of(p.y), bits_of(p.z)];
        let bucket = buckets.entry(key).or_default();

        // Bucket members share bits, so the epsilon test only rejects NaN here.
        let new_index = match bucket
            .iter()
            .copied()
            .find(|&slot| within_epsilon(&positions[slot], p, epsilon))
        {
            Some(slot) => slot,
            None => {
                let slot = positions.len();
                positions.push(*p);
                bucket.push(slot);
                slot
            }
        };
        remap.push(new_index);
    }

    (positions, remap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup(points: &[[f64; 3]], indices: &[usize]) -> TriangleSoup {
        let positions = points.iter().map(|p| Point3::new(p[0], p[1], p[2])).collect();
        TriangleSoup::new(positions, indices.to_vec()).unwrap()
    }

    #[test]
    fn test_no_duplicates_is_identity() {
        let s = soup(
            &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            &[0, 1, 2, 0, 2, 3],
        );
        let welded = weld(&s, &WeldOptions::default()).unwrap();
        assert_eq!(welded.positions, s.positions());
        assert_eq!(welded.indices, s.indices());
        assert_eq!(welded.remap, vec![0, 1, 2, 3]);
        assert_eq!(welded.merged_count(), 0);
    }

    #[test]
    fn test_near_duplicate_merges_to_first_seen() {
        let s = soup(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0 + 4e-7, -3e-7, 2e-7],
            ],
            &[0, 1, 2, 2, 3, 0],
        );
        let welded = weld(&s, &WeldOptions::default()).unwrap();
        assert_eq!(welded.positions.len(), 3);
        assert_eq!(welded.remap, vec![0, 1, 2, 1]);
        assert_eq!(welded.indices, vec![0, 1, 2, 2, 1, 0]);
        // The surviving position is the first one seen, not an average.
        assert_eq!(welded.positions[1], Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_grid_merges_across_cell_boundary() {
        // 0.9999996e-6 and 1.0000004e-6 sit in different epsilon cells.
        let a = 1e-6 - 4e-13;
        let b = 1e-6 + 4e-13;
        let s = soup(&[[a, 0.0, 0.0], [b, 0.0, 0.0], [5.0, 5.0, 5.0]], &[0, 1, 2]);
        let welded = weld(&s, &WeldOptions::default()).unwrap();
        assert_eq!(welded.positions.len(), 2);
        assert_eq!(welded.indices, vec![0, 0, 1]);
    }

    #[test]
    fn test_exact_keeps_near_duplicates_apart() {
        let s = soup(
            &[[1.0, 0.0, 0.0], [1.0 + 1e-9, 0.0, 0.0], [1.0, 0.0, 0.0]],
            &[0, 1, 2],
        );
        let options = WeldOptions::default().with_strategy(WeldStrategy::Exact);
        let welded = weld(&s, &options).unwrap();
        assert_eq!(welded.positions.len(), 2);
        assert_eq!(welded.remap, vec![0, 1, 0]);

        let grid = weld(&s, &WeldOptions::default()).unwrap();
        assert_eq!(grid.positions.len(), 1);
    }

    #[test]
    fn test_exact_folds_signed_zero() {
        let s = soup(&[[0.0, 1.0, 2.0], [-0.0, 1.0, 2.0], [3.0, 3.0, 3.0]], &[0, 1, 2]);
        let options = WeldOptions::default().with_strategy(WeldStrategy::Exact);
        let welded = weld(&s, &options).unwrap();
        assert_eq!(welded.remap, vec![0, 0, 1]);
    }

    #[test]
    fn test_epsilon_is_strict_per_axis() {
        // Exactly epsilon apart on one axis is not a duplicate.
        let s = soup(&[[0.0, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.25]], &[0, 1, 2]);
        let options = WeldOptions::default().with_epsilon(0.5);
        let welded = weld(&s, &options).unwrap();
        assert_eq!(welded.remap, vec![0, 1, 0]);
    }

    #[test]
    fn test_idempotent() {
        let s = soup(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            &[0, 1, 2, 3, 5, 4],
        );
        for strategy in [WeldStrategy::Grid, WeldStrategy::Exact] {
            let options = WeldOptions::default().with_strategy(strategy);
            let once = weld(&s, &options).unwrap();
            let twice = weld(&once.clone().into_soup(), &options).unwrap();
            assert_eq!(once.positions, twice.positions);
            assert_eq!(once.indices, twice.indices);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let s = soup(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], &[0, 1, 7]);
        let err = weld(&s, &WeldOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                position: 2,
                index: 7,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_invalid_epsilon() {
        let s = soup(&[[0.0, 0.0, 0.0]], &[]);
        for eps in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
            let options = WeldOptions::default().with_epsilon(eps);
            assert!(matches!(
                weld(&s, &options),
                Err(MeshError::InvalidParameter { name: "epsilon", .. })
            ));
        }
    }
}
