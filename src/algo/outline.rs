//! The full outline pipeline.
//!
//! `soup → weld → triangles → normal groups → boundary edges → edges`
//!
//! # Example
//!
//! ```
//! use facetline::algo::outline::{extract_outline, OutlineOptions};
//! use facetline::mesh::TriangleSoup;
//! use nalgebra::Point3;
//!
//! let soup = TriangleSoup::new(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![0, 1, 2, 0, 2, 3],
//! )
//! .unwrap();
//!
//! let outline = extract_outline(&soup, &OutlineOptions::default()).unwrap();
//! assert_eq!(outline.groups.len(), 1);
//! assert_eq!(outline.edge_count(), 4);
//! assert_eq!(outline.line_list().len(), 8);
//! ```

use nalgebra::Point3;
use rayon::prelude::*;

use super::boundary::boundary_edges;
use super::cluster::{cluster_by_normal, NormalGroup, DEFAULT_NORMAL_THRESHOLD};
use super::edge::{materialize, Edge, EdgeGroup};
use super::progress::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{build_triangles, weld, TriangleSoup, WeldOptions, WeldStrategy};

const STAGES: usize = 4;

/// Options for outline extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineOptions {
    /// Vertex welding options.
    pub weld: WeldOptions,

    /// Cosine similarity a triangle normal needs to join a group (default: 0.99).
    pub normal_threshold: f64,

    /// Whether to use parallel execution (default: true).
    ///
    /// Only stages whose results are independent run in parallel; grouping
    /// itself is always sequential, so output is identical either way.
    pub parallel: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            weld: WeldOptions::default(),
            normal_threshold: DEFAULT_NORMAL_THRESHOLD,
            parallel: true,
        }
    }
}

impl OutlineOptions {
    /// Set the normal similarity threshold.
    pub fn with_normal_threshold(mut self, threshold: f64) -> Self {
        self.normal_threshold = threshold;
        self
    }

    /// Set the welding tolerance.
    pub fn with_weld_epsilon(mut self, epsilon: f64) -> Self {
        self.weld = self.weld.with_epsilon(epsilon);
        self
    }

    /// Set the welding strategy.
    pub fn with_weld_strategy(mut self, strategy: WeldStrategy) -> Self {
        self.weld = self.weld.with_strategy(strategy);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check all parameters.
    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.normal_threshold) {
            return Err(MeshError::invalid_param(
                "normal_threshold",
                self.normal_threshold,
                "must be a cosine in [-1, 1]",
            ));
        }
        self.weld.validate()
    }
}

/// Boundary edges of every normal group of one mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    /// One entry per normal group, in group creation order.
    pub groups: Vec<EdgeGroup>,
    /// Vertex count of the input soup.
    pub vertex_count_before: usize,
    /// Vertex count after welding.
    pub vertex_count_after: usize,
    /// Number of triangles processed.
    pub triangle_count: usize,
}

impl Outline {
    /// Total number of boundary edges over all groups.
    pub fn edge_count(&self) -> usize {
        self.groups.iter().map(EdgeGroup::len).sum()
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// All edges, group by group.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.groups.iter().flat_map(|g| g.edges.iter())
    }

    /// All edges as `(start, end)` segments, group by group.
    pub fn segments(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        self.edges().map(|e| (e.a_pos, e.b_pos))
    }

    /// Every group merged into one flat line list, two points per edge.
    pub fn line_list(&self) -> Vec<Point3<f64>> {
        let mut points = Vec::with_capacity(self.edge_count() * 2);
        for (start, end) in self.segments() {
            points.push(start);
            points.push(end);
        }
        points
    }
}

/// Extract per-group boundary edges from a triangle soup.
pub fn extract_outline(soup: &TriangleSoup, options: &OutlineOptions) -> Result<Outline> {
    extract_outline_with_progress(soup, options, &Progress::none())
}

/// Extract per-group boundary edges, reporting one step per stage.
pub fn extract_outline_with_progress(
    soup: &TriangleSoup,
    options: &OutlineOptions,
    progress: &Progress,
) -> Result<Outline> {
    options.validate()?;

    if soup.is_empty() {
        log::debug!("empty soup, nothing to outline");
        progress.report(STAGES, STAGES, "Done");
        return Ok(Outline {
            vertex_count_before: soup.num_vertices(),
            vertex_count_after: soup.num_vertices(),
            ..Outline::default()
        });
    }

    progress.report(0, STAGES, "Welding vertices");
    let welded = weld(soup, &options.weld)?;

    progress.report(1, STAGES, "Building triangles");
    let triangles = build_triangles(&welded.positions, &welded.indices)?;

    progress.report(2, STAGES, "Grouping by normal");
    let groups = cluster_by_normal(&triangles, options.normal_threshold);

    progress.report(3, STAGES, "Extracting boundary edges");
    let edge_groups: Vec<EdgeGroup> = if options.parallel {
        groups
            .par_iter()
            .map(|group| group_outline(group, &welded.positions))
            .collect::<Result<_>>()?
    } else {
        groups
            .iter()
            .map(|group| group_outline(group, &welded.positions))
            .collect::<Result<_>>()?
    };

    let outline = Outline {
        groups: edge_groups,
        vertex_count_before: soup.num_vertices(),
        vertex_count_after: welded.positions.len(),
        triangle_count: triangles.len(),
    };

    log::debug!(
        "outline: {} triangles, {} groups, {} boundary edges",
        outline.triangle_count,
        outline.groups.len(),
        outline.edge_count()
    );
    progress.report(STAGES, STAGES, "Done");

    Ok(outline)
}

fn group_outline(group: &NormalGroup, positions: &[Point3<f64>]) -> Result<EdgeGroup> {
    Ok(EdgeGroup {
        normal: group.normal,
        edges: materialize(&boundary_edges(group), positions)?,
    })
}

/// Extract outlines for several independent meshes.
///
/// Meshes are processed in parallel when `options.parallel` is set; the
/// result order matches the input order. The first error aborts the batch.
pub fn extract_outlines(soups: &[TriangleSoup], options: &OutlineOptions) -> Result<Vec<Outline>> {
    if options.parallel {
        soups
            .par_iter()
            .map(|soup| extract_outline(soup, options))
            .collect()
    } else {
        soups
            .iter()
            .map(|soup| extract_outline(soup, options))
            .collect()
    }
}
