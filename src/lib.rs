//! # facetline
//!
//! Per-patch boundary edge extraction for triangle meshes.
//!
//! facetline takes an indexed triangle soup, welds positionally identical
//! vertices, groups triangles whose face normals point the same way, and
//! returns the edges that lie on the border of each group. Drawn as lines,
//! those edges give a clean "feature outline" of a CAD-style model without
//! the triangulation diagonals.
//!
//! ## Features
//!
//! - **Tolerant welding**: grid hashing with neighbour probing, or exact bit matching
//! - **Greedy normal clustering**: deterministic, order-preserving patches
//! - **Boundary extraction**: edges used by exactly one triangle of a patch
//! - **File formats**: STL and PLY input, OBJ line output
//! - **Parallel execution**: per-patch extraction and mesh batches via rayon
//!
//! ## Quick Start
//!
//! ```no_run
//! use facetline::prelude::*;
//!
//! let soup = facetline::io::load("model.stl").unwrap();
//! let outline = extract_outline(&soup, &OutlineOptions::default()).unwrap();
//!
//! println!("Groups: {}", outline.groups.len());
//! println!("Boundary edges: {}", outline.edge_count());
//!
//! facetline::io::obj::save_lines(&outline, "outline.obj").unwrap();
//! ```
//!
//! ## Building Soups Programmatically
//!
//! ```
//! use facetline::prelude::*;
//! use nalgebra::Point3;
//!
//! // Two unit squares sharing an edge, folded 90 degrees.
//! let positions = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 0.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//! ];
//! let faces = [[0, 1, 2], [0, 2, 3], [1, 4, 5], [1, 5, 2]];
//! let soup = TriangleSoup::from_triangles(positions, &faces);
//!
//! let outline = extract_outline(&soup, &OutlineOptions::default()).unwrap();
//! assert_eq!(outline.groups.len(), 2);
//! assert!(outline.groups.iter().all(|g| g.len() == 4));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use facetline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::cluster::NormalGroup;
    pub use crate::algo::edge::{Edge, EdgeGroup};
    pub use crate::algo::outline::{extract_outline, extract_outlines, Outline, OutlineOptions};
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{Triangle, TriangleSoup, VertexId, WeldOptions, WeldStrategy};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
