//! Core mesh data structures.
//!
//! This module holds everything up to and including per-triangle normals:
//!
//! - [`TriangleSoup`] - the raw position and index buffers handed in by a loader
//! - [`weld`] - tolerant vertex deduplication with index remapping
//! - [`build_triangles`] - triangle records with unit face normals
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a welded vertex
//! - [`GroupId`] - Identifies a normal group
//!
//! # Example
//!
//! ```
//! use facetline::mesh::{build_triangles, weld, TriangleSoup, WeldOptions};
//! use nalgebra::Point3;
//!
//! let soup = TriangleSoup::from_triangles(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.5, 1.0, 0.0),
//!     ],
//!     &[[0, 1, 2]],
//! );
//!
//! let welded = weld(&soup, &WeldOptions::default()).unwrap();
//! let triangles = build_triangles(&welded.positions, &welded.indices).unwrap();
//! assert_eq!(triangles.len(), 1);
//! ```

mod index;
mod soup;
mod triangle;
mod weld;

pub use index::{GroupId, VertexId};
pub use soup::TriangleSoup;
pub use triangle::{build_triangles, face_normal, Triangle};
pub use weld::{
    weld, within_epsilon, WeldOptions, WeldStrategy, WeldedMesh, DEFAULT_WELD_EPSILON,
};
