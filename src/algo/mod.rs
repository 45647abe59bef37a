//! Outline extraction algorithms.
//!
//! - [`cluster`] - greedy grouping of triangles by face normal
//! - [`boundary`] - edges used by exactly one triangle of a group
//! - [`edge`] - canonical edges carrying their endpoint positions
//! - [`outline`] - the whole pipeline, its options and batch entry point

pub mod boundary;
pub mod cluster;
pub mod edge;
pub mod outline;
mod progress;

pub use progress::Progress;
