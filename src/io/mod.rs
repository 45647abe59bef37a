//! Mesh file I/O.
//!
//! Loaders produce a raw [`TriangleSoup`]; welding is left to the pipeline.
//! Outlines are written as OBJ line elements.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | STL | `.stl` | ✓ | ✗ | Binary and ASCII, one position per corner |
//! | PLY | `.ply` | ✓ | ✗ | Polygons are fan triangulated |
//! | Wavefront OBJ | `.obj` | ✗ | ✓ | Outline line list (`l` records) |
//!
//! # Usage
//!
//! ```no_run
//! use facetline::algo::outline::{extract_outline, OutlineOptions};
//! use facetline::io;
//!
//! let soup = io::load("model.stl").unwrap();
//! let outline = extract_outline(&soup, &OutlineOptions::default()).unwrap();
//! io::obj::save_lines(&outline, "outline.obj").unwrap();
//! ```

pub mod obj;
pub mod ply;
pub mod stl;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::TriangleSoup;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// STL (stereolithography) format.
    Stl,
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "stl" => Some(Format::Stl),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

/// Load a triangle soup from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriangleSoup> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    let soup = match format {
        Format::Stl => stl::load(path)?,
        Format::Ply => ply::load(path)?,
    };
    log::debug!(
        "loaded {}: {} positions, {} triangles",
        path.display(),
        soup.num_vertices(),
        soup.num_triangles()
    );
    Ok(soup)
}
