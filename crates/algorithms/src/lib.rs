//! # SkelGis Algorithms
//!
//! Centerline extraction algorithms for SkelGis.
//!
//! The `skeleton` module derives a network of centerlines (single-width
//! skeleton curves) from polygon area features such as roads, rivers or
//! building footprints. The pipeline densifies the polygon boundary, builds
//! a Voronoi diagram over the boundary points, keeps the diagram edges that
//! run through the polygon's interior, assembles them into a graph, prunes
//! sampling spurs and emits one polyline per skeleton branch.

mod maybe_rayon;
pub mod skeleton;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::skeleton::{
        extract_centerlines, extract_from_geometry, CenterlineExtraction, CenterlineParams,
        Centerlines, SkeletonWarning,
    };
    pub use skelgis_core::prelude::*;
}
