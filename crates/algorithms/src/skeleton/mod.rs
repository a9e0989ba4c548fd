//! Centerline / medial-axis skeleton extraction
//!
//! Stages of the per-polygon pipeline, in order:
//! - Segmentize: densify boundary rings at a maximum segment length
//! - Diagram: Voronoi diagram over the densified boundary points
//! - Interior: keep diagram edges strictly inside the polygon
//! - Graph: merge edges into a deduplicated undirected graph
//! - Prune: drop short dangling spurs, detect trivial components
//! - Emit: produce one polyline per maximal skeleton run
//!
//! [`extract_centerlines`] chains all six stages; the individual stage
//! functions are public for callers that need intermediate results, such as
//! the skeleton graph itself.

mod diagram;
mod emit;
mod extract;
mod graph;
mod interior;
mod prune;
mod segmentize;

pub use diagram::{build_diagram, DiagramEdge};
pub use emit::emit_paths;
pub use extract::{
    extract_centerlines, extract_from_geometry, CenterlineExtraction, CenterlineParams, Centerlines,
};
pub use graph::{assemble_graph, SkeletonGraph};
pub use interior::filter_interior;
pub use prune::{prune_spurs, SkeletonWarning};
pub use segmentize::{segmentize_boundary, segmentize_ring, SegmentizedBoundary};
