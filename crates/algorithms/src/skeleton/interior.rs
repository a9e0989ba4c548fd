//! Interior filtering of Voronoi edges
//!
//! A Voronoi diagram of boundary points partitions the whole plane; only
//! the edges running through the polygon's interior belong to the skeleton.
//! An edge is kept when both endpoints and its midpoint lie strictly inside
//! the polygon; for edges longer than the densification step, additional
//! evenly spaced samples must pass as well. The containment predicate is
//! boundary-exclusive and rejects hole interiors, so edges lying exactly on
//! the boundary count as exterior, and edges entering a hole are discarded
//! even when their midpoint grazes the hole's boundary.

use geo::{Contains, Coord, Polygon};

use crate::maybe_rayon::*;
use crate::skeleton::DiagramEdge;

/// Keep the diagram edges interior to `polygon`.
///
/// # Arguments
/// * `edges` - Voronoi edges from the diagram builder
/// * `polygon` - The generating polygon, holes included
/// * `max_segment_length` - Densification step; edges longer than this get
///   extra interior samples
/// * `max_interior_samples` - Number of samples tested on an over-long edge
///   (minimum 1, the midpoint)
///
/// # Returns
/// The surviving edges in their input order.
pub fn filter_interior(
    edges: Vec<DiagramEdge>,
    polygon: &Polygon<f64>,
    max_segment_length: f64,
    max_interior_samples: usize,
) -> Vec<DiagramEdge> {
    edges
        .into_par_iter()
        .filter(|edge| edge_is_interior(edge, polygon, max_segment_length, max_interior_samples))
        .collect()
}

fn edge_is_interior(
    edge: &DiagramEdge,
    polygon: &Polygon<f64>,
    max_segment_length: f64,
    max_interior_samples: usize,
) -> bool {
    // Endpoints become skeleton vertices; every kept edge must lie entirely
    // within the interior, so an exterior endpoint disqualifies the edge no
    // matter where its midpoint falls.
    if !polygon.contains(&edge.start) || !polygon.contains(&edge.end) {
        return false;
    }

    let dx = edge.end.x - edge.start.x;
    let dy = edge.end.y - edge.start.y;
    let length = (dx * dx + dy * dy).sqrt();

    let samples = if length > max_segment_length {
        max_interior_samples.max(1)
    } else {
        1
    };

    (1..=samples).all(|k| {
        let t = k as f64 / (samples + 1) as f64;
        polygon.contains(&Coord {
            x: edge.start.x + t * dx,
            y: edge.start.y + t * dy,
        })
    })
}
