//! Boundary densification
//!
//! Rewrites each polygon ring as a dense point sequence in which no two
//! consecutive points are further apart than a maximum segment length.
//! Original vertices are preserved exactly; only evenly spaced points are
//! inserted along each edge. The densified points are the Voronoi sites for
//! the diagram stage, so the step length controls how closely the skeleton
//! approximates the true medial axis.

use geo::{Coord, LineString, Polygon};
use skelgis_core::{Error, Result};

/// Densified boundary of one polygon: a closed coordinate sequence per
/// ring, exterior ring first.
#[derive(Debug, Clone)]
pub struct SegmentizedBoundary {
    rings: Vec<Vec<Coord<f64>>>,
}

impl SegmentizedBoundary {
    /// The densified exterior ring (closed, first == last)
    pub fn exterior(&self) -> &[Coord<f64>] {
        &self.rings[0]
    }

    /// All densified rings, exterior first
    pub fn rings(&self) -> &[Vec<Coord<f64>>] {
        &self.rings
    }

    /// The Voronoi sites: every densified boundary point in ring order,
    /// skipping each ring's closing duplicate.
    pub fn sites(&self) -> Vec<Coord<f64>> {
        self.rings
            .iter()
            .flat_map(|ring| ring[..ring.len() - 1].iter().copied())
            .collect()
    }
}

/// Densify all rings of a polygon.
///
/// # Arguments
/// * `polygon` - Input polygon (exterior ring plus optional holes)
/// * `max_segment_length` - Upper bound on the gap between consecutive
///   boundary points
pub fn segmentize_boundary(
    polygon: &Polygon<f64>,
    max_segment_length: f64,
) -> Result<SegmentizedBoundary> {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(segmentize_ring(polygon.exterior(), max_segment_length)?);
    for hole in polygon.interiors() {
        rings.push(segmentize_ring(hole, max_segment_length)?);
    }
    Ok(SegmentizedBoundary { rings })
}

/// Densify a single closed ring.
///
/// Each edge of length `L` receives `ceil(L / max_segment_length) - 1`
/// evenly spaced interior points. Zero-length edges are skipped. The result
/// is closed like the input.
///
/// # Errors
/// `InvalidParameter` when `max_segment_length` is not a positive finite
/// number; `InvalidGeometry` when the ring is not closed, has fewer than 3
/// distinct vertices, contains non-finite coordinates, or encloses no area
/// (a collapsed or bowtie-like ring).
pub fn segmentize_ring(ring: &LineString<f64>, max_segment_length: f64) -> Result<Vec<Coord<f64>>> {
    if !max_segment_length.is_finite() || max_segment_length <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "max_segment_length",
            value: format!("{max_segment_length}"),
            reason: "must be a positive finite number".into(),
        });
    }
    validate_ring(ring)?;

    let coords = &ring.0;
    let mut out: Vec<Coord<f64>> = Vec::with_capacity(coords.len());

    for window in coords.windows(2) {
        let (p, q) = (window[0], window[1]);
        let dx = q.x - p.x;
        let dy = q.y - p.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            continue;
        }
        if out.last() != Some(&p) {
            out.push(p);
        }
        let pieces = (length / max_segment_length).ceil() as usize;
        for k in 1..pieces {
            let t = k as f64 / pieces as f64;
            out.push(Coord { x: p.x + t * dx, y: p.y + t * dy });
        }
    }

    // Close the ring
    out.push(coords[coords.len() - 1]);
    Ok(out)
}

fn validate_ring(ring: &LineString<f64>) -> Result<()> {
    let coords = &ring.0;

    if coords.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(Error::invalid_geometry("non-finite coordinate in ring"));
    }
    if coords.len() < 4 {
        return Err(Error::invalid_geometry(format!(
            "ring has {} coordinates, a closed ring needs at least 4",
            coords.len()
        )));
    }
    if coords.first() != coords.last() {
        return Err(Error::invalid_geometry("ring is not closed"));
    }

    let mut distinct: Vec<(u64, u64)> = coords[..coords.len() - 1]
        .iter()
        .map(|c| (c.x.to_bits(), c.y.to_bits()))
        .collect();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 3 {
        return Err(Error::invalid_geometry(format!(
            "ring has {} distinct vertices, need at least 3",
            distinct.len()
        )));
    }

    // A ring that encloses (almost) no area relative to its extent is either
    // collapsed onto a line or crosses itself like a bowtie.
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
    for c in coords {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    let extent_sq = (max_x - min_x).powi(2) + (max_y - min_y).powi(2);
    if ring_signed_area(coords).abs() <= 1e-12 * extent_sq {
        return Err(Error::invalid_geometry(
            "ring encloses no area (degenerate or self-crossing)",
        ));
    }

    Ok(())
}

/// Shoelace area of a closed coordinate sequence (positive for CCW)
fn ring_signed_area(coords: &[Coord<f64>]) -> f64 {
    let mut sum = 0.0;
    for window in coords.windows(2) {
        sum += window[0].x * window[1].y - window[1].x * window[0].y;
    }
    0.5 * sum
}
