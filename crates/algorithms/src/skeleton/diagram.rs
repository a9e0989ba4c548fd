//! Voronoi diagram construction over boundary sites
//!
//! Builds a Delaunay triangulation of the densified boundary points with an
//! incremental Bowyer-Watson insertion, then reads the Voronoi diagram off
//! the dual: every interior Delaunay edge contributes one Voronoi segment
//! connecting the circumcenters of the two triangles that share it, and the
//! Delaunay edge's endpoints are the segment's generating sites.
//!
//! Hull edges have a single adjacent triangle and dualize to unbounded
//! rays. They are not emitted: their finite continuation lies outside the
//! generating boundary and would be rejected by the interior filter anyway.
//!
//! Determinism: sites keep their first-occurrence input order, insertion
//! follows that order, and output edges are sorted by generating-site index
//! pair, so the same boundary always yields the same diagram.

use geo::Coord;
use skelgis_core::{Error, Result};
use std::collections::{BTreeMap, HashSet};

/// One finite Voronoi edge with its generating sites.
///
/// Ephemeral: produced by the diagram builder, consumed by the interior
/// filter and the graph assembler within a single polygon's pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramEdge {
    pub start: Coord<f64>,
    pub end: Coord<f64>,
    /// Index of one generating site in the deduplicated input order
    pub site_a: usize,
    /// Index of the other generating site; always greater than `site_a`
    pub site_b: usize,
}

/// A triangle defined by three vertex indices
#[derive(Debug, Clone, Copy)]
struct Triangle {
    v0: usize,
    v1: usize,
    v2: usize,
}

impl Triangle {
    fn edges(&self) -> [(usize, usize); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }
}

/// Circumcircle of a triangle
#[derive(Debug, Clone, Copy)]
struct Circumcircle {
    cx: f64,
    cy: f64,
    radius_sq: f64,
}

/// Compute the circumcircle of three points
fn circumcircle(p0: &Coord<f64>, p1: &Coord<f64>, p2: &Coord<f64>) -> Option<Circumcircle> {
    let ax = p0.x;
    let ay = p0.y;
    let bx = p1.x;
    let by = p1.y;
    let cx = p2.x;
    let cy = p2.y;

    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d.abs() < 1e-12 {
        return None; // Degenerate triangle
    }

    let ux = ((ax * ax + ay * ay) * (by - cy)
        + (bx * bx + by * by) * (cy - ay)
        + (cx * cx + cy * cy) * (ay - by))
        / d;

    let uy = ((ax * ax + ay * ay) * (cx - bx)
        + (bx * bx + by * by) * (ax - cx)
        + (cx * cx + cy * cy) * (bx - ax))
        / d;

    let dx = ax - ux;
    let dy = ay - uy;

    Some(Circumcircle {
        cx: ux,
        cy: uy,
        radius_sq: dx * dx + dy * dy,
    })
}

/// Build a Delaunay triangulation with the incremental Bowyer-Watson
/// algorithm. Returns triangles indexing into `sites`.
fn delaunay(sites: &[Coord<f64>]) -> Vec<Triangle> {
    if sites.len() < 3 {
        return Vec::new();
    }

    // Bounding box of the sites
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for s in sites {
        min_x = min_x.min(s.x);
        min_y = min_y.min(s.y);
        max_x = max_x.max(s.x);
        max_y = max_y.max(s.y);
    }

    let dx = max_x - min_x;
    let dy = max_y - min_y;
    let delta = dx.max(dy).max(1.0);

    // Super-triangle vertices occupy indices 0, 1, 2
    let mut vertices: Vec<Coord<f64>> = vec![
        Coord { x: min_x - 10.0 * delta, y: min_y - delta },
        Coord { x: min_x + 0.5 * dx, y: max_y + 10.0 * delta },
        Coord { x: max_x + 10.0 * delta, y: min_y - delta },
    ];

    let mut triangles: Vec<Triangle> = vec![Triangle { v0: 0, v1: 1, v2: 2 }];

    for site in sites {
        let vi = vertices.len();
        vertices.push(*site);

        // Triangles whose circumcircle contains the new site
        let mut bad_triangles: Vec<usize> = Vec::new();
        for (ti, tri) in triangles.iter().enumerate() {
            if let Some(cc) = circumcircle(&vertices[tri.v0], &vertices[tri.v1], &vertices[tri.v2])
            {
                let ddx = site.x - cc.cx;
                let ddy = site.y - cc.cy;
                if ddx * ddx + ddy * ddy <= cc.radius_sq {
                    bad_triangles.push(ti);
                }
            }
        }

        // Boundary of the cavity: edges not shared by two bad triangles
        let mut boundary: Vec<(usize, usize)> = Vec::new();
        for &bi in &bad_triangles {
            for &(ea, eb) in &triangles[bi].edges() {
                let shared = bad_triangles.iter().any(|&oi| {
                    oi != bi
                        && triangles[oi]
                            .edges()
                            .iter()
                            .any(|&(oa, ob)| (oa == ea && ob == eb) || (oa == eb && ob == ea))
                });
                if !shared {
                    boundary.push((ea, eb));
                }
            }
        }

        // Remove bad triangles in reverse order to preserve indices
        bad_triangles.sort_unstable_by(|a, b| b.cmp(a));
        for bi in bad_triangles {
            triangles.swap_remove(bi);
        }

        // Re-triangulate the cavity around the new site
        for &(ea, eb) in &boundary {
            triangles.push(Triangle { v0: ea, v1: eb, v2: vi });
        }
    }

    // Drop triangles touching the super-triangle and remap indices
    triangles.retain(|tri| tri.v0 >= 3 && tri.v1 >= 3 && tri.v2 >= 3);
    for tri in &mut triangles {
        tri.v0 -= 3;
        tri.v1 -= 3;
        tri.v2 -= 3;
    }

    triangles
}

/// Remove exact duplicate sites, preserving first-occurrence order
fn dedup_sites(points: &[Coord<f64>]) -> Vec<Coord<f64>> {
    let mut seen = HashSet::new();
    points
        .iter()
        .copied()
        .filter(|c| seen.insert((c.x.to_bits(), c.y.to_bits())))
        .collect()
}

/// Build the Voronoi diagram of the given boundary points.
///
/// # Arguments
/// * `points` - Boundary sites, typically from `SegmentizedBoundary::sites`;
///   exact duplicates are removed first
///
/// # Returns
/// Finite Voronoi edges sorted by generating-site index pair. Zero-length
/// edges (from cocircular site groups) are retained; the graph assembler
/// folds them away.
///
/// # Errors
/// `DegenerateSiteSet` when fewer than 4 distinct sites remain;
/// `NumericInstability` when no triangle survives (e.g. all sites collinear).
pub fn build_diagram(points: &[Coord<f64>]) -> Result<Vec<DiagramEdge>> {
    let sites = dedup_sites(points);
    if sites.len() < 4 {
        return Err(Error::DegenerateSiteSet { count: sites.len() });
    }

    // Degenerate slivers have no circumcircle and therefore no dual vertex;
    // they are dropped before the dual is read off.
    let triangulation: Vec<(Triangle, Circumcircle)> = delaunay(&sites)
        .into_iter()
        .filter_map(|tri| {
            circumcircle(&sites[tri.v0], &sites[tri.v1], &sites[tri.v2]).map(|cc| (tri, cc))
        })
        .collect();
    if triangulation.is_empty() {
        return Err(Error::NumericInstability(
            "triangulation produced no usable triangles (collinear sites?)".into(),
        ));
    }

    // Map each Delaunay edge (sorted site pair) to its adjacent triangles.
    // BTreeMap keeps the output in site-pair order.
    let mut adjacency: BTreeMap<(usize, usize), Vec<usize>> = BTreeMap::new();
    for (ti, (tri, _)) in triangulation.iter().enumerate() {
        for &(a, b) in &tri.edges() {
            let key = (a.min(b), a.max(b));
            adjacency.entry(key).or_default().push(ti);
        }
    }

    let mut edges = Vec::new();
    for ((site_a, site_b), tris) in adjacency {
        if tris.len() != 2 {
            continue; // hull edge, dual is an unbounded ray
        }
        let c0 = triangulation[tris[0]].1;
        let c1 = triangulation[tris[1]].1;
        edges.push(DiagramEdge {
            start: Coord { x: c0.cx, y: c0.cy },
            end: Coord { x: c1.cx, y: c1.cy },
            site_a,
            site_b,
        });
    }

    Ok(edges)
}
