//! Centerline emission
//!
//! Walks the pruned skeleton graph and produces one polyline per maximal
//! run between nodes (vertices whose degree is not two), collapsing the
//! pass-through vertices of each run into intermediate points. Runs of
//! exactly collinear segments are merged so a straight axis comes out as a
//! single segment. Components without any node vertex are pure cycles and
//! are emitted as closed paths.

use geo::{Coord, LineString};
use std::collections::BTreeSet;

use crate::skeleton::SkeletonGraph;

/// Convert the surviving skeleton into centerline paths.
///
/// Paths are ordered by their starting vertex index, node runs first, then
/// cycles; output is deterministic for a given graph.
pub fn emit_paths(graph: &SkeletonGraph) -> Vec<LineString<f64>> {
    let mut visited: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut paths = Vec::new();

    // Junction-to-junction, junction-to-leaf and leaf-to-leaf runs
    for node in 0..graph.vertex_count() {
        let degree = graph.degree(node);
        if degree == 0 || degree == 2 {
            continue;
        }
        for &first in graph.neighbors(node) {
            if visited.contains(&edge_key(node, first)) {
                continue;
            }
            paths.push(walk_run(graph, node, first, &mut visited));
        }
    }

    // Whatever is left lives on pure degree-2 cycles
    for start in 0..graph.vertex_count() {
        if graph.degree(start) != 2 {
            continue;
        }
        for &first in graph.neighbors(start) {
            if visited.contains(&edge_key(start, first)) {
                continue;
            }
            paths.push(walk_cycle(graph, start, first, &mut visited));
        }
    }

    paths
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Follow a run from a node vertex through pass-through vertices until the
/// next node vertex.
fn walk_run(
    graph: &SkeletonGraph,
    node: usize,
    first: usize,
    visited: &mut BTreeSet<(usize, usize)>,
) -> LineString<f64> {
    let mut coords = vec![graph.vertex(node)];
    let mut prev = node;
    let mut cur = first;
    visited.insert(edge_key(prev, cur));
    coords.push(graph.vertex(cur));

    while graph.degree(cur) == 2 {
        let next = match graph.neighbors(cur).iter().copied().find(|&n| n != prev) {
            Some(n) => n,
            None => break,
        };
        visited.insert(edge_key(cur, next));
        coords.push(graph.vertex(next));
        prev = cur;
        cur = next;
    }

    LineString::new(merge_collinear(coords))
}

/// Follow a pure degree-2 cycle back to its starting vertex; the result is
/// closed (first == last).
fn walk_cycle(
    graph: &SkeletonGraph,
    start: usize,
    first: usize,
    visited: &mut BTreeSet<(usize, usize)>,
) -> LineString<f64> {
    let mut coords = vec![graph.vertex(start)];
    let mut prev = start;
    let mut cur = first;
    visited.insert(edge_key(prev, cur));
    coords.push(graph.vertex(cur));

    while cur != start {
        let next = match graph.neighbors(cur).iter().copied().find(|&n| n != prev) {
            Some(n) => n,
            None => break,
        };
        visited.insert(edge_key(cur, next));
        coords.push(graph.vertex(next));
        prev = cur;
        cur = next;
    }

    LineString::new(merge_collinear(coords))
}

/// Drop interior points that continue the previous segment in exactly the
/// same direction. Endpoints always survive.
fn merge_collinear(coords: Vec<Coord<f64>>) -> Vec<Coord<f64>> {
    if coords.len() < 3 {
        return coords;
    }
    let mut merged = vec![coords[0]];
    for i in 1..coords.len() - 1 {
        let a = merged[merged.len() - 1];
        let b = coords[i];
        let c = coords[i + 1];
        if !continues_straight(a, b, c) {
            merged.push(b);
        }
    }
    merged.push(coords[coords.len() - 1]);
    merged
}

fn continues_straight(a: Coord<f64>, b: Coord<f64>, c: Coord<f64>) -> bool {
    let (ux, uy) = (b.x - a.x, b.y - a.y);
    let (vx, vy) = (c.x - b.x, c.y - b.y);
    let cross = ux * vy - uy * vx;
    let dot = ux * vx + uy * vy;
    let scale = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
    dot > 0.0 && cross.abs() <= 1e-9 * scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::{assemble_graph, DiagramEdge};

    fn edge(start: (f64, f64), end: (f64, f64)) -> DiagramEdge {
        DiagramEdge {
            start: Coord { x: start.0, y: start.1 },
            end: Coord { x: end.0, y: end.1 },
            site_a: 0,
            site_b: 1,
        }
    }

    #[test]
    fn test_single_chain_emits_one_path() {
        let graph = assemble_graph(
            &[
                edge((0.0, 0.0), (5.0, 0.0)),
                edge((5.0, 0.0), (10.0, 0.0)),
                edge((10.0, 0.0), (15.0, 3.0)),
            ],
            1e-6,
        );
        let paths = emit_paths(&graph);

        assert_eq!(paths.len(), 1);
        // The two collinear segments merge; the bend survives
        assert_eq!(paths[0].0.len(), 3);
        let endpoints = [paths[0].0[0], *paths[0].0.last().unwrap()];
        assert!(endpoints.contains(&Coord { x: 0.0, y: 0.0 }));
        assert!(endpoints.contains(&Coord { x: 15.0, y: 3.0 }));
    }

    #[test]
    fn test_junction_splits_into_runs() {
        let graph = assemble_graph(
            &[
                edge((0.0, 0.0), (10.0, 0.0)),
                edge((10.0, 0.0), (20.0, 0.0)),
                edge((10.0, 0.0), (10.0, 8.0)),
            ],
            1e-6,
        );
        let paths = emit_paths(&graph);

        assert_eq!(paths.len(), 3, "one path per junction-to-leaf run");
        for path in &paths {
            assert_eq!(path.0.len(), 2);
            assert!(
                path.0.contains(&Coord { x: 10.0, y: 0.0 }),
                "every run starts or ends at the junction"
            );
        }
    }

    #[test]
    fn test_pure_cycle_emits_closed_path() {
        let graph = assemble_graph(
            &[
                edge((0.0, 0.0), (10.0, 0.0)),
                edge((10.0, 0.0), (10.0, 10.0)),
                edge((10.0, 10.0), (0.0, 10.0)),
                edge((0.0, 10.0), (0.0, 0.0)),
            ],
            1e-6,
        );
        let paths = emit_paths(&graph);

        assert_eq!(paths.len(), 1);
        let cycle = &paths[0].0;
        assert_eq!(cycle.first(), cycle.last(), "cycle must close");
        assert_eq!(cycle.len(), 5);
    }

    #[test]
    fn test_cycle_with_tail() {
        let graph = assemble_graph(
            &[
                edge((0.0, 0.0), (10.0, 0.0)),
                edge((10.0, 0.0), (15.0, 5.0)),
                edge((15.0, 5.0), (10.0, 10.0)),
                edge((10.0, 10.0), (10.0, 0.0)),
                edge((0.0, 0.0), (-8.0, 0.0)),
            ],
            1e-6,
        );
        let paths = emit_paths(&graph);

        // The tail run from the leaf to the junction, plus the loop that
        // leaves the junction and returns to it
        assert_eq!(paths.len(), 2);
        let closed: Vec<_> = paths
            .iter()
            .filter(|p| p.0.first() == p.0.last())
            .collect();
        assert_eq!(closed.len(), 1, "exactly one loop path expected");
    }

    #[test]
    fn test_empty_graph_emits_nothing() {
        let graph = assemble_graph(&[], 1e-6);
        assert!(emit_paths(&graph).is_empty());
    }

    #[test]
    fn test_emission_is_deterministic() {
        let edges = [
            edge((0.0, 0.0), (10.0, 0.0)),
            edge((10.0, 0.0), (20.0, 0.0)),
            edge((10.0, 0.0), (10.0, 8.0)),
            edge((30.0, 0.0), (40.0, 0.0)),
        ];
        let a = emit_paths(&assemble_graph(&edges, 1e-6));
        let b = emit_paths(&assemble_graph(&edges, 1e-6));
        assert_eq!(a, b);
    }
}
