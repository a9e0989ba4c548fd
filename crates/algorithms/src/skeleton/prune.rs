//! Spur pruning and trivial-component handling
//!
//! Boundary densification seeds the Voronoi skeleton with short dangling
//! branches near convex corners and sampling irregularities. Pruning walks
//! each leaf chain (a degree-1 vertex plus its run of degree-2 vertices up
//! to the first junction) and removes it when its cumulative length falls
//! below `min_spur_length`, repeating until nothing more qualifies.
//!
//! A chain bounded by two leaves spans its whole component: that is the
//! centerline itself, not a spur, so it is only discarded when the entire
//! component's length stays below the threshold. Such components are
//! dropped and reported as trivial skeletons, which also covers polygons
//! too small or narrow to yield a usable skeleton at all.

use std::fmt;

use crate::skeleton::SkeletonGraph;

/// Recoverable conditions raised while reducing a skeleton
#[derive(Debug, Clone, PartialEq)]
pub enum SkeletonWarning {
    /// A connected component was too small or narrow to yield a usable
    /// skeleton and was dropped from the output
    TrivialSkeleton { component_length: f64 },
}

impl fmt::Display for SkeletonWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkeletonWarning::TrivialSkeleton { component_length } => write!(
                f,
                "trivial skeleton: component length {component_length:.3} below pruning threshold"
            ),
        }
    }
}

/// Remove leaf chains shorter than `min_spur_length`, then drop components
/// whose total length stays below the threshold.
///
/// Within a round, the chains of one component are judged together on a
/// snapshot of the graph. Competing spurs at the same junction are removed
/// in the same round; otherwise deleting the first would demote the
/// junction to a pass-through vertex and let the second escape into the
/// axis. Whole components are only discarded through the trivial-skeleton
/// rule, each reported as a warning. Increasing the threshold can only
/// remove more, so the number of emitted paths is monotonically
/// non-increasing in `min_spur_length`.
pub fn prune_spurs(graph: &mut SkeletonGraph, min_spur_length: f64) -> Vec<SkeletonWarning> {
    let mut warnings = Vec::new();

    loop {
        let mut changed = false;
        for component in graph.components() {
            let mut qualifying: Vec<LeafChain> = Vec::new();
            for &leaf in &component {
                if graph.degree(leaf) != 1 {
                    continue;
                }
                let chain = leaf_chain(graph, leaf);
                // A chain ending at another leaf spans the whole component;
                // the component pass below decides its fate.
                if graph.degree(chain.terminus) >= 3 && chain.length < min_spur_length {
                    qualifying.push(chain);
                }
            }
            if qualifying.is_empty() {
                continue;
            }

            // Distinct leaf chains never share an edge, so the counts compare
            let component_edges: usize =
                component.iter().map(|&v| graph.degree(v)).sum::<usize>() / 2;
            let removed_edges: usize = qualifying.iter().map(|c| c.edges.len()).sum();

            if removed_edges == component_edges {
                // Nothing but short spurs: the component is degenerate
                let length = graph.component_length(&component);
                remove_component(graph, &component);
                warnings.push(SkeletonWarning::TrivialSkeleton { component_length: length });
            } else {
                for chain in &qualifying {
                    for &(a, b) in &chain.edges {
                        graph.remove_edge(a, b);
                    }
                }
            }
            changed = true;
        }
        if !changed {
            break;
        }
    }

    for component in graph.components() {
        let length = graph.component_length(&component);
        if length < min_spur_length {
            remove_component(graph, &component);
            warnings.push(SkeletonWarning::TrivialSkeleton { component_length: length });
        }
    }

    warnings
}

fn remove_component(graph: &mut SkeletonGraph, component: &[usize]) {
    let edges: Vec<(usize, usize)> = component
        .iter()
        .flat_map(|&a| {
            graph
                .neighbors(a)
                .iter()
                .copied()
                .filter(move |&b| b > a)
                .map(move |b| (a, b))
        })
        .collect();
    for (a, b) in edges {
        graph.remove_edge(a, b);
    }
}

struct LeafChain {
    edges: Vec<(usize, usize)>,
    length: f64,
    terminus: usize,
}

/// Walk from a leaf through degree-2 vertices until a junction or another
/// leaf is reached.
fn leaf_chain(graph: &SkeletonGraph, leaf: usize) -> LeafChain {
    let mut edges = Vec::new();
    let mut length = 0.0;

    let mut prev = leaf;
    let mut cur = graph.neighbors(leaf)[0];
    edges.push((prev, cur));
    length += graph.edge_length(prev, cur);

    while graph.degree(cur) == 2 {
        let next = match graph.neighbors(cur).iter().copied().find(|&n| n != prev) {
            Some(n) => n,
            None => break,
        };
        edges.push((cur, next));
        length += graph.edge_length(cur, next);
        prev = cur;
        cur = next;
    }

    LeafChain { edges, length, terminus: cur }
}
