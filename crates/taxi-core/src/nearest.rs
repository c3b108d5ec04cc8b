//! Nearest-node queries over taxi points.
//!
//! All scans are exhaustive and keep the first (lowest-index) node on ties so
//! identical inputs always select the same node.

use crate::graph::TaxiGraph;
use crate::models::{TaxiNodeId, TaxiPoint};
use std::collections::VecDeque;

/// Nearest taxi point to a target offset by squared Euclidean distance.
pub fn nearest_node(
    target_east: f64,
    target_north: f64,
    nodes: &[TaxiPoint],
) -> Option<TaxiNodeId> {
    nearest_among(
        (0..nodes.len()).map(TaxiNodeId),
        target_east,
        target_north,
        nodes,
    )
}

/// Nearest node lying strictly ahead of the origin along a direction.
///
/// Candidates must have a positive dot product between their displacement
/// from the origin and `(dir_east, dir_north)`. Falls back to
/// [`nearest_node`] when nothing lies in the forward half-space.
pub fn nearest_node_in_direction(
    origin_east: f64,
    origin_north: f64,
    dir_east: f64,
    dir_north: f64,
    nodes: &[TaxiPoint],
) -> Option<TaxiNodeId> {
    let forward = (0..nodes.len()).map(TaxiNodeId).filter(|id| {
        let node = &nodes[id.index()];
        let dot = (node.east_m - origin_east) * dir_east
            + (node.north_m - origin_north) * dir_north;
        dot > 0.0
    });

    nearest_among(forward, origin_east, origin_north, nodes)
        .or_else(|| nearest_node(origin_east, origin_north, nodes))
}

/// Every node reachable from `from` in the hop graph, `from` included.
///
/// Returned as a membership mask indexed by node.
pub fn reachable_from(from: TaxiNodeId, graph: &TaxiGraph) -> Vec<bool> {
    let mut visited = vec![false; graph.node_count()];
    if !graph.contains(from) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited[from.index()] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors(current) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                queue.push_back(next);
            }
        }
    }

    visited
}

/// Reachable node (from `from`) nearest the target offset.
///
/// With no edges the only reachable node is `from` itself.
pub fn nearest_reachable_node(
    from: TaxiNodeId,
    graph: &TaxiGraph,
    target_east: f64,
    target_north: f64,
    nodes: &[TaxiPoint],
) -> Option<TaxiNodeId> {
    if from.index() >= nodes.len() {
        return None;
    }
    let reachable = reachable_from(from, graph);
    let candidates = (0..nodes.len().min(reachable.len()))
        .filter(|&idx| reachable[idx])
        .map(TaxiNodeId);

    nearest_among(candidates, target_east, target_north, nodes).or(Some(from))
}

fn nearest_among(
    candidates: impl Iterator<Item = TaxiNodeId>,
    target_east: f64,
    target_north: f64,
    nodes: &[TaxiPoint],
) -> Option<TaxiNodeId> {
    let mut best: Option<(TaxiNodeId, f64)> = None;
    for id in candidates {
        let dist_sq = nodes[id.index()].distance_sq_to(target_east, target_north);
        match best {
            Some((_, best_sq)) if dist_sq >= best_sq => {}
            _ => best = Some((id, dist_sq)),
        }
    }
    best.map(|(id, _)| id)
}
