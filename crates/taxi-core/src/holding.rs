//! Holding-short detection.
//!
//! A holding-short node sits on a parking-type connector whose other end
//! touches the runway. Only one side of the connector may be a runway node.

use crate::models::{TaxiNodeId, TaxiPathEdge, TaxiPathType, TaxiPoint};
use std::collections::BTreeSet;

/// Node indices that are an endpoint of any runway edge.
pub fn runway_nodes(edges: &[TaxiPathEdge], node_count: usize) -> BTreeSet<TaxiNodeId> {
    let mut nodes = BTreeSet::new();
    for edge in edges.iter().filter(|e| e.path_type == TaxiPathType::Runway) {
        for raw in [edge.start, edge.end] {
            if let Some(id) = TaxiNodeId::checked(raw, node_count) {
                nodes.insert(id);
            }
        }
    }
    nodes
}

/// Holding-short candidates: the off-runway end of every parking connector
/// whose other end is a runway node.
pub fn holding_short_candidates(edges: &[TaxiPathEdge], nodes: &[TaxiPoint]) -> Vec<TaxiNodeId> {
    let on_runway = runway_nodes(edges, nodes.len());
    let mut candidates = Vec::new();

    for edge in edges.iter().filter(|e| e.path_type == TaxiPathType::Parking) {
        let Some((a, b)) = edge.taxi_endpoints(nodes.len()) else {
            continue;
        };
        match (on_runway.contains(&a), on_runway.contains(&b)) {
            (false, true) => candidates.push(a),
            (true, false) => candidates.push(b),
            _ => {}
        }
    }

    candidates
}

/// Holding-short node nearest the runway threshold offset, if any exists.
///
/// Callers fall back to a nearest-reachable search when this returns `None`.
pub fn find_holding_short(
    edges: &[TaxiPathEdge],
    nodes: &[TaxiPoint],
    thresh_east: f64,
    thresh_north: f64,
) -> Option<TaxiNodeId> {
    let mut best: Option<(TaxiNodeId, f64)> = None;
    for id in holding_short_candidates(edges, nodes) {
        let dist_sq = nodes[id.index()].distance_sq_to(thresh_east, thresh_north);
        let closer = match best {
            Some((best_id, best_sq)) => dist_sq < best_sq || (dist_sq == best_sq && id < best_id),
            None => true,
        };
        if closer {
            best = Some((id, dist_sq));
        }
    }
    best.map(|(id, _)| id)
}
