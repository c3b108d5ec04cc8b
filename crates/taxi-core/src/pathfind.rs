//! Shortest-path search over the taxi graphs.

use crate::graph::{TaxiGraph, WeightedTaxiGraph};
use crate::models::TaxiNodeId;
use std::collections::VecDeque;

/// Fewest-hop path from `start` to `end`, both included.
///
/// Returns `None` when `end` is not reachable or either node is outside the
/// graph.
pub fn shortest_hop_path(
    graph: &TaxiGraph,
    start: TaxiNodeId,
    end: TaxiNodeId,
) -> Option<Vec<TaxiNodeId>> {
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let n = graph.node_count();
    let mut visited = vec![false; n];
    let mut came_from: Vec<Option<TaxiNodeId>> = vec![None; n];
    let mut queue = VecDeque::new();
    visited[start.index()] = true;
    queue.push_back(start);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        if current == end {
            found = true;
            break;
        }
        for &next in graph.neighbors(current) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                came_from[next.index()] = Some(current);
                queue.push_back(next);
            }
        }
    }

    if !found {
        return None;
    }
    Some(reconstruct_path(&came_from, start, end))
}

/// Shortest-distance path from `start` to `end`, both included.
///
/// Dijkstra with a linear scan for the next unsettled node, which is fine for
/// a single airport's network. Equal tentative distances settle the lowest
/// index first. Stops as soon as `end` is settled.
pub fn shortest_distance_path(
    graph: &WeightedTaxiGraph,
    start: TaxiNodeId,
    end: TaxiNodeId,
) -> Option<Vec<TaxiNodeId>> {
    if !graph.contains(start) || !graph.contains(end) {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut came_from: Vec<Option<TaxiNodeId>> = vec![None; n];
    dist[start.index()] = 0.0;

    loop {
        let mut current: Option<usize> = None;
        for idx in 0..n {
            if settled[idx] || !dist[idx].is_finite() {
                continue;
            }
            match current {
                Some(best) if dist[idx] >= dist[best] => {}
                _ => current = Some(idx),
            }
        }
        let Some(current) = current else {
            break;
        };

        settled[current] = true;
        if current == end.index() {
            break;
        }

        for &(next, length_m) in graph.neighbors(TaxiNodeId(current)) {
            if settled[next.index()] {
                continue;
            }
            let candidate = dist[current] + length_m;
            if candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                came_from[next.index()] = Some(TaxiNodeId(current));
            }
        }
    }

    came_from[end.index()]?;
    Some(reconstruct_path(&came_from, start, end))
}

/// Total Euclidean length of a path through the weighted graph.
pub fn path_length_m(graph: &WeightedTaxiGraph, path: &[TaxiNodeId]) -> f64 {
    path.windows(2)
        .map(|pair| {
            graph
                .neighbors(pair[0])
                .iter()
                .filter(|(next, _)| *next == pair[1])
                .map(|(_, length_m)| *length_m)
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

fn reconstruct_path(
    came_from: &[Option<TaxiNodeId>],
    start: TaxiNodeId,
    end: TaxiNodeId,
) -> Vec<TaxiNodeId> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match came_from[current.index()] {
            Some(prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
