//! Adjacency structures over the taxi network.
//!
//! Both graphs are rebuilt from the raw edge list for every routing
//! computation. Edges with out-of-range endpoints or implausibly long
//! segments are discarded here rather than reported as errors.

use crate::models::{TaxiNodeId, TaxiPathEdge, TaxiPathType, TaxiPoint};
use tracing::debug;

/// Edges longer than this are simulator shortcuts, not guidance segments.
pub const MAX_SEGMENT_LENGTH_M: f64 = 500.0;

/// Unweighted undirected adjacency list.
#[derive(Debug, Clone, Default)]
pub struct TaxiGraph {
    adjacency: Vec<Vec<TaxiNodeId>>,
}

impl TaxiGraph {
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    fn add_edge(&mut self, a: TaxiNodeId, b: TaxiNodeId) {
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn contains(&self, node: TaxiNodeId) -> bool {
        node.index() < self.adjacency.len()
    }

    pub fn neighbors(&self, node: TaxiNodeId) -> &[TaxiNodeId] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_edge(&self, a: TaxiNodeId, b: TaxiNodeId) -> bool {
        self.neighbors(a).contains(&b)
    }
}

/// Undirected adjacency list carrying Euclidean segment length.
#[derive(Debug, Clone, Default)]
pub struct WeightedTaxiGraph {
    adjacency: Vec<Vec<(TaxiNodeId, f64)>>,
}

impl WeightedTaxiGraph {
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    fn add_edge(&mut self, a: TaxiNodeId, b: TaxiNodeId, length_m: f64) {
        self.adjacency[a.index()].push((b, length_m));
        self.adjacency[b.index()].push((a, length_m));
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn contains(&self, node: TaxiNodeId) -> bool {
        node.index() < self.adjacency.len()
    }

    pub fn neighbors(&self, node: TaxiNodeId) -> &[(TaxiNodeId, f64)] {
        self.adjacency
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Default)]
struct FilterStats {
    wrong_type: usize,
    out_of_bounds: usize,
    too_long: usize,
}

/// Apply the shared bounds and length filters to one edge.
fn accept_edge(
    edge: &TaxiPathEdge,
    nodes: &[TaxiPoint],
    stats: &mut FilterStats,
) -> Option<(TaxiNodeId, TaxiNodeId, f64)> {
    let Some((a, b)) = edge.taxi_endpoints(nodes.len()) else {
        stats.out_of_bounds += 1;
        return None;
    };
    let length_m = nodes[a.index()].distance_to(&nodes[b.index()]);
    if length_m > MAX_SEGMENT_LENGTH_M {
        stats.too_long += 1;
        return None;
    }
    Some((a, b, length_m))
}

/// Build the hop graph from taxiway-surface edges (`Taxi`, `Path`) only.
///
/// Parking connectors are left out because their endpoints may live in the
/// parking index space and would wire unrelated taxi nodes together.
pub fn build_unweighted_graph(edges: &[TaxiPathEdge], nodes: &[TaxiPoint]) -> TaxiGraph {
    let mut graph = TaxiGraph::with_nodes(nodes.len());
    let mut stats = FilterStats::default();

    for edge in edges {
        if !edge.path_type.is_taxiway_surface() {
            stats.wrong_type += 1;
            continue;
        }
        if let Some((a, b, _)) = accept_edge(edge, nodes, &mut stats) {
            graph.add_edge(a, b);
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = graph.edge_count(),
        skipped_type = stats.wrong_type,
        skipped_bounds = stats.out_of_bounds,
        skipped_length = stats.too_long,
        "built unweighted taxi graph"
    );
    graph
}

/// Build the distance graph from `Taxi`, `Path` and `Parking` edges.
pub fn build_weighted_graph(edges: &[TaxiPathEdge], nodes: &[TaxiPoint]) -> WeightedTaxiGraph {
    let mut graph = WeightedTaxiGraph::with_nodes(nodes.len());
    let mut stats = FilterStats::default();

    for edge in edges {
        let routable =
            edge.path_type.is_taxiway_surface() || edge.path_type == TaxiPathType::Parking;
        if !routable {
            stats.wrong_type += 1;
            continue;
        }
        if let Some((a, b, length_m)) = accept_edge(edge, nodes, &mut stats) {
            graph.add_edge(a, b, length_m);
        }
    }

    debug!(
        nodes = nodes.len(),
        edges = graph.edge_count(),
        skipped_type = stats.wrong_type,
        skipped_bounds = stats.out_of_bounds,
        skipped_length = stats.too_long,
        "built weighted taxi graph"
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [TaxiPathType; 8] = [
        TaxiPathType::Taxi,
        TaxiPathType::Runway,
        TaxiPathType::Parking,
        TaxiPathType::Path,
        TaxiPathType::Closed,
        TaxiPathType::Vehicle,
        TaxiPathType::Road,
        TaxiPathType::PaintedLine,
    ];

    /// One short edge per type, each between its own pair of nodes.
    fn one_edge_per_type() -> (Vec<TaxiPoint>, Vec<TaxiPathEdge>) {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for (i, path_type) in ALL_TYPES.iter().enumerate() {
            let north = i as f64 * 100.0;
            nodes.push(TaxiPoint::new(0.0, north));
            nodes.push(TaxiPoint::new(50.0, north));
            edges.push(TaxiPathEdge::new(2 * i as u32, 2 * i as u32 + 1, *path_type));
        }
        (nodes, edges)
    }

    #[test]
    fn unweighted_graph_keeps_only_taxiway_surfaces() {
        let (nodes, edges) = one_edge_per_type();
        let graph = build_unweighted_graph(&edges, &nodes);

        assert_eq!(graph.edge_count(), 2);
        for (i, path_type) in ALL_TYPES.iter().enumerate() {
            let a = TaxiNodeId(2 * i);
            let b = TaxiNodeId(2 * i + 1);
            let expected = matches!(path_type, TaxiPathType::Taxi | TaxiPathType::Path);
            assert_eq!(graph.has_edge(a, b), expected, "{path_type:?}");
            assert_eq!(graph.has_edge(b, a), expected, "{path_type:?} reverse");
        }
    }

    #[test]
    fn weighted_graph_adds_parking_connectors() {
        let (nodes, edges) = one_edge_per_type();
        let graph = build_weighted_graph(&edges, &nodes);

        assert_eq!(graph.edge_count(), 3);
        let parking = graph.neighbors(TaxiNodeId(4));
        assert_eq!(parking.len(), 1);
        assert_eq!(parking[0].0, TaxiNodeId(5));
        assert!((parking[0].1 - 50.0).abs() < 1e-9);
        assert!(graph.neighbors(TaxiNodeId(2)).is_empty());
    }

    #[test]
    fn long_segments_are_excluded_from_both_graphs() {
        let nodes = vec![
            TaxiPoint::new(0.0, 0.0),
            TaxiPoint::new(600.0, 0.0),
            TaxiPoint::new(0.0, 400.0),
        ];
        let edges = vec![
            TaxiPathEdge::new(0, 1, TaxiPathType::Taxi),
            TaxiPathEdge::new(0, 2, TaxiPathType::Taxi),
        ];

        let unweighted = build_unweighted_graph(&edges, &nodes);
        assert!(!unweighted.has_edge(TaxiNodeId(0), TaxiNodeId(1)));
        assert!(unweighted.has_edge(TaxiNodeId(0), TaxiNodeId(2)));

        let weighted = build_weighted_graph(&edges, &nodes);
        assert_eq!(weighted.edge_count(), 1);
        assert_eq!(weighted.neighbors(TaxiNodeId(0))[0].0, TaxiNodeId(2));
    }

    #[test]
    fn out_of_range_endpoints_are_discarded() {
        let nodes = vec![TaxiPoint::new(0.0, 0.0), TaxiPoint::new(10.0, 0.0)];
        let edges = vec![
            TaxiPathEdge::new(0, 1, TaxiPathType::Taxi),
            TaxiPathEdge::new(1, 9, TaxiPathType::Taxi),
            TaxiPathEdge::new(42, 0, TaxiPathType::Parking),
        ];

        assert_eq!(build_unweighted_graph(&edges, &nodes).edge_count(), 1);
        let weighted = build_weighted_graph(&edges, &nodes);
        assert_eq!(weighted.edge_count(), 1);
        assert!(weighted.neighbors(TaxiNodeId(9)).is_empty());
    }
}
