//! Taxiway names along a planned route ("taxi via A, B, C").

use crate::models::{TaxiName, TaxiNodeId, TaxiPathEdge, TaxiPathType};
use std::collections::HashMap;

/// Ordered taxiway names traversed by `path`.
///
/// Each hop is matched to the first routable edge joining the two nodes.
/// Unnamed hops are skipped and consecutive repeats collapse.
pub fn taxi_via(
    path: &[TaxiNodeId],
    edges: &[TaxiPathEdge],
    names: &[TaxiName],
    node_count: usize,
) -> Vec<String> {
    let mut name_by_hop: HashMap<(TaxiNodeId, TaxiNodeId), u32> = HashMap::new();
    for edge in edges {
        if !(edge.path_type.is_taxiway_surface() || edge.path_type == TaxiPathType::Parking) {
            continue;
        }
        let (Some((a, b)), Some(name_index)) = (edge.taxi_endpoints(node_count), edge.name_index)
        else {
            continue;
        };
        name_by_hop.entry((a, b)).or_insert(name_index);
        name_by_hop.entry((b, a)).or_insert(name_index);
    }

    let mut via: Vec<String> = Vec::new();
    for hop in path.windows(2) {
        let Some(name) = name_by_hop
            .get(&(hop[0], hop[1]))
            .and_then(|idx| names.get(*idx as usize))
            .map(|name| name.name.trim())
            .filter(|name| !name.is_empty())
        else {
            continue;
        };
        if via.last().map(String::as_str) != Some(name) {
            via.push(name.to_string());
        }
    }
    via
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(labels: &[&str]) -> Vec<TaxiName> {
        labels
            .iter()
            .map(|name| TaxiName {
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn collapses_repeated_names_and_skips_unnamed() {
        let edges = vec![
            TaxiPathEdge::new(0, 1, TaxiPathType::Taxi).named(1),
            TaxiPathEdge::new(1, 2, TaxiPathType::Taxi).named(1),
            TaxiPathEdge::new(2, 3, TaxiPathType::Taxi),
            TaxiPathEdge::new(4, 3, TaxiPathType::Path).named(2),
            TaxiPathEdge::new(4, 5, TaxiPathType::Parking).named(0),
        ];
        let path: Vec<TaxiNodeId> = (0..6).map(TaxiNodeId).collect();
        let via = taxi_via(&path, &edges, &names(&["", "A", "B5"]), 6);
        assert_eq!(via, vec!["A".to_string(), "B5".to_string()]);
    }

    #[test]
    fn runway_edges_do_not_name_taxi_hops() {
        let edges = vec![TaxiPathEdge::new(0, 1, TaxiPathType::Runway).named(0)];
        let path = vec![TaxiNodeId(0), TaxiNodeId(1)];
        assert!(taxi_via(&path, &edges, &names(&["06/24"]), 2).is_empty());
    }
}
