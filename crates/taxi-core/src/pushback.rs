//! Pushback target and spawn heading for a departing aircraft.
//!
//! A nearest-node lookup from a gate usually lands on the gate's short spur
//! stub rather than the through-taxiway. [`GateSpurResolution`] takes one more
//! hop in the push direction so the pushback ends on the taxiway centerline.

use crate::graph::TaxiGraph;
use crate::models::{ParkingSpot, TaxiNodeId, TaxiPoint};
use crate::nearest::nearest_node_in_direction;
use crate::spatial::{bearing_deg, heading_unit_vector, normalize_heading};
use serde::{Deserialize, Serialize};

/// Where the aircraft leaves the gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateExit {
    /// Spur connector nearest the gate in the push direction
    pub entry: TaxiNodeId,
    /// Pushback target; equals `entry` when no forward hop exists
    pub start: TaxiNodeId,
    pub push_dir_east: f64,
    pub push_dir_north: f64,
}

impl GateExit {
    /// True when the spur had a usable forward neighbor.
    pub fn has_forward_hop(&self) -> bool {
        self.start != self.entry
    }

    /// Heading to spawn with, in degrees true.
    ///
    /// Nose toward the terminal: the reverse of the entry→start bearing, so
    /// that after the reverse pushback the aircraft faces the taxiway. Uses the
    /// gate's published heading when there is no forward hop.
    pub fn spawn_heading(&self, gate: &ParkingSpot, nodes: &[TaxiPoint]) -> f64 {
        if !self.has_forward_hop() {
            return gate.heading_deg;
        }
        let entry = nodes.get(self.entry.index());
        let start = nodes.get(self.start.index());
        let (Some(entry), Some(start)) = (entry, start) else {
            return gate.heading_deg;
        };
        let bearing = bearing_deg(start.east_m - entry.east_m, start.north_m - entry.north_m);
        normalize_heading(bearing + 180.0)
    }
}

/// Gate spur resolution policy: nearest node behind the gate, then the
/// neighbor best aligned with the push direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateSpurResolution;

impl GateSpurResolution {
    /// Resolve the exit for a gate, or `None` if there are no taxi points.
    pub fn resolve(
        &self,
        gate: &ParkingSpot,
        graph: &TaxiGraph,
        nodes: &[TaxiPoint],
    ) -> Option<GateExit> {
        let (push_dir_east, push_dir_north) = heading_unit_vector(gate.heading_deg + 180.0);
        let entry = nearest_node_in_direction(
            gate.east_m,
            gate.north_m,
            push_dir_east,
            push_dir_north,
            nodes,
        )?;
        let start = self
            .forward_neighbor(entry, graph, nodes, push_dir_east, push_dir_north)
            .unwrap_or(entry);

        Some(GateExit {
            entry,
            start,
            push_dir_east,
            push_dir_north,
        })
    }

    /// Neighbor of `entry` whose direction has the largest positive alignment
    /// with the push direction. The first neighbor wins on ties.
    pub fn forward_neighbor(
        &self,
        entry: TaxiNodeId,
        graph: &TaxiGraph,
        nodes: &[TaxiPoint],
        dir_east: f64,
        dir_north: f64,
    ) -> Option<TaxiNodeId> {
        let origin = nodes.get(entry.index())?;
        let mut best: Option<(TaxiNodeId, f64)> = None;

        for &neighbor in graph.neighbors(entry) {
            let Some(point) = nodes.get(neighbor.index()) else {
                continue;
            };
            let de = point.east_m - origin.east_m;
            let dn = point.north_m - origin.north_m;
            let len = (de * de + dn * dn).sqrt();
            if len <= f64::EPSILON {
                continue;
            }
            let alignment = (de * dir_east + dn * dir_north) / len;
            if alignment <= 0.0 {
                continue;
            }
            match best {
                Some((_, best_alignment)) if alignment <= best_alignment => {}
                _ => best = Some((neighbor, alignment)),
            }
        }

        best.map(|(id, _)| id)
    }
}

/// Convenience wrapper for [`GateSpurResolution::resolve`].
pub fn resolve_exit(
    gate: &ParkingSpot,
    graph: &TaxiGraph,
    nodes: &[TaxiPoint],
) -> Option<GateExit> {
    GateSpurResolution.resolve(gate, graph, nodes)
}
