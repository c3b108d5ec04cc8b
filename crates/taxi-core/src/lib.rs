pub mod clearance;
pub mod departure;
pub mod error;
pub mod facility;
pub mod graph;
pub mod holding;
pub mod models;
pub mod nearest;
pub mod pathfind;
pub mod pushback;
pub mod selection;
pub mod spatial;

pub use departure::{
    plan_departure, plan_departure_with, ClimbFix, DegradedSegment, DepartureDiagnostics,
    DeparturePlan, DepartureProfile, HoldingPointSource, SpawnPoint,
};
pub use error::FacilityError;
pub use facility::{FacilityAccumulator, FacilityRecord};
pub use graph::{build_unweighted_graph, build_weighted_graph, TaxiGraph, WeightedTaxiGraph};
pub use holding::find_holding_short;
pub use models::{
    AirportReference, FacilitySnapshot, ParkingSpot, ParkingSpotId, Runway, TaxiName,
    TaxiNodeId, TaxiPathEdge, TaxiPathType, TaxiPoint, Waypoint, WaypointFlags,
};
pub use nearest::{nearest_node, nearest_node_in_direction, nearest_reachable_node};
pub use pathfind::{shortest_distance_path, shortest_hop_path};
pub use pushback::{resolve_exit, GateExit, GateSpurResolution};
pub use selection::{GateSelection, RunwaySelection};
pub use spatial::{geodetic_to_offset, offset_to_geodetic};
