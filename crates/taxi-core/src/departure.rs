//! Gate-to-climb waypoint synthesis.
//!
//! Assembles pushback, taxi, runway lineup and climb-out guidance for one
//! departure. Planning never fails once a gate and runway are known: missing
//! taxi data or a disconnected network shortens the route and is reported in
//! [`DepartureDiagnostics`].

use crate::clearance::taxi_via;
use crate::error::FacilityError;
use crate::graph::{build_unweighted_graph, build_weighted_graph};
use crate::holding::find_holding_short;
use crate::models::{
    FacilitySnapshot, ParkingSpotId, TaxiNodeId, TaxiPoint, Waypoint, WaypointFlags,
};
use crate::nearest::nearest_reachable_node;
use crate::pathfind::{path_length_m, shortest_distance_path};
use crate::pushback::GateSpurResolution;
use crate::selection::{GateSelection, RunwaySelection};
use crate::spatial::{geodetic_to_offset, heading_unit_vector, offset_to_geodetic};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const FEET_PER_METER: f64 = 3.280_839_895;
pub const METERS_PER_NM: f64 = 1852.0;

/// One climb-out fix ahead of the threshold along the runway heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimbFix {
    pub distance_nm: f64,
    pub altitude_agl_ft: f64,
    pub speed_kts: f64,
    pub throttle_pct: f64,
}

/// Speeds and climb profile for a departure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartureProfile {
    pub pushback_speed_kts: f64,
    pub taxi_speed_kts: f64,
    pub lineup_speed_kts: f64,
    pub climb: Vec<ClimbFix>,
}

impl Default for DepartureProfile {
    fn default() -> Self {
        Self {
            pushback_speed_kts: 3.0,
            taxi_speed_kts: 15.0,
            lineup_speed_kts: 5.0,
            climb: vec![
                ClimbFix {
                    distance_nm: 1.5,
                    altitude_agl_ft: 1500.0,
                    speed_kts: 200.0,
                    throttle_pct: 100.0,
                },
                ClimbFix {
                    distance_nm: 5.0,
                    altitude_agl_ft: 4000.0,
                    speed_kts: 240.0,
                    throttle_pct: 90.0,
                },
                ClimbFix {
                    distance_nm: 12.0,
                    altitude_agl_ft: 9000.0,
                    speed_kts: 280.0,
                    throttle_pct: 85.0,
                },
            ],
        }
    }
}

/// How the taxi destination was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingPointSource {
    /// A detected holding-short node next to the runway
    HoldingShort,
    /// Nearest reachable node to the threshold; not verified to be runway-adjacent
    UnverifiedNearest,
    /// No taxi destination (no taxi network)
    #[default]
    None,
}

/// A part of the route that was skipped or shortened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedSegment {
    /// No taxi points or taxi paths: pushback and taxi were skipped
    NoTaxiNetwork,
    /// Gate spur has no forward neighbor; pushback ends on the spur node
    GateSpurOnly,
    /// Taxi destination unreachable from the pushback node
    TaxiPathUnavailable,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartureDiagnostics {
    pub holding_point: HoldingPointSource,
    pub holding_node: Option<TaxiNodeId>,
    pub pushback_node: Option<TaxiNodeId>,
    pub taxi_distance_m: f64,
    pub degraded: Vec<DegradedSegment>,
}

impl DepartureDiagnostics {
    /// Number of omitted or degraded route segments, counting an unverified
    /// holding point as one.
    pub fn degraded_count(&self) -> usize {
        let unverified = usize::from(self.holding_point == HoldingPointSource::UnverifiedNearest);
        self.degraded.len() + unverified
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty() || self.holding_point != HoldingPointSource::HoldingShort
    }
}

/// Where and how the aircraft is spawned before the first waypoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,
    pub heading_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeparturePlan {
    pub gate: ParkingSpotId,
    pub gate_number: u32,
    pub runway: usize,
    pub spawn: SpawnPoint,
    pub waypoints: Vec<Waypoint>,
    /// Taxiway names along the taxi segment
    pub taxi_via: Vec<String>,
    pub diagnostics: DepartureDiagnostics,
}

fn ground_waypoint(
    lat: f64,
    lon: f64,
    altitude_ft: f64,
    speed_kts: f64,
    extra: WaypointFlags,
) -> Waypoint {
    Waypoint {
        lat,
        lon,
        altitude_ft,
        flags: WaypointFlags::ON_GROUND | WaypointFlags::SPEED_REQUESTED | extra,
        speed_kts,
        throttle_pct: 0.0,
    }
}

/// Select a gate and runway, then plan the departure.
pub fn plan_departure_with(
    snapshot: &FacilitySnapshot,
    gate: GateSelection,
    runway: RunwaySelection,
    profile: &DepartureProfile,
) -> Result<DeparturePlan, FacilityError> {
    let gate = gate.select(snapshot)?;
    let runway = runway.select(snapshot)?;
    plan_departure(snapshot, gate, runway, profile)
}

/// Plan the full gate → runway → climb waypoint sequence.
///
/// Only fails when `gate` or `runway` do not exist in the snapshot.
pub fn plan_departure(
    snapshot: &FacilitySnapshot,
    gate: ParkingSpotId,
    runway: usize,
    profile: &DepartureProfile,
) -> Result<DeparturePlan, FacilityError> {
    let spot = snapshot
        .gate(gate)
        .filter(|spot| spot.is_valid())
        .ok_or(FacilityError::InvalidGate(gate))?;
    let rwy = snapshot.runways.get(runway).ok_or(FacilityError::RunwayNotFound {
        index: runway,
        count: snapshot.runways.len(),
    })?;

    let airport = &snapshot.airport;
    let ground_alt_ft = airport.altitude_m * FEET_PER_METER;
    let (thr_lat, thr_lon) = rwy.threshold();
    let (thr_east, thr_north) = geodetic_to_offset(airport.lat, airport.lon, thr_lat, thr_lon);
    let (gate_lat, gate_lon) =
        offset_to_geodetic(airport.lat, airport.lon, spot.east_m, spot.north_m);
    let node_position = |node: TaxiNodeId, nodes: &[TaxiPoint]| {
        let point = &nodes[node.index()];
        offset_to_geodetic(airport.lat, airport.lon, point.east_m, point.north_m)
    };

    let mut waypoints = Vec::new();
    let mut diagnostics = DepartureDiagnostics::default();
    let mut spawn_heading = spot.heading_deg;
    let mut via = Vec::new();

    let nodes = &snapshot.taxi_points;
    let graph = build_unweighted_graph(&snapshot.taxi_paths, nodes);
    let exit = if snapshot.has_taxi_network() {
        GateSpurResolution.resolve(spot, &graph, nodes)
    } else {
        None
    };

    match exit {
        Some(exit) => {
            spawn_heading = exit.spawn_heading(spot, nodes);
            diagnostics.pushback_node = Some(exit.start);
            if !exit.has_forward_hop() {
                debug!(gate = spot.number, node = %exit.entry, "no taxiway hop past gate spur");
                diagnostics.degraded.push(DegradedSegment::GateSpurOnly);
            }

            let (lat, lon) = node_position(exit.start, nodes);
            waypoints.push(ground_waypoint(
                lat,
                lon,
                ground_alt_ft,
                profile.pushback_speed_kts,
                WaypointFlags::REVERSE,
            ));

            let holding = find_holding_short(&snapshot.taxi_paths, nodes, thr_east, thr_north);
            let target = match holding {
                Some(node) => {
                    diagnostics.holding_point = HoldingPointSource::HoldingShort;
                    Some(node)
                }
                None => {
                    let fallback =
                        nearest_reachable_node(exit.start, &graph, thr_east, thr_north, nodes);
                    if fallback.is_some() {
                        diagnostics.holding_point = HoldingPointSource::UnverifiedNearest;
                    }
                    warn!(
                        runway,
                        node = ?fallback,
                        "no holding-short node found, using nearest reachable node"
                    );
                    fallback
                }
            };
            diagnostics.holding_node = target;

            if let Some(target) = target {
                let weighted = build_weighted_graph(&snapshot.taxi_paths, nodes);
                match shortest_distance_path(&weighted, exit.start, target) {
                    Some(path) => {
                        diagnostics.taxi_distance_m = path_length_m(&weighted, &path);
                        via = taxi_via(
                            &path,
                            &snapshot.taxi_paths,
                            &snapshot.taxi_names,
                            nodes.len(),
                        );
                        for &node in path.iter().skip(1) {
                            let (lat, lon) = node_position(node, nodes);
                            waypoints.push(ground_waypoint(
                                lat,
                                lon,
                                ground_alt_ft,
                                profile.taxi_speed_kts,
                                WaypointFlags::empty(),
                            ));
                        }
                    }
                    None => {
                        warn!(
                            from = %exit.start,
                            to = %target,
                            "taxi destination unreachable, omitting taxi segment"
                        );
                        diagnostics.degraded.push(DegradedSegment::TaxiPathUnavailable);
                    }
                }
            }
        }
        None => {
            warn!(
                icao = %airport.icao,
                taxi_points = nodes.len(),
                taxi_paths = snapshot.taxi_paths.len(),
                "no taxi network, routing gate directly to threshold"
            );
            diagnostics.degraded.push(DegradedSegment::NoTaxiNetwork);
        }
    }

    waypoints.push(ground_waypoint(
        thr_lat,
        thr_lon,
        rwy.altitude_m * FEET_PER_METER,
        profile.lineup_speed_kts,
        WaypointFlags::empty(),
    ));

    let (dir_east, dir_north) = heading_unit_vector(rwy.heading_deg);
    for fix in &profile.climb {
        let distance_m = fix.distance_nm * METERS_PER_NM;
        let (lat, lon) =
            offset_to_geodetic(thr_lat, thr_lon, dir_east * distance_m, dir_north * distance_m);
        waypoints.push(Waypoint {
            lat,
            lon,
            altitude_ft: fix.altitude_agl_ft,
            flags: WaypointFlags::SPEED_REQUESTED
                | WaypointFlags::THROTTLE_REQUESTED
                | WaypointFlags::COMPUTE_VERTICAL_SPEED
                | WaypointFlags::ALTITUDE_IS_AGL,
            speed_kts: fix.speed_kts,
            throttle_pct: fix.throttle_pct,
        });
    }

    info!(
        icao = %airport.icao,
        gate = spot.number,
        runway,
        waypoints = waypoints.len(),
        taxi_distance_m = diagnostics.taxi_distance_m,
        holding_point = ?diagnostics.holding_point,
        degraded = diagnostics.degraded_count(),
        "departure planned"
    );

    Ok(DeparturePlan {
        gate,
        gate_number: spot.number,
        runway,
        spawn: SpawnPoint {
            lat: gate_lat,
            lon: gate_lon,
            altitude_ft: ground_alt_ft,
            heading_deg: spawn_heading,
        },
        waypoints,
        taxi_via: via,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirportReference, ParkingSpot, Runway, TaxiPathEdge, TaxiPathType};

    fn bare_snapshot() -> FacilitySnapshot {
        let mut snapshot = FacilitySnapshot::new(AirportReference {
            lat: 50.0,
            lon: 14.0,
            altitude_m: 380.0,
            icao: "TEST".to_string(),
        });
        snapshot.parking_spots.push(ParkingSpot {
            number: 3,
            heading_deg: 60.0,
            east_m: 100.0,
            north_m: -50.0,
            usage: 0,
        });
        snapshot.runways.push(Runway {
            lat: 50.0,
            lon: 14.0,
            altitude_m: 380.0,
            heading_deg: 240.0,
            length_m: 3000.0,
        });
        snapshot
    }

    #[test]
    fn default_profile_matches_published_departure() {
        let profile = DepartureProfile::default();
        assert_eq!(profile.pushback_speed_kts, 3.0);
        assert_eq!(profile.taxi_speed_kts, 15.0);
        assert_eq!(profile.lineup_speed_kts, 5.0);
        let alts: Vec<f64> = profile.climb.iter().map(|f| f.altitude_agl_ft).collect();
        assert_eq!(alts, vec![1500.0, 4000.0, 9000.0]);
    }

    #[test]
    fn no_taxi_network_goes_gate_to_threshold() {
        let snapshot = bare_snapshot();
        let plan =
            plan_departure(&snapshot, ParkingSpotId(0), 0, &DepartureProfile::default()).unwrap();

        assert_eq!(plan.waypoints.len(), 4);
        assert!(plan.waypoints[0].is_on_ground());
        assert_eq!(plan.waypoints[0].speed_kts, 5.0);
        assert!(plan.waypoints[1..].iter().all(|w| !w.is_on_ground()));
        assert_eq!(plan.spawn.heading_deg, 60.0);
        assert_eq!(plan.diagnostics.degraded, vec![DegradedSegment::NoTaxiNetwork]);
        assert_eq!(plan.diagnostics.degraded_count(), 1);
        assert_eq!(plan.diagnostics.holding_point, HoldingPointSource::None);
    }

    #[test]
    fn points_without_paths_count_as_no_network() {
        let mut snapshot = bare_snapshot();
        snapshot.taxi_points.push(TaxiPoint::new(0.0, 0.0));
        let plan =
            plan_departure(&snapshot, ParkingSpotId(0), 0, &DepartureProfile::default()).unwrap();
        assert_eq!(plan.diagnostics.degraded, vec![DegradedSegment::NoTaxiNetwork]);
        assert_eq!(plan.waypoints.len(), 4);
    }

    #[test]
    fn missing_holding_short_uses_unverified_nearest() {
        let mut snapshot = bare_snapshot();
        // Straight taxiway heading away from the gate along the push direction
        snapshot.taxi_points = vec![
            TaxiPoint::new(60.0, -75.0),
            TaxiPoint::new(0.0, -110.0),
            TaxiPoint::new(300.0, 100.0),
        ];
        snapshot.taxi_paths = vec![
            TaxiPathEdge::new(0, 1, TaxiPathType::Taxi),
            TaxiPathEdge::new(0, 2, TaxiPathType::Taxi),
        ];
        let plan =
            plan_departure(&snapshot, ParkingSpotId(0), 0, &DepartureProfile::default()).unwrap();

        assert_eq!(
            plan.diagnostics.holding_point,
            HoldingPointSource::UnverifiedNearest
        );
        assert!(plan.diagnostics.is_degraded());
        assert!(plan.diagnostics.degraded.is_empty());
        assert_eq!(plan.diagnostics.degraded_count(), 1);
        assert!(plan.waypoints[0].flags.contains(WaypointFlags::REVERSE));
    }

    #[test]
    fn spur_without_forward_hop_counts_as_degraded() {
        let mut snapshot = bare_snapshot();
        // Spur 0 behind the gate; its only taxiway neighbor lies back toward the gate
        snapshot.taxi_points = vec![
            TaxiPoint::new(65.4, -70.0),
            TaxiPoint::new(100.0, 50.0),
            TaxiPoint::new(150.0, 60.0),
            TaxiPoint::new(200.0, 70.0),
            TaxiPoint::new(300.0, 100.0),
        ];
        snapshot.taxi_paths = vec![
            TaxiPathEdge::new(0, 1, TaxiPathType::Taxi),
            TaxiPathEdge::new(1, 2, TaxiPathType::Taxi),
            TaxiPathEdge::new(2, 3, TaxiPathType::Parking),
            TaxiPathEdge::new(3, 4, TaxiPathType::Runway),
        ];
        let plan =
            plan_departure(&snapshot, ParkingSpotId(0), 0, &DepartureProfile::default()).unwrap();

        assert_eq!(plan.diagnostics.degraded, vec![DegradedSegment::GateSpurOnly]);
        assert_eq!(plan.diagnostics.holding_point, HoldingPointSource::HoldingShort);
        assert_eq!(plan.diagnostics.degraded_count(), 1);
        assert_eq!(plan.diagnostics.pushback_node, Some(TaxiNodeId(0)));
        assert_eq!(plan.spawn.heading_deg, 60.0);
        // pushback + two taxi nodes + lineup + three climb fixes
        assert_eq!(plan.waypoints.len(), 7);
    }

    #[test]
    fn unknown_gate_or_runway_is_rejected() {
        let snapshot = bare_snapshot();
        let profile = DepartureProfile::default();
        assert!(matches!(
            plan_departure(&snapshot, ParkingSpotId(5), 0, &profile),
            Err(FacilityError::InvalidGate(_))
        ));
        assert!(matches!(
            plan_departure(&snapshot, ParkingSpotId(0), 1, &profile),
            Err(FacilityError::RunwayNotFound { index: 1, count: 1 })
        ));
    }

    #[test]
    fn profile_deserializes_partial_overrides() {
        let profile: DepartureProfile =
            serde_json::from_str(r#"{ "taxi_speed_kts": 20.0 }"#).unwrap();
        assert_eq!(profile.taxi_speed_kts, 20.0);
        assert_eq!(profile.pushback_speed_kts, 3.0);
        assert_eq!(profile.climb.len(), 3);
    }
}
