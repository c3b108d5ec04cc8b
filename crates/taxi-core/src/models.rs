//! Core data models for airport facility records and guidance waypoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index into the taxi-point table of a facility snapshot.
///
/// Parking spots live in a separate table whose indices overlap with this
/// one; never build a `TaxiNodeId` from a parking index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxiNodeId(pub(crate) usize);

impl TaxiNodeId {
    /// Bounds-checked conversion from a raw facility index.
    pub fn checked(raw: u32, node_count: usize) -> Option<Self> {
        let index = raw as usize;
        (index < node_count).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaxiNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "taxi#{}", self.0)
    }
}

/// Index into the parking-spot table of a facility snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParkingSpotId(pub(crate) usize);

impl ParkingSpotId {
    /// Bounds-checked conversion from a parking table index.
    pub fn checked(index: usize, spot_count: usize) -> Option<Self> {
        (index < spot_count).then_some(Self(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParkingSpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parking#{}", self.0)
    }
}

/// Fixed origin for all local-offset math at one airport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportReference {
    pub lat: f64,
    pub lon: f64,
    /// Elevation in meters MSL
    pub altitude_m: f64,
    #[serde(default)]
    pub icao: String,
}

/// A parking spot (gate, ramp or tie-down) with its local offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSpot {
    /// Published spot number; 0 means unassigned
    pub number: u32,
    /// Degrees true
    pub heading_deg: f64,
    pub east_m: f64,
    pub north_m: f64,
    #[serde(default)]
    pub usage: u32,
}

impl ParkingSpot {
    pub fn is_valid(&self) -> bool {
        self.number > 0
    }
}

/// A node of the taxi network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxiPoint {
    pub east_m: f64,
    pub north_m: f64,
    #[serde(default)]
    pub point_type: u32,
    #[serde(default)]
    pub orientation: u32,
}

impl TaxiPoint {
    pub fn new(east_m: f64, north_m: f64) -> Self {
        Self {
            east_m,
            north_m,
            point_type: 0,
            orientation: 0,
        }
    }

    pub fn distance_sq_to(&self, east_m: f64, north_m: f64) -> f64 {
        let de = self.east_m - east_m;
        let dn = self.north_m - north_m;
        de * de + dn * dn
    }

    pub fn distance_to(&self, other: &TaxiPoint) -> f64 {
        self.distance_sq_to(other.east_m, other.north_m).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxiPathType {
    Taxi,
    Runway,
    Parking,
    Path,
    Closed,
    Vehicle,
    Road,
    PaintedLine,
}

impl TaxiPathType {
    /// Pure taxiway-surface edges.
    pub fn is_taxiway_surface(self) -> bool {
        matches!(self, TaxiPathType::Taxi | TaxiPathType::Path)
    }
}

/// A typed edge of the taxi network.
///
/// `start`/`end` are raw facility indices; for `Parking` edges they may point
/// into the parking-spot index space instead of the taxi-point table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxiPathEdge {
    pub start: u32,
    pub end: u32,
    #[serde(default)]
    pub name_index: Option<u32>,
    pub path_type: TaxiPathType,
}

impl TaxiPathEdge {
    pub fn new(start: u32, end: u32, path_type: TaxiPathType) -> Self {
        Self {
            start,
            end,
            name_index: None,
            path_type,
        }
    }

    pub fn named(mut self, name_index: u32) -> Self {
        self.name_index = Some(name_index);
        self
    }

    /// Both endpoints as taxi nodes, or `None` if either is out of range.
    pub fn taxi_endpoints(&self, node_count: usize) -> Option<(TaxiNodeId, TaxiNodeId)> {
        Some((
            TaxiNodeId::checked(self.start, node_count)?,
            TaxiNodeId::checked(self.end, node_count)?,
        ))
    }
}

/// Taxiway label addressed by `TaxiPathEdge::name_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxiName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runway {
    /// Center position
    pub lat: f64,
    pub lon: f64,
    pub altitude_m: f64,
    /// Primary direction, degrees true
    pub heading_deg: f64,
    pub length_m: f64,
}

bitflags::bitflags! {
    /// Behaviour flags carried by a guidance waypoint.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WaypointFlags: u32 {
        const ON_GROUND = 0b0000_0001;
        const REVERSE = 0b0000_0010;
        const SPEED_REQUESTED = 0b0000_0100;
        const THROTTLE_REQUESTED = 0b0000_1000;
        const COMPUTE_VERTICAL_SPEED = 0b0001_0000;
        const ALTITUDE_IS_AGL = 0b0010_0000;
    }
}

/// A guidance waypoint handed to the simulated-aircraft control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    pub altitude_ft: f64,
    pub flags: WaypointFlags,
    pub speed_kts: f64,
    pub throttle_pct: f64,
}

impl Waypoint {
    pub fn is_on_ground(&self) -> bool {
        self.flags.contains(WaypointFlags::ON_GROUND)
    }
}

/// Immutable facility data for one airport, as assembled by the protocol layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilitySnapshot {
    pub airport: AirportReference,
    #[serde(default)]
    pub parking_spots: Vec<ParkingSpot>,
    #[serde(default)]
    pub taxi_points: Vec<TaxiPoint>,
    #[serde(default)]
    pub taxi_paths: Vec<TaxiPathEdge>,
    #[serde(default)]
    pub taxi_names: Vec<TaxiName>,
    #[serde(default)]
    pub runways: Vec<Runway>,
}

impl FacilitySnapshot {
    pub fn new(airport: AirportReference) -> Self {
        Self {
            airport,
            parking_spots: Vec::new(),
            taxi_points: Vec::new(),
            taxi_paths: Vec::new(),
            taxi_names: Vec::new(),
            runways: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, crate::error::FacilityError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parking spots with an assigned number, in table order.
    pub fn valid_gates(&self) -> impl Iterator<Item = (ParkingSpotId, &ParkingSpot)> {
        self.parking_spots
            .iter()
            .enumerate()
            .filter(|(_, spot)| spot.is_valid())
            .map(|(idx, spot)| (ParkingSpotId(idx), spot))
    }

    pub fn gate(&self, id: ParkingSpotId) -> Option<&ParkingSpot> {
        self.parking_spots.get(id.index())
    }

    pub fn taxi_point(&self, id: TaxiNodeId) -> Option<&TaxiPoint> {
        self.taxi_points.get(id.index())
    }

    pub fn has_taxi_network(&self) -> bool {
        !self.taxi_points.is_empty() && !self.taxi_paths.is_empty()
    }
}
