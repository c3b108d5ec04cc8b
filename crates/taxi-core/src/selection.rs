//! Gate and runway selection policies.

use crate::error::FacilityError;
use crate::models::{FacilitySnapshot, ParkingSpotId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How to pick the departure gate among valid parking spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateSelection {
    /// The valid spot with this published number (first match in table order)
    Number(u32),
    /// The first valid spot in table order
    #[default]
    First,
    /// A valid spot drawn with a seeded RNG; same seed, same gate
    Seeded(u64),
}

/// How to pick the departure runway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwaySelection {
    Index(usize),
    /// Longest runway; lowest index wins on equal length
    #[default]
    Longest,
}

impl GateSelection {
    pub fn select(self, snapshot: &FacilitySnapshot) -> Result<ParkingSpotId, FacilityError> {
        let valid: Vec<ParkingSpotId> = snapshot.valid_gates().map(|(id, _)| id).collect();
        if valid.is_empty() {
            return Err(FacilityError::NoValidGate);
        }

        match self {
            GateSelection::First => Ok(valid[0]),
            GateSelection::Number(number) => snapshot
                .valid_gates()
                .find(|(_, spot)| spot.number == number)
                .map(|(id, _)| id)
                .ok_or(FacilityError::GateNotFound(number)),
            GateSelection::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Ok(valid[rng.random_range(0..valid.len())])
            }
        }
    }
}

impl RunwaySelection {
    pub fn select(self, snapshot: &FacilitySnapshot) -> Result<usize, FacilityError> {
        let count = snapshot.runways.len();
        if count == 0 {
            return Err(FacilityError::NoRunway);
        }

        match self {
            RunwaySelection::Index(index) if index < count => Ok(index),
            RunwaySelection::Index(index) => Err(FacilityError::RunwayNotFound { index, count }),
            RunwaySelection::Longest => {
                let mut best = 0;
                for (idx, runway) in snapshot.runways.iter().enumerate().skip(1) {
                    if runway.length_m > snapshot.runways[best].length_m {
                        best = idx;
                    }
                }
                Ok(best)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirportReference, ParkingSpot, Runway};

    fn snapshot() -> FacilitySnapshot {
        let mut snapshot = FacilitySnapshot::new(AirportReference {
            lat: 50.1,
            lon: 14.26,
            altitude_m: 380.0,
            icao: "LKPR".to_string(),
        });
        for number in [0, 4, 9, 0, 12] {
            snapshot.parking_spots.push(ParkingSpot {
                number,
                heading_deg: 0.0,
                east_m: 0.0,
                north_m: 0.0,
                usage: 0,
            });
        }
        for length_m in [2500.0, 3700.0, 3700.0] {
            snapshot.runways.push(Runway {
                lat: 50.1,
                lon: 14.26,
                altitude_m: 380.0,
                heading_deg: 240.0,
                length_m,
            });
        }
        snapshot
    }

    #[test]
    fn gate_by_number_and_first() {
        let snapshot = snapshot();
        assert_eq!(GateSelection::First.select(&snapshot).unwrap(), ParkingSpotId(1));
        assert_eq!(
            GateSelection::Number(12).select(&snapshot).unwrap(),
            ParkingSpotId(4)
        );
        assert!(matches!(
            GateSelection::Number(0).select(&snapshot),
            Err(FacilityError::GateNotFound(0))
        ));
    }

    #[test]
    fn seeded_gate_is_reproducible_and_valid() {
        let snapshot = snapshot();
        let first = GateSelection::Seeded(42).select(&snapshot).unwrap();
        for _ in 0..5 {
            assert_eq!(GateSelection::Seeded(42).select(&snapshot).unwrap(), first);
        }
        assert!(snapshot.parking_spots[first.index()].is_valid());
    }

    #[test]
    fn no_valid_gate_is_an_error() {
        let mut snapshot = snapshot();
        snapshot.parking_spots.retain(|spot| spot.number == 0);
        assert!(matches!(
            GateSelection::First.select(&snapshot),
            Err(FacilityError::NoValidGate)
        ));
    }

    #[test]
    fn runway_longest_prefers_lowest_index_on_tie() {
        let snapshot = snapshot();
        assert_eq!(RunwaySelection::Longest.select(&snapshot).unwrap(), 1);
        assert_eq!(RunwaySelection::Index(2).select(&snapshot).unwrap(), 2);
        assert!(matches!(
            RunwaySelection::Index(3).select(&snapshot),
            Err(FacilityError::RunwayNotFound { index: 3, count: 3 })
        ));
    }
}
