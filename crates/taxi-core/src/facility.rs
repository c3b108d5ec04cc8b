//! Accumulation of streamed facility batches into an immutable snapshot.
//!
//! The protocol layer registers one request per facility query, feeds every
//! record it receives, and signals end-of-batch per request. Route planning
//! only sees the [`FacilitySnapshot`] produced once all batches are done.

use crate::error::FacilityError;
use crate::models::{
    AirportReference, FacilitySnapshot, ParkingSpot, Runway, TaxiName, TaxiPathEdge, TaxiPoint,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// One facility fact delivered by the simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FacilityRecord {
    Airport(AirportReference),
    ParkingSpot(ParkingSpot),
    TaxiPoint(TaxiPoint),
    TaxiPath(TaxiPathEdge),
    TaxiName(TaxiName),
    Runway(Runway),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchState {
    Open,
    Done,
}

/// Collects facility records until every registered batch has completed.
#[derive(Debug, Default)]
pub struct FacilityAccumulator {
    batches: BTreeMap<u32, BatchState>,
    batches_remaining: usize,
    airport: Option<AirportReference>,
    parking_spots: Vec<ParkingSpot>,
    taxi_points: Vec<TaxiPoint>,
    taxi_paths: Vec<TaxiPathEdge>,
    taxi_names: Vec<TaxiName>,
    runways: Vec<Runway>,
}

impl FacilityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a facility request whose records will follow.
    ///
    /// Re-registering a completed request reopens it; registering an open
    /// one again is a no-op.
    pub fn expect_batch(&mut self, request_id: u32) {
        match self.batches.insert(request_id, BatchState::Open) {
            Some(BatchState::Open) => {}
            Some(BatchState::Done) | None => self.batches_remaining += 1,
        }
    }

    pub fn batches_remaining(&self) -> usize {
        self.batches_remaining
    }

    pub fn is_complete(&self) -> bool {
        self.batches_remaining == 0
    }

    /// Append one record. Table order follows arrival order, which defines
    /// the taxi-point and parking index spaces.
    pub fn push(&mut self, request_id: u32, record: FacilityRecord) -> Result<(), FacilityError> {
        self.check_open(request_id)?;
        match record {
            FacilityRecord::Airport(airport) => self.airport = Some(airport),
            FacilityRecord::ParkingSpot(spot) => self.parking_spots.push(spot),
            FacilityRecord::TaxiPoint(point) => self.taxi_points.push(point),
            FacilityRecord::TaxiPath(edge) => self.taxi_paths.push(edge),
            FacilityRecord::TaxiName(name) => self.taxi_names.push(name),
            FacilityRecord::Runway(runway) => self.runways.push(runway),
        }
        Ok(())
    }

    /// Mark a request's batch as finished.
    pub fn end_of_batch(&mut self, request_id: u32) -> Result<(), FacilityError> {
        self.check_open(request_id)?;
        self.batches.insert(request_id, BatchState::Done);
        self.batches_remaining = self.batches_remaining.saturating_sub(1);
        debug!(
            request_id,
            remaining = self.batches_remaining,
            "facility batch complete"
        );
        Ok(())
    }

    /// Freeze the accumulated records.
    pub fn into_snapshot(self) -> Result<FacilitySnapshot, FacilityError> {
        if !self.is_complete() {
            return Err(FacilityError::Incomplete(self.batches_remaining));
        }
        let airport = self.airport.ok_or(FacilityError::MissingAirport)?;

        info!(
            icao = %airport.icao,
            parking_spots = self.parking_spots.len(),
            taxi_points = self.taxi_points.len(),
            taxi_paths = self.taxi_paths.len(),
            runways = self.runways.len(),
            "facility snapshot ready"
        );

        Ok(FacilitySnapshot {
            airport,
            parking_spots: self.parking_spots,
            taxi_points: self.taxi_points,
            taxi_paths: self.taxi_paths,
            taxi_names: self.taxi_names,
            runways: self.runways,
        })
    }

    fn check_open(&self, request_id: u32) -> Result<(), FacilityError> {
        match self.batches.get(&request_id) {
            Some(BatchState::Open) => Ok(()),
            Some(BatchState::Done) => Err(FacilityError::BatchClosed(request_id)),
            None => Err(FacilityError::UnknownRequest(request_id)),
        }
    }
}
