//! Error types for facility accumulation and departure selection.
//!
//! Route planning itself never fails: disconnected graphs and missing data
//! degrade the plan instead. These errors cover the steps where a caller has
//! asked for something that does not exist.

use crate::models::ParkingSpotId;

/// Errors raised while assembling facility data or selecting a gate/runway.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FacilityError {
    /// A record arrived for a request id that was never registered.
    #[error("unknown facility request id {0}")]
    UnknownRequest(u32),

    /// A record or end-of-batch signal arrived after its batch was closed.
    #[error("facility request {0} already completed")]
    BatchClosed(u32),

    /// The snapshot was requested before every batch completed.
    #[error("facility data incomplete: {0} batch(es) remaining")]
    Incomplete(usize),

    /// No airport reference record was received.
    #[error("no airport reference record received")]
    MissingAirport,

    /// The snapshot has no parking spot with an assigned number.
    #[error("no valid parking spot available")]
    NoValidGate,

    /// The requested gate number does not exist among the valid spots.
    #[error("parking spot number {0} not found")]
    GateNotFound(u32),

    /// A parking spot id outside the table, or one without a number.
    #[error("{0} is not a valid departure gate")]
    InvalidGate(ParkingSpotId),

    /// The snapshot has no runways.
    #[error("no runway available")]
    NoRunway,

    /// The requested runway index is out of range.
    #[error("runway index {index} out of range ({count} runways)")]
    RunwayNotFound { index: usize, count: usize },

    /// The snapshot could not be decoded.
    #[error("invalid facility snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}
