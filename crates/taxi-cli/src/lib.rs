//! Taxi CLI - Command line tools for ground departure planning.
//!
//! This crate provides:
//! - plan_departure: plan a gate-to-climb route from a facility snapshot

pub mod request;

pub use request::{load_profile, load_snapshot, DepartureRequest};
