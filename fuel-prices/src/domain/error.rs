//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from transport and parse errors, and from price lookup errors,
//! which signal data-integrity problems rather than bad input.

use super::address::InvalidAddress;
use super::coordinates::InvalidCoordinates;
use super::distance::InvalidDistance;
use super::station::{InvalidStation, InvalidStationId};

/// Validation failure while constructing a domain value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Coordinates(#[from] InvalidCoordinates),

    #[error(transparent)]
    Distance(#[from] InvalidDistance),

    #[error(transparent)]
    Address(#[from] InvalidAddress),

    #[error(transparent)]
    Station(#[from] InvalidStation),

    #[error(transparent)]
    StationId(#[from] InvalidStationId),
}
