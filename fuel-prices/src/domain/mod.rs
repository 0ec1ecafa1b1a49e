//! Domain types for fuel price lookup.
//!
//! This module contains the validated domain model. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod address;
mod coordinates;
mod distance;
mod error;
mod fuel;
mod geo;
mod prices;
mod station;

pub use address::{Address, InvalidAddress};
pub use coordinates::{Coordinates, InvalidCoordinates, MAX_LATITUDE, MAX_LONGITUDE};
pub use distance::{Distance, InvalidDistance};
pub use error::DomainError;
pub use fuel::{FuelType, PriceEntry, UnknownFuelType};
pub use geo::Geo;
pub use prices::{PriceList, PriceLookupError};
pub use station::{GeoLocation, InvalidStation, InvalidStationId, Station, StationId};
