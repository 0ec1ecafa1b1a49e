//! Fuel station aggregate.

use std::fmt;

use uuid::Uuid;

use super::distance::Distance;
use super::fuel::{FuelType, PriceEntry};
use super::geo::Geo;
use super::prices::{PriceList, PriceLookupError};

/// Error returned when parsing an invalid station id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id {id:?}: {reason}")]
pub struct InvalidStationId {
    id: String,
    reason: String,
}

/// Error returned when mandatory station fields are blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing mandatory station fields: {}", .missing.join(", "))]
pub struct InvalidStation {
    pub missing: Vec<&'static str>,
}

/// Stable station identifier assigned by the price service.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId(Uuid);

impl StationId {
    /// Parse a station id from its hyphenated UUID form.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        Uuid::parse_str(s.trim())
            .map(StationId)
            .map_err(|e| InvalidStationId {
                id: s.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Where a station is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoLocation {
    pub street: String,
    pub house_number: String,
    pub post_code: String,
    pub geo: Option<Geo>,
}

/// A fuel station with its current prices.
///
/// Built by the response adapter from a single station record and not
/// modified afterwards. The station owns its location and price list.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    id: StationId,
    name: String,
    brand: String,
    place: String,
    location: GeoLocation,
    distance: Distance,
    prices: PriceList,
    is_open: Option<bool>,
}

impl Station {
    /// Create a station.
    ///
    /// Name, brand and place are trimmed and must not be blank.
    pub fn new(
        id: StationId,
        name: &str,
        brand: &str,
        place: &str,
        location: GeoLocation,
        distance: Distance,
        prices: Vec<PriceEntry>,
    ) -> Result<Self, InvalidStation> {
        let name = name.trim();
        let brand = brand.trim();
        let place = place.trim();

        let missing: Vec<&'static str> = [("name", name), ("brand", brand), ("place", place)]
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if !missing.is_empty() {
            return Err(InvalidStation { missing });
        }

        Ok(Self {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            place: place.to_string(),
            location,
            distance,
            prices: PriceList::new(prices),
            is_open: None,
        })
    }

    /// Record whether the station reported itself open.
    pub fn with_open(mut self, is_open: Option<bool>) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    /// Distance to the reference point of the query that produced this station.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn is_open(&self) -> Option<bool> {
        self.is_open
    }

    pub fn geo(&self) -> Option<&Geo> {
        self.location.geo.as_ref()
    }

    pub fn prices(&self) -> &[PriceEntry] {
        self.prices.entries()
    }

    /// Price for one fuel type; see [`PriceList::price`].
    pub fn price(&self, fuel: FuelType) -> Result<f64, PriceLookupError> {
        self.prices.price(fuel)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}, {} ({})",
            self.name, self.brand, self.location.street, self.place, self.distance
        )?;
        for entry in self.prices.entries() {
            write!(f, "; {entry}")?;
        }
        Ok(())
    }
}
