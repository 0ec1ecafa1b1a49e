//! Geocoordinate plus optional distance.

use std::fmt;

use super::coordinates::Coordinates;
use super::distance::Distance;
use super::error::DomainError;

/// A position with an optional distance to some reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    coordinates: Coordinates,
    distance: Option<Distance>,
}

impl Geo {
    /// Validate raw latitude, longitude and optional distance.
    pub fn new(
        latitude: f64,
        longitude: f64,
        distance_km: Option<f64>,
    ) -> Result<Self, DomainError> {
        let coordinates = Coordinates::new(latitude, longitude)?;
        let distance = distance_km.map(Distance::from_km).transpose()?;
        Ok(Self {
            coordinates,
            distance,
        })
    }

    pub fn from_coordinates(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            distance: None,
        }
    }

    pub fn with_distance(mut self, distance: Distance) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude()
    }

    pub fn distance(&self) -> Option<Distance> {
        self.distance
    }
}

impl fmt::Display for Geo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.coordinates)?;
        if let Some(distance) = self.distance {
            write!(f, " {distance}")?;
        }
        Ok(())
    }
}
