//! Geographic coordinate type.

use std::fmt;

/// Largest latitude representable in Web Mercator tiles.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Largest absolute longitude.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    reason: &'static str,
}

/// A validated latitude/longitude pair.
///
/// Latitude is limited to the Web Mercator range and longitude to
/// `[-180, 180]`. Any `Coordinates` value is valid by construction.
///
/// # Examples
///
/// ```
/// use fuel_prices::domain::Coordinates;
///
/// let berlin = Coordinates::new(52.53083, 13.440946).unwrap();
/// assert_eq!(berlin.latitude(), 52.53083);
///
/// // Polar latitudes are rejected
/// assert!(Coordinates::new(89.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create coordinates, rejecting values outside the valid ranges.
    ///
    /// NaN is never in range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
                reason: "latitude must be within ±85.05112878",
            });
        }

        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(InvalidCoordinates {
                latitude,
                longitude,
                reason: "longitude must be within ±180",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
