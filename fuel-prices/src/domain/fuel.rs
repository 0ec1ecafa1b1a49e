//! Fuel types and price entries.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown fuel type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fuel type: {0}")]
pub struct UnknownFuelType(pub String);

/// A fuel product that is priced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Diesel,
    E5,
    E10,
}

impl FuelType {
    /// Every fuel type, in display order.
    pub const ALL: [FuelType; 3] = [FuelType::Diesel, FuelType::E5, FuelType::E10];

    /// The JSON key (and query value) used by the station service.
    pub fn key(&self) -> &'static str {
        match self {
            FuelType::Diesel => "diesel",
            FuelType::E5 => "e5",
            FuelType::E10 => "e10",
        }
    }
}

impl FromStr for FuelType {
    type Err = UnknownFuelType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFuelType(s.to_string()))
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FuelType::Diesel => "Diesel",
            FuelType::E5 => "Super E5",
            FuelType::E10 => "Super E10",
        };
        f.pad(label)
    }
}

/// A single advertised price for one fuel type.
///
/// Nothing stops a list from holding two entries for the same fuel;
/// that is caught when the list is queried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEntry {
    pub fuel: FuelType,
    pub price: f64,
}

impl PriceEntry {
    pub fn new(fuel: FuelType, price: f64) -> Self {
        Self { fuel, price }
    }
}

impl fmt::Display for PriceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.3}", self.fuel, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keys() {
        assert_eq!("diesel".parse::<FuelType>().unwrap(), FuelType::Diesel);
        assert_eq!("E5".parse::<FuelType>().unwrap(), FuelType::E5);
        assert_eq!(" e10 ".parse::<FuelType>().unwrap(), FuelType::E10);
    }

    #[test]
    fn reject_unknown() {
        let err = "lpg".parse::<FuelType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown fuel type: lpg");
    }

    #[test]
    fn key_roundtrip() {
        for fuel in FuelType::ALL {
            assert_eq!(fuel.key().parse::<FuelType>().unwrap(), fuel);
        }
    }

    #[test]
    fn display_entry() {
        let entry = PriceEntry::new(FuelType::E10, 1.319);
        assert_eq!(entry.to_string(), "Super E10: 1.319");
    }
}
