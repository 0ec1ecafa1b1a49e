//! Price list lookup.
//!
//! A station's price list is treated as a partial function from fuel type
//! to price. Zero or several entries for the same fuel are data-integrity
//! errors; the lookup never picks the first or last match.

use super::fuel::{FuelType, PriceEntry};

/// Error returned when a price list cannot answer for a fuel type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceLookupError {
    /// No entry for the fuel type
    #[error("no price data for {0}")]
    NoPrice(FuelType),

    /// More than one entry for the fuel type
    #[error("duplicate price entries for {fuel} ({count} found)")]
    DuplicatePrice { fuel: FuelType, count: usize },
}

/// Ordered collection of price entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceList(Vec<PriceEntry>);

impl PriceList {
    pub fn new(entries: Vec<PriceEntry>) -> Self {
        Self(entries)
    }

    /// Look up the price for a fuel type.
    ///
    /// Succeeds only when exactly one entry matches.
    pub fn price(&self, fuel: FuelType) -> Result<f64, PriceLookupError> {
        let mut matches = self.0.iter().filter(|entry| entry.fuel == fuel);

        let first = matches.next().ok_or(PriceLookupError::NoPrice(fuel))?;

        let extra = matches.count();
        if extra > 0 {
            return Err(PriceLookupError::DuplicatePrice {
                fuel,
                count: extra + 1,
            });
        }

        Ok(first.price)
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PriceEntry>> for PriceList {
    fn from(entries: Vec<PriceEntry>) -> Self {
        Self(entries)
    }
}
