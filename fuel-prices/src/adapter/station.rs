//! Station records from the fuel price service.
//!
//! A record looks like:
//!
//! ```json
//! {"id": "474e5046-deaf-4f9b-9a32-9797b778f047", "name": "TOTAL BERLIN",
//!  "brand": "TOTAL", "street": "MARGARETE-SOMMER-STR.", "place": "BERLIN",
//!  "lat": 52.53083, "lng": 13.440946, "dist": 1.1, "diesel": 1.109,
//!  "e5": 1.339, "e10": 1.319, "isOpen": true, "houseNumber": "2",
//!  "postCode": 10407}
//! ```
//!
//! Queries for a single fuel return one `"price"` key instead of the
//! per-fuel keys.

use serde_json::Value;

use crate::domain::{Distance, FuelType, GeoLocation, PriceEntry, Station, StationId};

use super::error::MalformedResponse;
use super::fields::{Fields, Required};
use super::geo::{DISTANCE, parse_geo};

/// Which keys carry prices in a station record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceLayout {
    /// One key per fuel type (`diesel`, `e5`, `e10`)
    #[default]
    PerFuel,
    /// A single `price` key for the queried fuel
    Single(FuelType),
}

/// Map one station record to a [`Station`].
pub fn parse_station(value: &Value, layout: PriceLayout) -> Result<Station, MalformedResponse> {
    let fields = Fields::of(value)?;

    let mut required = Required::new(fields);
    let id = required.text("id")?;
    let name = required.text("name")?;
    let brand = required.text("brand")?;
    let place = required.text("place")?;
    required.finish()?;

    let id = StationId::parse(&id)?;

    let location = GeoLocation {
        street: fields.text_or_empty("street")?,
        house_number: fields.text_or_empty("houseNumber")?,
        post_code: fields.text_or_empty("postCode")?,
        geo: parse_geo(&fields)?,
    };

    let distance = match fields.number(DISTANCE)? {
        Some(km) => Distance::from_km(km)?,
        None => Distance::ZERO,
    };

    let prices = parse_prices(&fields, layout)?;
    let is_open = fields.flag("isOpen")?;

    let station = Station::new(id, &name, &brand, &place, location, distance, prices)
        .map_err(|e| MalformedResponse::MissingFields(e.missing))?
        .with_open(is_open);

    Ok(station)
}

/// Collect price entries for the keys actually present.
fn parse_prices(
    fields: &Fields<'_>,
    layout: PriceLayout,
) -> Result<Vec<PriceEntry>, MalformedResponse> {
    match layout {
        PriceLayout::PerFuel => {
            let mut prices = Vec::with_capacity(FuelType::ALL.len());
            for fuel in FuelType::ALL {
                if let Some(price) = fields.price(fuel.key())? {
                    prices.push(PriceEntry::new(fuel, price));
                }
            }
            Ok(prices)
        }
        PriceLayout::Single(fuel) => Ok(fields
            .price("price")?
            .map(|price| vec![PriceEntry::new(fuel, price)])
            .unwrap_or_default()),
    }
}
