//! Address records.
//!
//! Shape: `{"name"?, "street", "houseNumber"?, "postCode", "city", ...geo}`
//! where the geo fields sit either inline or in a nested `"geo"` object.

use serde_json::Value;

use crate::domain::Address;

use super::error::MalformedResponse;
use super::fields::{Fields, Required};
use super::geo::parse_geo;

/// Map one address record to an [`Address`].
pub fn parse_address(value: &Value) -> Result<Address, MalformedResponse> {
    let fields = Fields::of(value)?;

    let mut required = Required::new(fields);
    let street = required.text("street")?;
    let post_code = required.text("postCode")?;
    let city = required.text("city")?;
    required.finish()?;

    let name = fields.text_or_empty("name")?;
    let house_number = fields.text_or_empty("houseNumber")?;

    let geo = match fields.object("geo")? {
        Some(nested) => parse_geo(&nested)?,
        None => parse_geo(&fields)?,
    };

    let address = Address::new(street, post_code, city)
        .map_err(|e| MalformedResponse::MissingFields(e.missing))?
        .with_name(name)
        .with_house_number(house_number)
        .with_geo(geo);

    Ok(address)
}
