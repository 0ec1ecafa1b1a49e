//! Partial-geo rule.
//!
//! Upstream services may omit coordinates, distance, or both. A record has a
//! Geo when it carries a distance, or when either coordinate differs from
//! the `0.0` a naive deserializer would have substituted.

use crate::domain::Geo;

use super::error::MalformedResponse;
use super::fields::Fields;

pub(crate) const LATITUDE: &str = "lat";
pub(crate) const LONGITUDE: &str = "lng";
pub(crate) const LONGITUDE_ALT: &str = "lon";
pub(crate) const DISTANCE: &str = "dist";

/// Read the optional Geo of a record.
///
/// Missing numeric parts of a present Geo default to `0.0`, then the
/// usual coordinate and distance validation applies.
pub fn parse_geo(fields: &Fields<'_>) -> Result<Option<Geo>, MalformedResponse> {
    let latitude = fields.number(LATITUDE)?;
    let longitude = match fields.number(LONGITUDE)? {
        Some(lng) => Some(lng),
        None => fields.number(LONGITUDE_ALT)?,
    };
    let distance = fields.number(DISTANCE)?;

    let latitude = latitude.unwrap_or_default();
    let longitude = longitude.unwrap_or_default();

    if distance.is_none() && latitude == 0.0 && longitude == 0.0 {
        return Ok(None);
    }

    Ok(Some(Geo::new(latitude, longitude, distance)?))
}
