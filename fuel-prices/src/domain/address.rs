//! Postal address with optional geocoordinates.

use std::fmt;

use super::geo::Geo;

/// Error returned when mandatory address fields are blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing mandatory address fields: {}", .missing.join(", "))]
pub struct InvalidAddress {
    pub missing: Vec<&'static str>,
}

/// A postal address.
///
/// Street, postal code and city are always present and non-blank.
/// Everything else is optional; `name` and `house_number` default to "".
///
/// # Examples
///
/// ```
/// use fuel_prices::domain::Address;
///
/// let addr = Address::new("Margarete-Sommer-Str.", "10407", "Berlin")
///     .unwrap()
///     .with_house_number("2");
/// assert_eq!(addr.city(), "Berlin");
/// assert!(addr.geo().is_none());
///
/// assert!(Address::new("  ", "10407", "Berlin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    name: String,
    street: String,
    house_number: String,
    post_code: String,
    city: String,
    geo: Option<Geo>,
}

impl Address {
    /// Create an address from its mandatory parts.
    ///
    /// Values are trimmed; any part that is blank afterwards is reported.
    pub fn new(
        street: impl AsRef<str>,
        post_code: impl AsRef<str>,
        city: impl AsRef<str>,
    ) -> Result<Self, InvalidAddress> {
        let street = street.as_ref().trim();
        let post_code = post_code.as_ref().trim();
        let city = city.as_ref().trim();

        let missing: Vec<&'static str> = [
            ("street", street),
            ("postCode", post_code),
            ("city", city),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(InvalidAddress { missing });
        }

        Ok(Self {
            name: String::new(),
            street: street.to_string(),
            house_number: String::new(),
            post_code: post_code.to_string(),
            city: city.to_string(),
            geo: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_house_number(mut self, house_number: impl Into<String>) -> Self {
        self.house_number = house_number.into();
        self
    }

    pub fn with_geo(mut self, geo: Option<Geo>) -> Self {
        self.geo = geo;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn house_number(&self) -> &str {
        &self.house_number
    }

    pub fn post_code(&self) -> &str {
        &self.post_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    /// Geocoordinates, if the source had a location fix.
    pub fn geo(&self) -> Option<&Geo> {
        self.geo.as_ref()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{}, ", self.name)?;
        }
        f.write_str(&self.street)?;
        if !self.house_number.is_empty() {
            write!(f, " {}", self.house_number)?;
        }
        write!(f, ", {} {}", self.post_code, self.city)?;
        if let Some(geo) = &self.geo {
            write!(f, " {geo}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_mandatory_fields() {
        let addr = Address::new(" Hauptstr. ", "10115 ", " Berlin").unwrap();
        assert_eq!(addr.street(), "Hauptstr.");
        assert_eq!(addr.post_code(), "10115");
        assert_eq!(addr.city(), "Berlin");
        assert_eq!(addr.name(), "");
        assert_eq!(addr.house_number(), "");
    }

    #[test]
    fn reports_every_blank_field() {
        let err = Address::new("", " ", "\t").unwrap_err();
        assert_eq!(err.missing, vec!["street", "postCode", "city"]);
        assert_eq!(
            err.to_string(),
            "missing mandatory address fields: street, postCode, city"
        );

        let err = Address::new("Hauptstr.", "", "Berlin").unwrap_err();
        assert_eq!(err.missing, vec!["postCode"]);
    }

    #[test]
    fn display() {
        let geo = Geo::new(52.5, 13.4, None).unwrap();
        let addr = Address::new("Hauptstr.", "10115", "Berlin")
            .unwrap()
            .with_name("Home")
            .with_house_number("5a")
            .with_geo(Some(geo));
        assert_eq!(
            addr.to_string(),
            "Home, Hauptstr. 5a, 10115 Berlin (52.5, 13.4)"
        );
    }
}
