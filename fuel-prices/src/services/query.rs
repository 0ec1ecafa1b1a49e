//! Station search queries.

use crate::adapter::PriceLayout;
use crate::domain::{Coordinates, Distance, FuelType, Geo};
use crate::transport::Request;

/// Largest search radius the station service accepts.
pub const MAX_RADIUS_KM: f64 = 25.0;

/// Radius used when a query does not name one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Result ordering requested from the station service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Distance,
    Price,
}

impl SortOrder {
    fn key(&self) -> &'static str {
        match self {
            SortOrder::Distance => "dist",
            SortOrder::Price => "price",
        }
    }
}

/// A search for stations around a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationQuery {
    pub center: Coordinates,
    pub radius: Distance,
    pub fuel: Option<FuelType>,
    pub sort: SortOrder,
}

impl StationQuery {
    /// Search all fuels around `center` with the default radius.
    pub fn new(center: Coordinates) -> Self {
        Self {
            center,
            radius: Distance::from_km(DEFAULT_RADIUS_KM).unwrap_or_default(),
            fuel: None,
            sort: SortOrder::Distance,
        }
    }

    /// Search around a Geo, using its distance as the radius when set.
    pub fn around(geo: &Geo) -> Self {
        Self::new(geo.coordinates()).with_radius_from(geo)
    }

    /// Like [`StationQuery::around`], falling back to `fallback` instead of
    /// the built-in default radius.
    pub fn around_or(geo: &Geo, fallback: Distance) -> Self {
        Self::new(geo.coordinates())
            .with_radius(fallback)
            .with_radius_from(geo)
    }

    fn with_radius_from(self, geo: &Geo) -> Self {
        match geo.distance() {
            Some(radius) if radius.km() > 0.0 => self.with_radius(radius),
            _ => self,
        }
    }

    /// Set the radius, capped at [`MAX_RADIUS_KM`].
    pub fn with_radius(mut self, radius: Distance) -> Self {
        self.radius = if radius.km() > MAX_RADIUS_KM {
            Distance::from_km(MAX_RADIUS_KM).unwrap_or(radius)
        } else {
            radius
        };
        self
    }

    /// Restrict the search to one fuel.
    pub fn for_fuel(mut self, fuel: FuelType) -> Self {
        self.fuel = Some(fuel);
        self
    }

    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Ordering actually sent. Only single-fuel searches can sort by price.
    pub fn effective_sort(&self) -> SortOrder {
        match self.fuel {
            Some(_) => self.sort,
            None => SortOrder::Distance,
        }
    }

    /// How prices are laid out in the response to this query.
    pub fn price_layout(&self) -> PriceLayout {
        match self.fuel {
            Some(fuel) => PriceLayout::Single(fuel),
            None => PriceLayout::PerFuel,
        }
    }

    /// Build the `list.php` request.
    pub fn to_request(&self, api_key: &str) -> Request {
        Request::new("list.php")
            .param("lat", self.center.latitude())
            .param("lng", self.center.longitude())
            .param("rad", self.radius.km())
            .param("sort", self.effective_sort().key())
            .param("type", self.fuel.map(|f| f.key()).unwrap_or("all"))
            .param("apikey", api_key)
    }
}
