//! Geocoding and station-list services.
//!
//! Each call returns a [`ServiceReply`]: the domain value together with the
//! transactional status the service reported. Callers inspect the status
//! after the call; an error status is not a Rust error.

mod cache;
mod error;
mod geocoding;
mod query;
mod stations;

use std::future::Future;

use crate::domain::{Address, Geo, Station};
use crate::transport::TransactionStatus;

pub use cache::{CacheConfig, CachedStationService};
pub use error::ServiceError;
pub use geocoding::HttpGeocoder;
pub use query::{DEFAULT_RADIUS_KM, MAX_RADIUS_KM, SortOrder, StationQuery};
pub use stations::StationListService;

/// A service result plus the status reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply<T> {
    pub value: T,
    pub status: TransactionStatus,
}

impl<T> ServiceReply<T> {
    pub fn new(value: T, status: TransactionStatus) -> Self {
        Self { value, status }
    }
}

impl<T: Default> ServiceReply<T> {
    /// An empty value paired with the given status.
    pub fn empty(status: TransactionStatus) -> Self {
        Self::new(T::default(), status)
    }
}

/// Resolves addresses to coordinates.
pub trait GeocodingService: Send + Sync {
    /// Geocode an address. `None` means the service had no match.
    fn find_geo(
        &self,
        address: &Address,
    ) -> impl Future<Output = Result<ServiceReply<Option<Geo>>, ServiceError>> + Send;
}

/// Lists fuel stations near a point.
pub trait StationService: Send + Sync {
    /// Stations matching a query.
    fn find_stations_with(
        &self,
        query: &StationQuery,
    ) -> impl Future<Output = Result<ServiceReply<Vec<Station>>, ServiceError>> + Send;

    /// Stations around a Geo. The Geo's distance, when present, is the
    /// search radius.
    fn find_stations(
        &self,
        geo: &Geo,
    ) -> impl Future<Output = Result<ServiceReply<Vec<Station>>, ServiceError>> + Send {
        let query = StationQuery::around(geo);
        async move { self.find_stations_with(&query).await }
    }
}
