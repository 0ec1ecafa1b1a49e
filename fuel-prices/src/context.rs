//! Application context.
//!
//! Built once at startup and passed down by reference. Holds every service
//! the core needs and hands out workers bound to them.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::credentials::CredentialStore;
use crate::domain::{Address, Distance, Geo, Station};
use crate::messages::Localizer;
use crate::services::{
    CachedStationService, GeocodingService, HttpGeocoder, StationListService, StationQuery,
    StationService,
};
use crate::transport::Transport;
use crate::worker::{Worker, geocode_worker, stations_worker};

/// Context wired to the standard geocoder and cached station-list service.
pub type LiveContext<T> = AppContext<HttpGeocoder<T>, CachedStationService<StationListService<T>>>;

/// Shared services.
pub struct AppContext<G, S> {
    geocoder: Arc<G>,
    stations: Arc<S>,
    messages: Arc<dyn Localizer>,
    search_radius: Distance,
}

impl<G, S> AppContext<G, S>
where
    G: GeocodingService + 'static,
    S: StationService + 'static,
{
    pub fn new(
        geocoder: G,
        stations: S,
        messages: Arc<dyn Localizer>,
        search_radius: Distance,
    ) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            stations: Arc::new(stations),
            messages,
            search_radius,
        }
    }

    /// Worker that geocodes `address`.
    pub fn geocode(&self, address: Address) -> Worker<Option<Geo>> {
        geocode_worker(
            Arc::clone(&self.geocoder),
            address,
            Arc::clone(&self.messages),
        )
    }

    /// Worker that lists stations around `geo`.
    ///
    /// The Geo's distance is the search radius; without one the configured
    /// radius applies.
    pub fn nearby(&self, geo: &Geo) -> Worker<Vec<Station>> {
        self.search(StationQuery::around_or(geo, self.search_radius))
    }

    /// Worker for an explicit query.
    pub fn search(&self, query: StationQuery) -> Worker<Vec<Station>> {
        stations_worker(
            Arc::clone(&self.stations),
            query,
            Arc::clone(&self.messages),
        )
    }
}

/// Wire the standard services over the given transports.
pub fn assemble<T: Transport + 'static>(
    config: &AppConfig,
    stations_transport: T,
    geocoder_transport: T,
    credentials: Arc<dyn CredentialStore>,
    messages: Arc<dyn Localizer>,
) -> LiveContext<T> {
    let stations = CachedStationService::new(
        StationListService::new(stations_transport, credentials),
        &config.cache(),
    );
    let geocoder = HttpGeocoder::new(geocoder_transport);

    AppContext::new(geocoder, stations, messages, config.search_radius)
}
