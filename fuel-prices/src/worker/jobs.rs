//! Workers for the geocoding and station-list calls.

use std::sync::Arc;

use tracing::info;

use crate::domain::{Address, Geo, Station};
use crate::messages::{self as msg, Localizer};
use crate::services::{GeocodingService, StationQuery, StationService};

use super::Worker;

/// Worker that geocodes one address.
///
/// Delivers `None` when the service has no match or the call fails.
pub fn geocode_worker<G>(
    service: Arc<G>,
    address: Address,
    messages: Arc<dyn Localizer>,
) -> Worker<Option<Geo>>
where
    G: GeocodingService + 'static,
{
    let label = format!("geocode {address}");
    let log = Arc::clone(&messages);

    Worker::new(
        label,
        async move {
            info!("{}", log.get(msg::GEOCODE_START, &[&address]));
            let reply = service.find_geo(&address).await?;
            match &reply.value {
                Some(geo) => info!("{}", log.get(msg::GEOCODE_DONE, &[&address, geo])),
                None => info!("{}", log.get(msg::GEOCODE_NONE, &[&address])),
            }
            Ok(reply)
        },
        messages,
    )
}

/// Worker that lists stations for one query.
///
/// Delivers an empty list when nothing matches or the call fails.
pub fn stations_worker<S>(
    service: Arc<S>,
    query: StationQuery,
    messages: Arc<dyn Localizer>,
) -> Worker<Vec<Station>>
where
    S: StationService + 'static,
{
    let label = format!("stations around {}", query.center);
    let log = Arc::clone(&messages);

    Worker::new(
        label,
        async move {
            info!("{}", log.get(msg::STATIONS_START, &[&query.center]));
            let reply = service.find_stations_with(&query).await?;
            info!(
                "{}",
                log.get(msg::STATIONS_DONE, &[&query.center, &reply.value.len()])
            );
            Ok(reply)
        },
        messages,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Messages;
    use crate::services::{ServiceError, ServiceReply};
    use crate::transport::{TransactionStatus, TransportError};
    use crate::worker::WorkerState;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Geocoder returning a fixed outcome.
    struct StubGeocoder {
        geo: Option<Geo>,
        fail: bool,
    }

    impl GeocodingService for StubGeocoder {
        async fn find_geo(
            &self,
            _address: &Address,
        ) -> Result<ServiceReply<Option<Geo>>, ServiceError> {
            if self.fail {
                return Err(TransportError::RateLimited.into());
            }
            Ok(ServiceReply::new(self.geo, TransactionStatus::ok()))
        }
    }

    fn address() -> Address {
        Address::new("Hauptstr.", "10115", "Berlin").unwrap()
    }

    fn messages() -> Arc<dyn Localizer> {
        Arc::new(Messages::english())
    }

    #[tokio::test]
    async fn zero_matches_delivers_none_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let delivered = Arc::new(Mutex::new(None));

        let counter = Arc::clone(&calls);
        let slot = Arc::clone(&delivered);
        let worker = geocode_worker(
            Arc::new(StubGeocoder {
                geo: None,
                fail: false,
            }),
            address(),
            messages(),
        )
        .with_callback(move |geo| {
            counter.fetch_add(1, Ordering::SeqCst);
            *slot.lock().unwrap() = Some(geo);
        });

        let state = worker.run().unwrap().join().await;
        assert_eq!(state, WorkerState::Delivered);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*delivered.lock().unwrap(), Some(None));
    }

    #[tokio::test]
    async fn found_geo_is_delivered() {
        let geo = Geo::new(52.52, 13.38, None).unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel();

        let worker = geocode_worker(
            Arc::new(StubGeocoder {
                geo: Some(geo),
                fail: false,
            }),
            address(),
            messages(),
        )
        .with_callback(move |found| {
            let _ = tx.send(found);
        });

        worker.run().unwrap();
        assert_eq!(rx.await.unwrap(), Some(geo));
    }

    #[tokio::test]
    async fn transport_failure_still_delivers() {
        let (tx, rx) = tokio::sync::oneshot::channel();

        let worker = geocode_worker(
            Arc::new(StubGeocoder {
                geo: None,
                fail: true,
            }),
            address(),
            messages(),
        )
        .with_callback(move |found| {
            let _ = tx.send(found);
        });
        assert!(worker.label().starts_with("geocode Hauptstr."));

        let handle = worker.run().unwrap();
        assert_eq!(rx.await.unwrap(), None);
        assert_eq!(handle.join().await, WorkerState::DeliveredWithError);
    }
}
