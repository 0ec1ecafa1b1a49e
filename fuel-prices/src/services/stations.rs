//! Station-list service backed by the fuel price API.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::adapter::{BatchPolicy, map_batch, parse_station};
use crate::credentials::{CredentialStore, STATIONS_API_KEY};
use crate::domain::Station;
use crate::transport::{ResponseShape, Transport};

use super::error::ServiceError;
use super::query::StationQuery;
use super::{ServiceReply, StationService};

/// Station-list service speaking the `list.php` protocol.
pub struct StationListService<T> {
    transport: T,
    credentials: Arc<dyn CredentialStore>,
    policy: BatchPolicy,
}

impl<T: Transport> StationListService<T> {
    /// Create a service. Malformed station records are skipped.
    pub fn new(transport: T, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            transport,
            credentials,
            policy: BatchPolicy::SkipInvalid,
        }
    }

    /// Choose how malformed station records are handled.
    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<T: Transport> StationService for StationListService<T> {
    async fn find_stations_with(
        &self,
        query: &StationQuery,
    ) -> Result<ServiceReply<Vec<Station>>, ServiceError> {
        let api_key = self
            .credentials
            .read(STATIONS_API_KEY)
            .ok_or(ServiceError::MissingCredential(STATIONS_API_KEY))?;

        let response = self
            .transport
            .send(query.to_request(&api_key), ResponseShape::Json)
            .await?;

        if response.status.is_error() {
            return Ok(ServiceReply::empty(response.status));
        }

        let body = response
            .json()
            .ok_or_else(|| ServiceError::UnexpectedResponse("expected a JSON body".into()))?;

        let records: &[Value] = match body.get("stations") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(records)) => records,
            Some(_) => {
                return Err(ServiceError::UnexpectedResponse(
                    "\"stations\" is not an array".into(),
                ));
            }
        };

        let layout = query.price_layout();
        let batch = map_batch(records, self.policy, |record| parse_station(record, layout))?;

        debug!(
            center = %query.center,
            stations = batch.items.len(),
            skipped = batch.skipped.len(),
            "mapped station list"
        );

        Ok(ServiceReply::new(batch.items, response.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::BatchAborted;
    use crate::credentials::MemoryCredentials;
    use crate::domain::{Coordinates, FuelType, Geo};
    use crate::transport::{Request, Response, TransportError};
    use serde_json::json;
    use std::sync::Mutex;

    /// Transport answering every request with one canned body.
    struct CannedTransport {
        body: Value,
        requests: Mutex<Vec<Request>>,
    }

    impl CannedTransport {
        fn new(body: Value) -> Self {
            Self {
                body,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        async fn send(
            &self,
            request: Request,
            _shape: ResponseShape,
        ) -> Result<Response, TransportError> {
            self.requests.lock().unwrap().push(request);
            Ok(Response::from_json(self.body.clone()))
        }
    }

    fn credentials() -> Arc<dyn CredentialStore> {
        Arc::new(MemoryCredentials::with(STATIONS_API_KEY, "test-key"))
    }

    fn station(id_suffix: u8, brand: &str) -> Value {
        json!({
            "id": format!("474e5046-deaf-4f9b-9a32-9797b778f0{id_suffix:02}"),
            "name": format!("{brand} STATION"),
            "brand": brand,
            "place": "BERLIN",
            "lat": 52.53, "lng": 13.44, "dist": 1.1,
            "diesel": 1.109, "e5": 1.339, "e10": 1.319
        })
    }

    fn berlin() -> Geo {
        Geo::new(52.521, 13.438, Some(2.0)).unwrap()
    }

    #[tokio::test]
    async fn maps_stations_and_sends_query() {
        let transport = CannedTransport::new(json!({
            "ok": true, "status": "ok", "license": "CC BY 4.0",
            "stations": [station(1, "TOTAL"), station(2, "ARAL")]
        }));
        let service = StationListService::new(transport, credentials());

        let reply = service.find_stations(&berlin()).await.unwrap();
        assert!(reply.status.is_ok());
        assert_eq!(reply.value.len(), 2);
        assert_eq!(reply.value[1].brand(), "ARAL");

        let requests = service.transport.requests.lock().unwrap();
        assert_eq!(requests[0].query_value("rad"), Some("2"));
        assert_eq!(requests[0].query_value("apikey"), Some("test-key"));
        assert_eq!(requests[0].query_value("type"), Some("all"));
    }

    #[tokio::test]
    async fn error_status_yields_empty_reply() {
        let transport = CannedTransport::new(json!({
            "ok": false, "status": "error", "message": "apikey nicht gültig"
        }));
        let service = StationListService::new(transport, credentials());

        let reply = service.find_stations(&berlin()).await.unwrap();
        assert!(reply.status.is_error());
        assert!(reply.value.is_empty());
    }

    #[tokio::test]
    async fn missing_credential() {
        let service = StationListService::new(
            CannedTransport::new(json!({})),
            Arc::new(MemoryCredentials::new()),
        );
        let result = service.find_stations(&berlin()).await;
        assert!(matches!(
            result,
            Err(ServiceError::MissingCredential(STATIONS_API_KEY))
        ));
    }

    #[tokio::test]
    async fn skip_and_abort_policies() {
        let body = json!({
            "ok": true, "status": "ok",
            "stations": [station(1, "TOTAL"), station(2, "")]
        });

        let service = StationListService::new(CannedTransport::new(body.clone()), credentials());
        let reply = service.find_stations(&berlin()).await.unwrap();
        assert_eq!(reply.value.len(), 1);

        let service = StationListService::new(CannedTransport::new(body), credentials())
            .with_policy(BatchPolicy::AbortOnInvalid);
        let result = service.find_stations(&berlin()).await;
        assert!(matches!(
            result,
            Err(ServiceError::Batch(BatchAborted { index: 1, .. }))
        ));
    }

    #[tokio::test]
    async fn single_fuel_query() {
        let transport = CannedTransport::new(json!({
            "ok": true, "status": "ok",
            "stations": [{
                "id": "474e5046-deaf-4f9b-9a32-9797b778f047",
                "name": "TOTAL BERLIN", "brand": "TOTAL", "place": "BERLIN",
                "dist": 1.1, "price": 1.319
            }]
        }));
        let service = StationListService::new(transport, credentials());
        let query = StationQuery::new(Coordinates::new(52.521, 13.438).unwrap())
            .for_fuel(FuelType::E10);

        let reply = service.find_stations_with(&query).await.unwrap();
        assert_eq!(reply.value[0].price(FuelType::E10), Ok(1.319));
        assert!(reply.value[0].price(FuelType::E5).is_err());
    }

    #[tokio::test]
    async fn missing_station_list_is_empty() {
        let service = StationListService::new(
            CannedTransport::new(json!({"ok": true, "status": "ok"})),
            credentials(),
        );
        let reply = service.find_stations(&berlin()).await.unwrap();
        assert!(reply.value.is_empty());
    }

    #[tokio::test]
    async fn non_array_station_list_is_rejected() {
        let service = StationListService::new(
            CannedTransport::new(json!({"ok": true, "status": "ok", "stations": {}})),
            credentials(),
        );
        assert!(matches!(
            service.find_stations(&berlin()).await,
            Err(ServiceError::UnexpectedResponse(_))
        ));
    }
}
