//! Geocoding service.
//!
//! Sends a structured address search and reads a result envelope:
//!
//! ```json
//! {"status": "ok", "licence": "...", "results": [
//!     {"street": "...", "postCode": "...", "city": "...",
//!      "geo": {"lat": 52.5, "lng": 13.4}}
//! ]}
//! ```

use serde_json::Value;
use tracing::debug;

use crate::adapter::{BatchPolicy, map_batch, parse_address};
use crate::domain::{Address, Geo};
use crate::transport::{Request, ResponseShape, Transport};

use super::error::ServiceError;
use super::{GeocodingService, ServiceReply};

/// Geocoder speaking the structured `search` protocol.
pub struct HttpGeocoder<T> {
    transport: T,
}

impl<T: Transport> HttpGeocoder<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    fn request(address: &Address) -> Request {
        let street = if address.house_number().is_empty() {
            address.street().to_string()
        } else {
            format!("{} {}", address.street(), address.house_number())
        };

        Request::new("search")
            .param("street", street)
            .param("postalcode", address.post_code())
            .param("city", address.city())
    }
}

impl<T: Transport> GeocodingService for HttpGeocoder<T> {
    async fn find_geo(
        &self,
        address: &Address,
    ) -> Result<ServiceReply<Option<Geo>>, ServiceError> {
        let response = self
            .transport
            .send(Self::request(address), ResponseShape::Json)
            .await?;

        if response.status.is_error() {
            return Ok(ServiceReply::empty(response.status));
        }

        let body = response
            .json()
            .ok_or_else(|| ServiceError::UnexpectedResponse("expected a JSON body".into()))?;

        let results: &[Value] = match body.get("results") {
            None | Some(Value::Null) => &[],
            Some(Value::Array(results)) => results,
            Some(_) => {
                return Err(ServiceError::UnexpectedResponse(
                    "\"results\" is not an array".into(),
                ));
            }
        };

        let batch = map_batch(results, BatchPolicy::SkipInvalid, parse_address)?;
        let geo = batch.items.iter().find_map(|hit| hit.geo().copied());

        debug!(
            results = batch.items.len(),
            found = geo.is_some(),
            "mapped geocoding results"
        );

        Ok(ServiceReply::new(geo, response.status))
    }
}
