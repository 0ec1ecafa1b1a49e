//! Service error types.

use crate::adapter::{BatchAborted, MalformedResponse};
use crate::transport::TransportError;

/// Errors from a geocoding or station-list call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The transport failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A record in the response could not be mapped
    #[error("malformed response: {0}")]
    Malformed(#[from] MalformedResponse),

    /// The response batch was rejected
    #[error(transparent)]
    Batch(#[from] BatchAborted),

    /// The response body was not in the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A required credential is not available
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ServiceError::MissingCredential("stations.apikey");
        assert_eq!(err.to_string(), "missing credential: stations.apikey");

        let err: ServiceError = TransportError::RateLimited.into();
        assert_eq!(err.to_string(), "rate limited by service");

        let err: ServiceError = MalformedResponse::MissingFields(vec!["city"]).into();
        assert_eq!(
            err.to_string(),
            "malformed response: missing required fields: city"
        );
    }
}
