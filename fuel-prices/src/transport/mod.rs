//! Transport to the upstream web services.
//!
//! A transport takes a [`Request`] plus a hint about the expected body
//! ([`ResponseShape`]) and returns a [`Response`] carrying the service's
//! [`TransactionStatus`] next to the body. JSON bodies are parsed once
//! here; adapters work on the parsed tree.

mod error;
mod fixture;
mod http;
mod status;

use std::future::Future;

use serde_json::Value;

pub use error::TransportError;
pub use fixture::FixtureTransport;
pub use http::{HttpConfig, HttpTransport};
pub use status::TransactionStatus;

/// What to ask a service for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Path relative to the service base URL, e.g. `list.php`
    pub path: String,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Append a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Look up a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Expected body format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Bytes,
    Json,
}

/// Response body in the requested shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Bytes(Vec<u8>),
    Json(Value),
}

/// A service response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: TransactionStatus,
    pub body: ResponseBody,
}

impl Response {
    /// Wrap a parsed JSON body, reading its status envelope.
    pub fn from_json(body: Value) -> Self {
        Self {
            status: TransactionStatus::from_envelope(&body),
            body: ResponseBody::Json(body),
        }
    }

    /// Wrap raw bytes. Raw bodies carry no status envelope.
    pub fn from_bytes(body: Vec<u8>) -> Self {
        Self {
            status: TransactionStatus::ok(),
            body: ResponseBody::Bytes(body),
        }
    }

    /// Build a response of the requested shape from raw bytes.
    pub fn decode(bytes: Vec<u8>, shape: ResponseShape) -> Result<Self, TransportError> {
        match shape {
            ResponseShape::Bytes => Ok(Self::from_bytes(bytes)),
            ResponseShape::Json => {
                let body = serde_json::from_slice(&bytes).map_err(|e| TransportError::Json {
                    message: e.to_string(),
                    body: Some(String::from_utf8_lossy(&bytes).chars().take(500).collect()),
                })?;
                Ok(Self::from_json(body))
            }
        }
    }

    /// The JSON body, if that is what was requested.
    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Bytes(_) => None,
        }
    }
}

/// Something that can carry a request to a service.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Request,
        shape: ResponseShape,
    ) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_params() {
        let request = Request::new("list.php")
            .param("lat", 52.5)
            .param("rad", 5)
            .param("type", "all");
        assert_eq!(request.query_value("lat"), Some("52.5"));
        assert_eq!(request.query_value("rad"), Some("5"));
        assert_eq!(request.query_value("missing"), None);
    }

    #[test]
    fn decode_json_reads_status() {
        let bytes = br#"{"ok": false, "status": "error", "message": "bad key"}"#.to_vec();
        let response = Response::decode(bytes, ResponseShape::Json).unwrap();
        assert!(response.status.is_error());
        assert_eq!(response.json().unwrap()["message"], json!("bad key"));
    }

    #[test]
    fn decode_bytes_keeps_body() {
        let response = Response::decode(b"hello".to_vec(), ResponseShape::Bytes).unwrap();
        assert!(response.status.is_ok());
        assert_eq!(response.body, ResponseBody::Bytes(b"hello".to_vec()));
        assert!(response.json().is_none());
    }

    #[test]
    fn decode_invalid_json() {
        let err = Response::decode(b"<html>".to_vec(), ResponseShape::Json).unwrap_err();
        assert!(matches!(err, TransportError::Json { body: Some(_), .. }));
    }
}
