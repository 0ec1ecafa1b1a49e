//! Response adapter error types.

use crate::domain::{DomainError, InvalidCoordinates, InvalidDistance, InvalidStationId};

/// A record could not be turned into a domain value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedResponse {
    /// The record is not a JSON object
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// Mandatory fields are absent or blank
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field holds a value of the wrong shape
    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The values are well-formed but violate a domain invariant
    #[error("invalid value: {0}")]
    Domain(#[from] DomainError),
}

impl From<InvalidCoordinates> for MalformedResponse {
    fn from(err: InvalidCoordinates) -> Self {
        MalformedResponse::Domain(err.into())
    }
}

impl From<InvalidDistance> for MalformedResponse {
    fn from(err: InvalidDistance) -> Self {
        MalformedResponse::Domain(err.into())
    }
}

impl From<InvalidStationId> for MalformedResponse {
    fn from(err: InvalidStationId) -> Self {
        MalformedResponse::Domain(err.into())
    }
}

/// A batch was aborted because one of its records was malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("record {index} of {total} is malformed: {source}")]
pub struct BatchAborted {
    pub index: usize,
    pub total: usize,
    pub source: MalformedResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MalformedResponse::MissingFields(vec!["street", "city"]);
        assert_eq!(err.to_string(), "missing required fields: street, city");

        let err = MalformedResponse::InvalidField {
            field: "lat",
            reason: "expected a number".into(),
        };
        assert_eq!(err.to_string(), "invalid field lat: expected a number");

        let err = BatchAborted {
            index: 2,
            total: 5,
            source: MalformedResponse::NotAnObject("array"),
        };
        assert_eq!(
            err.to_string(),
            "record 2 of 5 is malformed: expected a JSON object, found array"
        );
    }
}
