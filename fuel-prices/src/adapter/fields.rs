//! Field-presence view over a raw JSON record.
//!
//! A plain `Deserialize` struct would turn a missing `lat` into `0.0` and
//! lose the difference between "absent" and "zero". Reading through this
//! view keeps presence explicit until the domain value is built.

use serde_json::{Map, Value};

use super::error::MalformedResponse;

/// Borrowed view of a JSON object's fields.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// View a JSON value as an object.
    pub fn of(value: &'a Value) -> Result<Self, MalformedResponse> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            other => Err(MalformedResponse::NotAnObject(kind(other))),
        }
    }

    /// Whether the key is present with a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Raw value for a key, treating `null` as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Nested object for a key, if present.
    pub fn object(&self, key: &'static str) -> Result<Option<Fields<'a>>, MalformedResponse> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Fields { map })),
            Some(other) => Err(invalid(key, format!("expected an object, found {}", kind(other)))),
        }
    }

    /// Text value, trimmed. Numbers are rendered as text.
    pub fn text(&self, key: &'static str) -> Result<Option<String>, MalformedResponse> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(invalid(key, format!("expected text, found {}", kind(other)))),
        }
    }

    /// Text value, or "" when absent.
    pub fn text_or_empty(&self, key: &'static str) -> Result<String, MalformedResponse> {
        Ok(self.text(key)?.unwrap_or_default())
    }

    /// Numeric value. Numeric strings are accepted.
    pub fn number(&self, key: &'static str) -> Result<Option<f64>, MalformedResponse> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| invalid(key, format!("{n} is not representable as f64"))),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| invalid(key, format!("{s:?} is not a number"))),
            Some(other) => Err(invalid(key, format!("expected a number, found {}", kind(other)))),
        }
    }

    /// Price value. `false` is the upstream's "not sold here" marker.
    pub fn price(&self, key: &'static str) -> Result<Option<f64>, MalformedResponse> {
        match self.get(key) {
            Some(Value::Bool(false)) => Ok(None),
            _ => self.number(key),
        }
    }

    /// Boolean value.
    pub fn flag(&self, key: &'static str) -> Result<Option<bool>, MalformedResponse> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(invalid(key, format!("expected a boolean, found {}", kind(other)))),
        }
    }
}

/// Collects mandatory text fields, reporting every missing one at once.
#[derive(Debug)]
pub struct Required<'a> {
    fields: Fields<'a>,
    missing: Vec<&'static str>,
}

impl<'a> Required<'a> {
    pub fn new(fields: Fields<'a>) -> Self {
        Self {
            fields,
            missing: Vec::new(),
        }
    }

    /// Take a mandatory text field. Blank counts as missing.
    ///
    /// Returns "" for a missing field; call [`Required::finish`] before
    /// using any of the values.
    pub fn text(&mut self, key: &'static str) -> Result<String, MalformedResponse> {
        match self.fields.text(key)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => {
                self.missing.push(key);
                Ok(String::new())
            }
        }
    }

    /// Fail if any mandatory field was missing.
    pub fn finish(self) -> Result<(), MalformedResponse> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(MalformedResponse::MissingFields(self.missing))
        }
    }
}

fn invalid(field: &'static str, reason: String) -> MalformedResponse {
    MalformedResponse::InvalidField { field, reason }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            Fields::of(&json!([1, 2])).unwrap_err(),
            MalformedResponse::NotAnObject("array")
        );
    }

    #[test]
    fn null_counts_as_absent() {
        let value = json!({"dist": null, "lat": 0.0});
        let fields = Fields::of(&value).unwrap();
        assert!(!fields.contains("dist"));
        assert!(fields.contains("lat"));
        assert_eq!(fields.number("dist").unwrap(), None);
    }

    #[test]
    fn text_accepts_numbers() {
        let value = json!({"postCode": 10407, "street": "  Hauptstr. "});
        let fields = Fields::of(&value).unwrap();
        assert_eq!(fields.text("postCode").unwrap(), Some("10407".to_string()));
        assert_eq!(fields.text("street").unwrap(), Some("Hauptstr.".to_string()));
        assert_eq!(fields.text_or_empty("houseNumber").unwrap(), "");
    }

    #[test]
    fn number_accepts_numeric_strings() {
        let value = json!({"lat": "52.5", "lng": 13.4, "bad": "north", "obj": {}});
        let fields = Fields::of(&value).unwrap();
        assert_eq!(fields.number("lat").unwrap(), Some(52.5));
        assert_eq!(fields.number("lng").unwrap(), Some(13.4));
        assert!(fields.number("bad").is_err());
        assert!(fields.number("obj").is_err());
    }

    #[test]
    fn price_false_means_absent() {
        let value = json!({"e5": false, "e10": 1.319, "diesel": true});
        let fields = Fields::of(&value).unwrap();
        assert_eq!(fields.price("e5").unwrap(), None);
        assert_eq!(fields.price("e10").unwrap(), Some(1.319));
        assert!(fields.price("diesel").is_err());
    }

    #[test]
    fn required_reports_all_missing() {
        let value = json!({"street": "", "city": "   "});
        let mut required = Required::new(Fields::of(&value).unwrap());
        required.text("street").unwrap();
        required.text("postCode").unwrap();
        required.text("city").unwrap();
        assert_eq!(
            required.finish().unwrap_err(),
            MalformedResponse::MissingFields(vec!["street", "postCode", "city"])
        );
    }
}
