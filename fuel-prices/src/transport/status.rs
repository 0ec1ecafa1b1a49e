//! Transactional status side channel.
//!
//! Upstream services report their own success or failure inside the JSON
//! envelope, separately from HTTP status codes:
//!
//! ```json
//! {"ok": false, "status": "error", "message": "apikey nicht angegeben"}
//! ```

use serde::Deserialize;
use serde_json::Value;

/// Status codes meaning "nothing matched". An empty result, not a failure.
const NO_MATCH_CODES: [&str; 2] = ["ZERO_RESULTS", "NO_RESULTS"];

/// Envelope keys we care about. Everything else is ignored.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    ok: Option<bool>,
    status: Option<String>,
    message: Option<String>,
    #[serde(alias = "licence")]
    license: Option<String>,
}

/// Status reported by a service alongside its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatus {
    /// Status code as sent (`"ok"`, `"error"`, ...)
    pub code: String,
    /// Error or informational message
    pub message: Option<String>,
    /// Data licence attribution
    pub licence: Option<String>,
    ok: bool,
}

impl TransactionStatus {
    /// A successful status with no message.
    pub fn ok() -> Self {
        Self {
            code: "ok".to_string(),
            message: None,
            licence: None,
            ok: true,
        }
    }

    /// An error status with a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: "error".to_string(),
            message: Some(message.into()),
            licence: None,
            ok: false,
        }
    }

    /// Read the status from a response envelope.
    ///
    /// Bodies that are not objects, or have no status keys at all, count as
    /// successful: the service did not say otherwise. "No match" codes are
    /// successful too.
    pub fn from_envelope(body: &Value) -> Self {
        let envelope = Envelope::deserialize(body).unwrap_or_default();

        let code_ok = envelope
            .status
            .as_deref()
            .is_none_or(|s| s.eq_ignore_ascii_case("ok") || is_no_match(s));
        let ok = envelope.ok.unwrap_or(true) && code_ok;

        let code = envelope
            .status
            .unwrap_or_else(|| if ok { "ok" } else { "error" }.to_string());

        Self {
            code,
            message: envelope.message,
            licence: envelope.license,
            ok,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn is_error(&self) -> bool {
        !self.ok
    }
}

fn is_no_match(code: &str) -> bool {
    NO_MATCH_CODES
        .iter()
        .any(|no_match| no_match.eq_ignore_ascii_case(code))
}

impl Default for TransactionStatus {
    fn default() -> Self {
        Self::ok()
    }
}
