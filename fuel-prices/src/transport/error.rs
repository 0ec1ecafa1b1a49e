//! Transport error types.

/// Errors from a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body could not be parsed as JSON
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Server answered with a non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rejected credentials
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the service
    #[error("rate limited by service")]
    RateLimited,

    /// Local I/O failed (fixture transport)
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Transport misconfigured
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
