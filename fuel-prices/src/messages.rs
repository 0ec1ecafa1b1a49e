//! Human-readable log messages.
//!
//! Messages are looked up by key and formatted with positional `{0}`,
//! `{1}`, ... placeholders. They are only used for log lines; nothing
//! branches on their text.

use std::collections::HashMap;
use std::fmt::{self, Write};

pub const GEOCODE_START: &str = "geocode.start";
pub const GEOCODE_DONE: &str = "geocode.done";
pub const GEOCODE_NONE: &str = "geocode.none";
pub const STATIONS_START: &str = "stations.start";
pub const STATIONS_DONE: &str = "stations.done";
pub const SERVICE_STATUS_ERROR: &str = "service.status_error";
pub const WORKER_FAILED: &str = "worker.failed";
pub const WORKER_PANICKED: &str = "worker.panicked";

/// Message lookup.
pub trait Localizer: Send + Sync {
    /// Format the message for `key`. Unknown keys render as the key.
    fn get(&self, key: &str, args: &[&dyn fmt::Display]) -> String;
}

/// Built-in English messages.
#[derive(Debug, Clone)]
pub struct Messages {
    catalog: HashMap<&'static str, &'static str>,
}

impl Messages {
    pub fn english() -> Self {
        let catalog = HashMap::from([
            (GEOCODE_START, "Looking up coordinates for {0}"),
            (GEOCODE_DONE, "Found coordinates {1} for {0}"),
            (GEOCODE_NONE, "No coordinates found for {0}"),
            (STATIONS_START, "Searching stations around {0}"),
            (STATIONS_DONE, "Found {1} stations around {0}"),
            (SERVICE_STATUS_ERROR, "{0} reported status {1}: {2}"),
            (WORKER_FAILED, "{0} failed: {1}"),
            (WORKER_PANICKED, "{0} panicked: {1}"),
        ]);
        Self { catalog }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl Localizer for Messages {
    fn get(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        match self.catalog.get(key) {
            Some(template) => format_template(template, args),
            None => key.to_string(),
        }
    }
}

/// Substitute `{n}` placeholders. Out-of-range placeholders are kept as-is.
fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((close, arg))
        });

        match substituted {
            Some((close, arg)) => {
                // Writing to a String cannot fail
                let _ = write!(out, "{arg}");
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
