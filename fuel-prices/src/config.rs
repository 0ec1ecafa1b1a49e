//! Runtime configuration.
//!
//! Read once at startup from `FUEL_*` environment variables; anything unset
//! falls back to a default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::Distance;
use crate::services::{CacheConfig, DEFAULT_RADIUS_KM, MAX_RADIUS_KM};

/// Default base URL of the station price service.
pub const DEFAULT_STATIONS_URL: &str = "https://creativecommons.tankerkoenig.de/json";

/// Default base URL of the geocoding service.
pub const DEFAULT_GEOCODER_URL: &str = "http://127.0.0.1:8088";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Station price service base URL
    pub stations_url: String,
    /// Geocoding service base URL
    pub geocoder_url: String,
    /// Search radius when the query does not carry one
    pub search_radius: Distance,
    /// Per-request timeout in seconds
    pub http_timeout_secs: u64,
    /// Maximum concurrent requests per service
    pub max_concurrent: usize,
    /// How long station lists are cached, in seconds
    pub cache_ttl_secs: u64,
    /// Serve responses from this directory instead of the network
    pub fixture_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stations_url: DEFAULT_STATIONS_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            search_radius: Distance::from_km(DEFAULT_RADIUS_KM).unwrap_or_default(),
            http_timeout_secs: 30,
            max_concurrent: 4,
            cache_ttl_secs: 5 * 60,
            fixture_dir: None,
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("FUEL_STATIONS_URL") {
            config.stations_url = url;
        }
        if let Some(url) = get("FUEL_GEOCODER_URL") {
            config.geocoder_url = url;
        }
        if let Some(raw) = get("FUEL_SEARCH_RADIUS_KM") {
            let km: f64 = parse("FUEL_SEARCH_RADIUS_KM", &raw)?;
            if !(km > 0.0 && km <= MAX_RADIUS_KM) {
                return Err(ConfigError {
                    var: "FUEL_SEARCH_RADIUS_KM",
                    value: raw,
                    reason: format!("must be in (0, {MAX_RADIUS_KM}]"),
                });
            }
            config.search_radius = Distance::from_km(km).map_err(|e| ConfigError {
                var: "FUEL_SEARCH_RADIUS_KM",
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(raw) = get("FUEL_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = parse_positive("FUEL_HTTP_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = get("FUEL_MAX_CONCURRENT") {
            config.max_concurrent = parse_positive("FUEL_MAX_CONCURRENT", &raw)?;
        }
        if let Some(raw) = get("FUEL_CACHE_TTL_SECS") {
            config.cache_ttl_secs = parse("FUEL_CACHE_TTL_SECS", &raw)?;
        }
        if let Some(dir) = get("FUEL_FIXTURE_DIR") {
            config.fixture_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Cache settings derived from this configuration.
    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.cache_ttl_secs),
            ..CacheConfig::default()
        }
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Like [`parse`], rejecting zero.
fn parse_positive<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
    T::Err: std::fmt::Display,
{
    let value: T = parse(var, raw)?;
    if value == T::default() {
        return Err(ConfigError {
            var,
            value: raw.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.stations_url, DEFAULT_STATIONS_URL);
        assert_eq!(config.search_radius.km(), DEFAULT_RADIUS_KM);
        assert_eq!(config.cache().ttl, Duration::from_secs(300));
        assert_eq!(config.fixture_dir, None);
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("FUEL_STATIONS_URL", "http://localhost:9000"),
            ("FUEL_SEARCH_RADIUS_KM", "12.5"),
            ("FUEL_HTTP_TIMEOUT_SECS", "5"),
            ("FUEL_MAX_CONCURRENT", "2"),
            ("FUEL_CACHE_TTL_SECS", "0"),
            ("FUEL_FIXTURE_DIR", "data/fixtures"),
        ]))
        .unwrap();

        assert_eq!(config.stations_url, "http://localhost:9000");
        assert_eq!(config.search_radius.km(), 12.5);
        assert_eq!(config.http_timeout_secs, 5);
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.cache_ttl_secs, 0);
        assert_eq!(config.fixture_dir, Some(PathBuf::from("data/fixtures")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[("FUEL_GEOCODER_URL", "  ")])).unwrap();
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn invalid_numbers() {
        let err = AppConfig::from_lookup(lookup(&[("FUEL_MAX_CONCURRENT", "many")])).unwrap_err();
        assert_eq!(err.var, "FUEL_MAX_CONCURRENT");
        assert_eq!(err.value, "many");
    }

    #[test]
    fn radius_out_of_range() {
        for raw in ["0", "-1", "30", "NaN"] {
            let err =
                AppConfig::from_lookup(lookup(&[("FUEL_SEARCH_RADIUS_KM", raw)])).unwrap_err();
            assert_eq!(err.var, "FUEL_SEARCH_RADIUS_KM");
        }
    }

    #[test]
    fn zero_timeout_and_concurrency_rejected() {
        for var in ["FUEL_HTTP_TIMEOUT_SECS", "FUEL_MAX_CONCURRENT"] {
            let err = AppConfig::from_lookup(lookup(&[(var, "0")])).unwrap_err();
            assert_eq!(err.var, var);
            assert_eq!(err.value, "0");
            assert_eq!(err.reason, "must be at least 1");
        }
    }
}
