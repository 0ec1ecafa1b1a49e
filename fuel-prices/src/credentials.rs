//! Credential store.
//!
//! Services look keys up by name at call time and pass them through to the
//! upstream untouched. Storage and encryption are the store's business.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Credential name for the station price service API key.
pub const STATIONS_API_KEY: &str = "stations.apikey";

/// Read/write access to named secrets.
pub trait CredentialStore: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one credential.
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.write(key, value);
        store
    }
}

impl CredentialStore for MemoryCredentials {
    fn read(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

/// Credential store backed by environment variables.
///
/// Key `stations.apikey` reads `FUEL_STATIONS_APIKEY`. Writes are kept in
/// memory and shadow the environment; the process environment itself is
/// never modified.
#[derive(Debug, Default)]
pub struct EnvCredentials {
    overrides: MemoryCredentials,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment variable consulted for a credential key.
    pub fn var_name(key: &str) -> String {
        let suffix: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("FUEL_{suffix}")
    }
}

impl CredentialStore for EnvCredentials {
    fn read(&self, key: &str) -> Option<String> {
        self.overrides.read(key).or_else(|| {
            std::env::var(Self::var_name(key))
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
    }

    fn write(&self, key: &str, value: &str) {
        self.overrides.write(key, value);
    }
}
