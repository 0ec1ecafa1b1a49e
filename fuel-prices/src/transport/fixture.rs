//! Fixture transport for running without network access.
//!
//! Serves `<path>.json` files from a directory, so `list.php` maps to
//! `list.php.json` and `search` maps to `search.json`. Query parameters are
//! ignored; the data is static.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::TransportError;
use super::{Request, Response, ResponseShape, Transport};

/// Transport that answers from files on disk.
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    dir: PathBuf,
}

impl FixtureTransport {
    /// Serve fixtures from `dir`, which must exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, TransportError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(TransportError::NotConfigured(format!(
                "fixture directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn fixture_path(&self, request: &Request) -> PathBuf {
        let name = request.path.trim_start_matches('/').replace('/', "_");
        self.dir.join(format!("{name}.json"))
    }
}

impl Transport for FixtureTransport {
    async fn send(
        &self,
        request: Request,
        shape: ResponseShape,
    ) -> Result<Response, TransportError> {
        let path = self.fixture_path(&request);
        debug!(path = %path.display(), "serving fixture");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| TransportError::Io {
                path: path.display().to_string(),
                source,
            })?;

        Response::decode(bytes, shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn serves_json_fixture() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("list.php.json"),
            r#"{"ok": true, "status": "ok", "stations": []}"#,
        )
        .unwrap();

        let transport = FixtureTransport::new(dir.path()).unwrap();
        let response = transport
            .send(
                Request::new("list.php").param("lat", 52.5),
                ResponseShape::Json,
            )
            .await
            .unwrap();

        assert!(response.status.is_ok());
        assert!(response.json().unwrap()["stations"].is_array());
    }

    #[tokio::test]
    async fn missing_fixture_is_io_error() {
        let dir = tempdir().unwrap();
        let transport = FixtureTransport::new(dir.path()).unwrap();
        let result = transport
            .send(Request::new("search"), ResponseShape::Json)
            .await;
        assert!(matches!(result, Err(TransportError::Io { .. })));
    }

    #[test]
    fn missing_directory_rejected() {
        assert!(FixtureTransport::new("/nonexistent/fixtures").is_err());
    }
}
