//! Catalog store: the single startup fetch.
//!
//! A [`CatalogStore`] owns its source and is consumed by `load`, so a session
//! can only ever fetch once. Failures degrade to [`Catalog::empty`] through
//! [`CatalogStore::load_or_empty`]; there is no retry.

use tracing::{error, info};

use glovehub_core::{CatalogError, CatalogResult};

use crate::product::Catalog;

/// Where the catalog payload comes from.
///
/// The browser implements this with a `fetch` of the data file; tests and
/// native tools use [`StaticSource`] or [`FileSource`].
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Human-readable location, used in log lines.
    fn location(&self) -> &str;

    /// Read the raw payload.
    async fn fetch(&self) -> CatalogResult<String>;
}

/// Payload embedded in the binary (or built in a test).
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: String,
}

impl StaticSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl CatalogSource for StaticSource {
    fn location(&self) -> &str {
        "<embedded>"
    }

    async fn fetch(&self) -> CatalogResult<String> {
        Ok(self.payload.clone())
    }
}

/// Payload read from a local file.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSource {
    path: std::path::PathBuf,
    location: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl CatalogSource for FileSource {
    fn location(&self) -> &str {
        &self.location
    }

    async fn fetch(&self) -> CatalogResult<String> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| CatalogError::transport(format!("{}: {}", self.location, e)))
    }
}

/// One-shot loader wrapping a [`CatalogSource`].
#[derive(Debug)]
pub struct CatalogStore<S> {
    source: S,
}

impl<S: CatalogSource> CatalogStore<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch and decode the catalog.
    pub async fn load(self) -> CatalogResult<Catalog> {
        let payload = self.source.fetch().await?;
        let catalog = Catalog::from_json(&payload)?;
        info!(
            source = self.source.location(),
            products = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Fetch and decode the catalog, logging any failure and substituting an
    /// empty catalog.
    pub async fn load_or_empty(self) -> Catalog {
        let location = self.source.location().to_string();
        match self.load().await {
            Ok(catalog) => catalog,
            Err(err) => {
                error!(source = %location, error = %err, "error loading products; continuing with an empty catalog");
                Catalog::empty()
            }
        }
    }
}

/// Source that always fails, for exercising the degraded path.
#[cfg(test)]
pub(crate) struct FailingSource(pub CatalogError);

#[cfg(test)]
impl CatalogSource for FailingSource {
    fn location(&self) -> &str {
        "<failing>"
    }

    async fn fetch(&self) -> CatalogResult<String> {
        Err(self.0.clone())
    }
}
