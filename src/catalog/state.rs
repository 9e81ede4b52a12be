//! Shared catalog handle with swap-on-reload semantics.

use super::Catalog;
use super::loader::load_catalog;
use crate::error::LoadError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The currently published catalog.
///
/// Queries take an `Arc` snapshot and run against it without holding the lock.
/// A reload builds the replacement catalog completely before swapping it in, so
/// in-flight queries keep seeing the old catalog and new queries see the new one.
pub struct CatalogState {
    current: RwLock<Arc<Catalog>>,
    source: Option<PathBuf>,
}

impl std::fmt::Debug for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogState")
            .field("source", &self.source)
            .field("entries", &self.current.try_read().map(|c| c.len()).ok())
            .finish()
    }
}

impl CatalogState {
    /// Publish an already-built catalog with no backing file.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            source: None,
        }
    }

    /// Load the catalog at `path` and remember it for later reloads.
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let catalog = load_catalog(&path)?;
        Ok(Self {
            current: RwLock::new(Arc::new(catalog)),
            source: Some(path),
        })
    }

    /// The file this state reloads from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Snapshot of the current catalog.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Atomically publish a new catalog, returning the one it replaced.
    pub async fn swap(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }

    /// Re-read the backing file and swap it in.
    ///
    /// On failure the current catalog stays published. Returns the new entry
    /// count, or `Ok(None)` when there is no backing file.
    pub async fn reload(&self) -> Result<Option<usize>, LoadError> {
        let Some(path) = self.source.clone() else {
            return Ok(None);
        };

        // Blocking read + parse.
        let loaded = tokio::task::spawn_blocking(move || load_catalog(&path))
            .await
            .map_err(|e| LoadError::Io {
                path: self.source.clone().unwrap_or_default(),
                source: std::io::Error::other(e),
            })?;

        match loaded {
            Ok(catalog) => {
                let count = catalog.len();
                self.swap(catalog).await;
                tracing::info!("Catalog reloaded: {} entries", count);
                Ok(Some(count))
            }
            Err(e) => {
                tracing::warn!("Catalog reload rejected, keeping previous catalog: {}", e);
                Err(e)
            }
        }
    }
}
