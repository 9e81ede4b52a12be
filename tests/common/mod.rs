//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `catalog`: the parsed `tests/fixtures/catalog.json` catalog
//! - `config`: default configuration with a deterministic docs URL
//! - `temp_catalog`: a catalog file in a temp directory, for reload tests

use meta_docs_mcp::catalog::loader::parse_catalog;
use meta_docs_mcp::{Catalog, CatalogState, Config};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Returns the project root directory (where Cargo.toml lives).
pub fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Path to the shared catalog fixture.
pub fn fixture_path() -> PathBuf {
    project_root().join("tests/fixtures/catalog.json")
}

/// Raw JSON of the shared catalog fixture.
pub fn fixture_json() -> String {
    std::fs::read_to_string(fixture_path()).expect("Failed to read catalog fixture")
}

#[fixture]
pub fn catalog() -> Catalog {
    meta_docs_mcp::tracing::init();
    parse_catalog(&fixture_json(), &fixture_path()).expect("Fixture catalog should parse")
}

#[fixture]
pub fn config() -> Config {
    let mut config = Config::default();
    config.apply_overrides(None, Some("https://docs.test/"));
    config
}

/// A catalog file living in a temp directory that is removed on drop.
#[allow(dead_code)] // Used by some integration test crates only
pub struct TempCatalog {
    _temp: TempDir,
    path: PathBuf,
    pub state: Arc<CatalogState>,
}

#[allow(dead_code)] // Used by some integration test crates only
impl TempCatalog {
    /// Copy the shared fixture into a fresh temp directory and load it.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("catalog.json");
        std::fs::write(&path, fixture_json()).expect("Failed to write temp catalog");
        let state = CatalogState::from_file(&path).expect("Temp catalog should load");
        Self {
            _temp: temp,
            path,
            state: Arc::new(state),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the catalog file on disk (does not reload).
    pub fn rewrite(&self, content: &str) {
        std::fs::write(&self.path, content)
            .unwrap_or_else(|e| panic!("Failed to rewrite '{}': {}", self.path.display(), e));
    }
}

#[fixture]
#[allow(dead_code)] // Used by some integration test crates only
pub fn temp_catalog() -> TempCatalog {
    meta_docs_mcp::tracing::init();
    TempCatalog::new()
}
