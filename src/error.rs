//! Error handling types and utilities.

use crate::catalog::Kind;
use std::path::PathBuf;

/// A specialized Result type for meta-docs-mcp plumbing (startup, config, reload).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods. Lookup and search never fail; their outcomes are
/// result variants instead.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when building or loading a documentation catalog fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is not valid catalog JSON.
    #[error("Failed to parse catalog at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Two entries of the same kind share a normalized name.
    #[error("Duplicate {kind} entry '{name}'")]
    DuplicateEntry { kind: Kind, name: String },
    /// An entry has a blank name and cannot be keyed.
    #[error("{kind} entry with an empty name")]
    EmptyName { kind: Kind },
}
