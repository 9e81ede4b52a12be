//! Fuzzy lookup over a fixed catalog of script documentation.
//!
//! The core lives in [`search`] (per-kind resolution, catalog-wide tiered
//! search, edit-distance ranking) and [`markup`] (cross-reference rewriting).
//! [`server`] wraps it as an MCP server over stdio.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod markup;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;

pub use catalog::state::CatalogState;
pub use catalog::{Catalog, CatalogBuilder, DocEntry, Kind, KindDetails, KindPartition};
pub use config::Config;
pub use error::LoadError;
pub use format::{Reply, Tone};
pub use search::{
    Closeness, MatchResult, Outcome, Query, ResolveOptions, Tier, TieredResults, closest_match,
    distance, resolve, search_all,
};
pub use server::MetaDocsServer;
