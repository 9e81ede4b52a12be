//! Catalog-wide search handler.

use crate::catalog::state::CatalogState;
use crate::config::Config;
use crate::format::Reply;
use crate::format::text::{render, render_all};
use crate::search::{Query, search_all};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Free-text search terms, matched against names and documentation text of every kind
    pub query: String,
}

/// Execute a tiered search over every documentation kind.
pub async fn handle_search(
    state: &CatalogState,
    config: &Config,
    request: SearchRequest,
) -> Result<String, String> {
    let query = Query::parse(&request.query);
    if query.is_empty() {
        return Ok(render(&Reply::error(
            "Need input for 'Search' command",
            "Please specify some text to search, like `!search something`.",
        )));
    }

    let catalog = state.snapshot().await;
    let results = search_all(&catalog, &query);
    tracing::info!(query = query.joined(), empty = results.is_empty(), "Search");

    Ok(render_all(&results.replies(config.max_display)))
}
