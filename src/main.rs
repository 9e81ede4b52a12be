use anyhow::Context;
use meta_docs_mcp::{CatalogState, Config, MetaDocsServer};
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    meta_docs_mcp::tracing::init();

    let config = Config::load()?;
    tracing::info!(
        "Starting meta-docs-mcp (catalog: {})",
        config.catalog_path.display()
    );

    let state = CatalogState::from_file(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog_path.display()))?;

    // Create and serve the MCP server over stdio
    let server = MetaDocsServer::new(Arc::new(state), config);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
