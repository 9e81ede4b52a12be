//! Catalog reload handler.

use crate::catalog::state::CatalogState;

/// Re-read the catalog file and publish it.
pub async fn handle_reload(state: &CatalogState) -> Result<String, String> {
    match state.reload().await {
        Ok(Some(count)) => Ok(format!("Reloaded documentation catalog: {} entries.", count)),
        Ok(None) => Err("No catalog file configured; nothing to reload.".to_string()),
        Err(e) => Err(format!("Reload failed, previous catalog kept: {}", e)),
    }
}
