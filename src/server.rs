//! MCP server exposing documentation lookup and search tools.

use crate::catalog::state::CatalogState;
use crate::config::Config;
use crate::tools::lookup::{LookupRequest, handle_lookup};
use crate::tools::reload::handle_reload;
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for meta documentation queries
#[derive(Clone)]
pub struct MetaDocsServer {
    /// Shared, swappable catalog
    state: Arc<CatalogState>,

    /// Resolved runtime configuration
    config: Arc<Config>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for MetaDocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetaDocsServer")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish()
    }
}

#[tool_router]
impl MetaDocsServer {
    pub fn new(state: Arc<CatalogState>, config: Config) -> Self {
        Self {
            state,
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the shared catalog state.
    pub fn catalog_state(&self) -> &Arc<CatalogState> {
        &self.state
    }

    #[tool(
        description = "Look up one documentation object by kind (command, mechanism, tag, event, action, language). Exact names resolve directly; partial names list candidates; unknown names get a 'did you mean' suggestion. Use query 'all' for the full index link.",
        input_schema = inline_schema_for_type::<LookupRequest>()
    )]
    async fn lookup(
        &self,
        Parameters(request): Parameters<LookupRequest>,
    ) -> std::result::Result<String, String> {
        handle_lookup(&self.state, &self.config, request).await
    }

    #[tool(
        description = "Search every kind of documentation at once. Results are grouped into Best, Probable, Possible and Weak matches by how closely names and text match the query."
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, &self.config, request).await
    }

    #[tool(
        description = "Reload the documentation catalog from its file. On failure the previous catalog stays active."
    )]
    async fn reload(&self) -> std::result::Result<String, String> {
        handle_reload(&self.state).await
    }
}

#[tool_handler]
impl ServerHandler for MetaDocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "meta-docs-mcp: fuzzy lookup over script documentation. \
                 Use lookup for a specific command, mechanism, tag, event, action or language; \
                 use search when you do not know which kind holds what you want.",
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this function sets `inline_subschemas = true`
/// so the `kind` enum is inlined instead of referenced via `$ref`.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();
    let object = serde_json::to_value(schema).expect("failed to serialize schema");

    let json_object = match object {
        serde_json::Value::Object(object) => object,
        _ => panic!("Schema serialization produced non-object value"),
    };

    Arc::new(json_object)
}
