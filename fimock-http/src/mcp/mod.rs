//! MCP tool server - every tool call goes through the authorization gate

mod service;

pub use service::create_mcp_service;

use axum::http::request::Parts;
use fimock_core::{tools, AuthGate, SessionId, TOOLS};
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
    ErrorData as McpError, ServerHandler,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Header the streamable HTTP transport uses to carry the MCP session
pub const SESSION_HEADER: &str = "mcp-session-id";

const MISSING_SESSION_MESSAGE: &str = "missing mcp session id";

const INSTRUCTIONS: &str = "Mock financial data server. Every tool requires the user to log in first: \
when a tool returns status login_required, show the login_url to the user, wait for them to finish \
logging in, then call the tool again.";

/// Session id of the HTTP request carrying an MCP message
pub fn session_id_from_parts(parts: &Parts) -> Option<SessionId> {
    parts
        .headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(SessionId::from)
}

/// MCP server state, one per MCP session (the gate is shared)
#[derive(Clone)]
pub struct FixtureServer {
    gate: AuthGate,
    tools: Arc<Vec<Tool>>,
}

impl FixtureServer {
    pub fn new(gate: AuthGate) -> Self {
        Self {
            gate,
            tools: Arc::new(tool_list()),
        }
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Gate a call for a known session and wrap the outcome for the transport
    pub async fn handle_call(
        &self,
        tool_name: &str,
        session_id: Option<SessionId>,
    ) -> Result<CallToolResult, McpError> {
        if tools::find(tool_name).is_none() {
            return Err(McpError::invalid_params(
                format!("tool '{}' not found", tool_name),
                None,
            ));
        }

        let Some(session_id) = session_id else {
            warn!("tool call {} without an MCP session id", tool_name);
            return Ok(CallToolResult::error(vec![Content::text(MISSING_SESSION_MESSAGE)]));
        };

        let outcome = self.gate.authorize(&session_id, tool_name).await;
        let is_error = outcome.is_error();
        let content = vec![Content::text(outcome.into_text())];

        Ok(if is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}

fn tool_list() -> Vec<Tool> {
    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), serde_json::Value::String("object".to_string()));
    let schema = Arc::new(schema);

    TOOLS
        .iter()
        .map(|tool| Tool::new(tool.name, tool.description, schema.clone()))
        .collect()
}

impl ServerHandler for FixtureServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fimock".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone())))
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let session_id = context
                .extensions
                .get::<Parts>()
                .and_then(session_id_from_parts);
            info!(
                "[{}] tools/call {}",
                session_id.as_ref().map(|s| s.as_str()).unwrap_or("-"),
                request.name
            );
            self.handle_call(&request.name, session_id).await
        }
    }
}
