// MCP over HTTP (Streamable HTTP transport)

use fimock_core::AuthGate;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use std::sync::Arc;

use super::FixtureServer;

/// Create the MCP HTTP service
pub fn create_mcp_service(gate: AuthGate) -> StreamableHttpService<FixtureServer, LocalSessionManager> {
    // A server instance per MCP session, all sharing the same gate
    let service_factory = move || Ok(FixtureServer::new(gate.clone()));

    let session_manager = Arc::new(LocalSessionManager::default());

    // Stateful so every request carries an Mcp-Session-Id
    let config = StreamableHttpServerConfig {
        sse_keep_alive: Some(std::time::Duration::from_secs(15)),
        stateful_mode: true,
        ..Default::default()
    };

    StreamableHttpService::new(service_factory, session_manager, config)
}
