pub mod http;
pub mod apis;
pub mod error;
pub mod mcp;

pub use error::{ApiForm, ErrorResponse};
pub use http::{build_router, start_server, ServerConfig, ServerState};
pub use mcp::{FixtureServer, SESSION_HEADER};
