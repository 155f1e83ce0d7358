use axum::{
    routing::{get, post},
    Router,
};
use fimock_core::{AllowList, AuthGate, FixtureStore, LoginUrlBuilder, SessionStore, TOOLS};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::apis;
use crate::mcp::create_mcp_service;

/// Configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub address: String,
    /// Base of the login URLs handed to unauthenticated callers
    pub login_base_url: String,
    /// Directory holding `<phone>/<tool>.json` fixtures
    pub fixture_root: PathBuf,
    /// Explicit allow-list; empty means "every fixture directory"
    pub allowed_numbers: Vec<String>,
    /// Directory served under /static
    pub static_dir: PathBuf,
    /// Where the browser goes after a login submission
    pub post_login_redirect: String,
}

impl ServerConfig {
    /// Create a new server config listening on all interfaces at `port`
    pub fn new(port: u16) -> Self {
        Self {
            address: format!("0.0.0.0:{}", port),
            login_base_url: LoginUrlBuilder::for_local_port(port).base_url().to_string(),
            fixture_root: PathBuf::from("test_data_dir"),
            allowed_numbers: Vec::new(),
            static_dir: PathBuf::from("static"),
            post_login_redirect: "http://localhost:8080".to_string(),
        }
    }

    pub fn with_address(mut self, address: String) -> Self {
        self.address = address;
        self
    }

    pub fn with_login_base_url(mut self, login_base_url: String) -> Self {
        self.login_base_url = login_base_url;
        self
    }

    pub fn with_fixture_root(mut self, fixture_root: PathBuf) -> Self {
        self.fixture_root = fixture_root;
        self
    }

    pub fn with_allowed_numbers(mut self, allowed_numbers: Vec<String>) -> Self {
        self.allowed_numbers = allowed_numbers;
        self
    }

    pub fn with_static_dir(mut self, static_dir: PathBuf) -> Self {
        self.static_dir = static_dir;
        self
    }

    pub fn with_post_login_redirect(mut self, post_login_redirect: String) -> Self {
        self.post_login_redirect = post_login_redirect;
        self
    }

    /// The configured allow-list, or one derived from the fixture root
    pub fn load_allow_list(&self) -> AllowList {
        if !self.allowed_numbers.is_empty() {
            return AllowList::new(self.allowed_numbers.iter().cloned());
        }
        match AllowList::from_fixture_root(&self.fixture_root) {
            Ok(list) => list,
            Err(e) => {
                warn!("{}; no phone numbers are allowed", e);
                AllowList::default()
            }
        }
    }
}

/// Server state shared by every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<ServerConfig>,
    pub sessions: Arc<SessionStore>,
    pub allow_list: Arc<AllowList>,
    pub login_urls: LoginUrlBuilder,
    pub gate: AuthGate,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let allow_list = Arc::new(config.load_allow_list());
        Self::with_allow_list(config, allow_list)
    }

    pub fn with_allow_list(config: ServerConfig, allow_list: Arc<AllowList>) -> Self {
        let sessions = Arc::new(SessionStore::new());
        let login_urls = LoginUrlBuilder::new(config.login_base_url.clone());
        let gate = AuthGate::new(
            sessions.clone(),
            allow_list.clone(),
            FixtureStore::new(config.fixture_root.clone()),
            login_urls.clone(),
        );

        Self {
            config: Arc::new(config),
            sessions,
            allow_list,
            login_urls,
            gate,
        }
    }
}

/// Build the full router: login flow, static files and the MCP endpoint
pub fn build_router(state: ServerState) -> Router {
    let mcp_service = create_mcp_service(state.gate.clone());
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(apis::login::handle_root_redirect))
        .route("/generateSession", get(apis::login::handle_generate_session))
        .route("/mockWebPage", get(apis::login::handle_login_page))
        .route("/login", post(apis::login::handle_login))
        .nest_service("/static", static_files)
        .nest_service("/mcp", mcp_service)
        .fallback(apis::handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = ServerState::new(config.clone());

    println!("✓ Session store initialized");
    println!("  Fixture root: \x1b[1m{}\x1b[0m", config.fixture_root.display());
    if state.allow_list.is_empty() {
        println!("  Allowed numbers: \x1b[1mnone\x1b[0m");
    } else {
        println!("  Allowed numbers: \x1b[2m{}\x1b[0m", state.allow_list.numbers().join(", "));
    }
    println!();

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.address).await?;

    // Print server info
    println!("Server starting on \x1b[1mhttp://{}\x1b[0m", config.address);
    println!("\nAvailable endpoints:");
    println!("  \x1b[1mGET  /\x1b[0m                     - Start a session and redirect to login");
    println!("  \x1b[1mGET  /generateSession\x1b[0m      - Start a session (JSON)");
    println!("  \x1b[1mGET  /mockWebPage\x1b[0m          - Mock login page");
    println!("  \x1b[1mPOST /login\x1b[0m                - Bind a phone number to a session");
    println!("  \x1b[1m     /mcp\x1b[0m                  - MCP streamable HTTP endpoint");

    let tool_names: Vec<&str> = TOOLS.iter().map(|t| t.name).collect();
    println!("\nAvailable tools: \x1b[2m{}\x1b[0m", tool_names.join(", "));

    println!("\nPress Ctrl+C to stop\n");

    info!("HTTP server listening on {}", config.address);

    axum::serve(listener, app).await?;
    Ok(())
}
