use clap::Parser;
use fimock_http::{start_server, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mock financial-data MCP server behind a simulated phone-number login
#[derive(Parser, Debug)]
#[command(name = "fimock", version, about)]
struct Args {
    /// Port to listen on; also used in generated login URLs
    #[arg(long, env = "FI_MCP_PORT", default_value_t = 8080)]
    port: u16,

    /// Interface to bind
    #[arg(long, env = "FI_MCP_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Directory of `<phone>/<tool>.json` fixtures
    #[arg(long, env = "FI_MCP_FIXTURE_ROOT", default_value = "test_data_dir")]
    fixture_root: PathBuf,

    /// Comma-separated allowed phone numbers (default: every fixture directory)
    #[arg(long, env = "FI_MCP_ALLOWED_NUMBERS", value_delimiter = ',')]
    allowed_numbers: Vec<String>,

    /// Directory served under /static
    #[arg(long, env = "FI_MCP_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Where the browser is sent after logging in
    #[arg(long, env = "FI_MCP_POST_LOGIN_REDIRECT", default_value = "http://localhost:8080")]
    post_login_redirect: String,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig::new(self.port)
            .with_address(format!("{}:{}", self.host, self.port))
            .with_fixture_root(self.fixture_root)
            .with_allowed_numbers(self.allowed_numbers)
            .with_static_dir(self.static_dir)
            .with_post_login_redirect(self.post_login_redirect)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!("starting server on port: {}", args.port);

    start_server(args.into_config()).await
}
