use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use threads_mock::{
    config::{DEFAULT_CLIENT_ID, DEFAULT_CLIENT_SECRET, DEFAULT_REDIRECT_URI},
    fixtures, MockConfig,
};

#[derive(Parser, Debug)]
#[command(name = "threads-mock", version, about = "Mock Threads API server")]
struct Args {
    /// Port to listen on
    #[arg(default_value_t = 8888)]
    port: u16,

    #[arg(long, default_value = DEFAULT_CLIENT_ID)]
    client_id: String,

    #[arg(long, default_value = DEFAULT_CLIENT_SECRET)]
    client_secret: String,

    /// The only redirect URI the authorization dialog accepts
    #[arg(long, default_value = DEFAULT_REDIRECT_URI)]
    redirect_uri: String,

    /// Id of the fixture user who authorizes the app
    #[arg(long, default_value_t = fixtures::USERS[0].id.to_owned())]
    user: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if fixtures::find_user(&args.user).is_none() {
        anyhow::bail!("unknown fixture user: {}", args.user);
    }

    let config = MockConfig::new()
        .client_id(args.client_id)
        .client_secret(args.client_secret)
        .redirect_uri(args.redirect_uri)
        .signed_in_user(args.user);

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("listening on port {}", args.port);

    threads_mock::serve(listener, config)
        .await
        .context("server error")
}
