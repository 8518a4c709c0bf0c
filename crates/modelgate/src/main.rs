use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use modelgate::build_info;
use modelgate::config::Config;
use modelgate::gateway::Gateway;
use modelgate::llm::{Credentials, ProviderRegistry};
use modelgate::server::{AppState, build_app};

#[derive(Parser, Debug)]
#[command(
    name = "modelgate",
    version,
    about = "Chat completion gateway for hosted LLM providers"
)]
struct Cli {
    /// Path to the YAML config file.
    #[arg(long, short, default_value = "modelgate.yaml")]
    config: PathBuf,

    /// Override `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may live in a local .env file; real environment wins.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .await
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let client = reqwest::Client::builder()
        .timeout(config.gateway.upstream_timeout())
        .user_agent(format!("{}/{}", build_info::NAME, build_info::VERSION))
        .build()
        .context("building HTTP client")?;

    let credentials = Credentials::from_env();
    let providers = ProviderRegistry::from_credentials(client, &credentials);

    let state = AppState {
        gateway: Gateway::new(providers),
        default_model: config.gateway.default_model.clone(),
    };
    let app = build_app(state, config.server.request_timeout_seconds);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(
        %addr,
        version = build_info::VERSION,
        default_model = %config.gateway.default_model,
        "modelgate listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("modelgate stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
