//! ZAnalytics Relay - HTTP relay in front of the analytics API.
//!
//! Reads credentials once at startup and exits before binding if any is
//! missing.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::Request;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use zanalytics_infra::{config, AnalyticsClient};
use zanalytics_relay::{router, spawn_window_pruner, AppState};

/// HTTP relay for the Zoho Analytics API.
#[derive(Parser, Debug)]
#[command(name = "zanalytics-relay")]
#[command(about = "HTTP relay for the Zoho Analytics API", long_about = None)]
struct Args {
    /// Path to .env file (optional).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,

    /// TOML or JSON config file. Environment variables override its values.
    #[arg(long, env = "ZANALYTICS_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overrides RELAY_BIND_ADDR.
    #[arg(long)]
    bind: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()));

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load .env file if it exists
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    init_tracing(args.log_json);

    let mut config = config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.relay.bind_addr = bind;
    }

    let client = AnalyticsClient::new(config.credentials, config.client)?;
    let bind_addr = config.relay.bind_addr.clone();
    let state = AppState::new(client, config.relay)?;
    spawn_window_pruner(state.limiter.clone(), state.config.rate_limit_window());

    let app = router(state).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        },
    ));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting relay");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
