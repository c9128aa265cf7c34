//! Bracket service for the regional esports festival.
//!
//! Boots the participant registry from an optional roster file, wires the
//! bracket engine, and serves the REST API until interrupted.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use pico_args::Arguments;
use tracing::{info, warn};

use eb_server::api::{self, AppState};
use eb_server::config::ServerConfig;
use eb_server::{logging, metrics};
use esports_brackets::bracket::{BracketManager, Shuffler};
use esports_brackets::store::MemoryStore;

const HELP: &str = "\
Run the esports festival bracket service

USAGE:
  eb_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env EB_BIND or 127.0.0.1:3000]
  --roster     PATH        Roster JSON file seeding tournaments, teams, and players  [default: env EB_ROSTER]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  EB_BIND                  Server bind address (e.g., 0.0.0.0:8080)
  EB_ROSTER                Path to the roster JSON file
  EB_METRICS_BIND          Prometheus exporter bind address (metrics off when unset)
  EB_SHUFFLE_SEED          Fixed shuffle seed for reproducible draws
  RUST_LOG                 Log filter (e.g., info,eb_server=debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let roster_override: Option<PathBuf> = pargs.opt_value_from_str("--roster")?;

    let config = ServerConfig::from_env(bind_override, roster_override)?;
    config.validate()?;

    logging::init();
    info!("Starting bracket service at {}", config.bind);

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(Error::msg)?;
        info!("Prometheus exporter listening on {metrics_bind}");
    }

    let store = match &config.roster_path {
        Some(path) => {
            let store = MemoryStore::from_roster_file(path)?;
            info!(
                "Loaded roster from {} ({} tournament(s))",
                path.display(),
                store.tournament_count().await
            );
            store
        }
        None => {
            warn!("No roster configured; starting with an empty participant registry");
            MemoryStore::new()
        }
    };

    let shuffler = match config.shuffle_seed {
        Some(seed) => {
            warn!("Using fixed shuffle seed {seed}; bracket draws will be reproducible");
            Shuffler::from_seed(seed)
        }
        None => Shuffler::new(),
    };

    let manager = BracketManager::with_store(Arc::new(store), shuffler);
    let app = api::create_router(AppState { manager });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
