//! Poker-night ledger server.
//!
//! Serves the settle ledger over a JSON REST API backed by SQLite, with
//! structured logging, optional Prometheus metrics, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use pico_args::Arguments;
use settle::{Database, LedgerTracker};
use settle_server::{api, config::ServerConfig, logging, metrics};
use tracing::info;

const HELP: &str = "\
Run a poker-night ledger server

USAGE:
  settle_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:7070]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or sqlite://data/settle.db]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             SQLite connection string
  EXPORT_DIR               Directory CSV exports are written to (default: data)
  METRICS_BIND             Optional Prometheus scrape address (e.g., 127.0.0.1:9090)
  RUST_LOG                 Log filter (default: info,sqlx=warn)
";

struct Args {
    bind: Option<SocketAddr>,
    database_url: Option<String>,
}

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

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
    };

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.database_url)?;
    config.validate()?;

    info!("Starting ledger server at {}", config.bind);
    info!("Connecting to database: {}", config.database.database_url);

    let db = Database::new(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {e}"))?;

    let pool = Arc::new(db.pool().clone());
    let tracker = Arc::new(LedgerTracker::new(pool.clone()));
    tracker
        .init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize schema: {e}"))?;

    info!("Database ready");

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(Error::msg)?;
        info!("Prometheus metrics exposed at http://{metrics_bind}/metrics");
    }

    let api_state = api::AppState {
        tracker,
        pool,
        export_dir: Arc::new(config.export_dir.clone()),
    };

    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {e}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
