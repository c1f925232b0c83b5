//! HTTP API for the poker-night ledger server.
//!
//! The API is built with axum and tower middleware. All responses are
//! JSON; errors use a `{ "error": "..." }` envelope.
//!
//! # Modules
//!
//! - [`game`]: session lifecycle (start, current, save, clear, history, export)
//! - [`players`]: per-player money flows (buy-in, payment, cash-out, payout, remove)
//! - [`settlement`]: night summary and the settlement solve
//! - [`request_id`]: request correlation and HTTP metrics middleware
//!
//! # Endpoints Overview
//!
//! ```text
//! GET    /health                  - Health check
//! POST   /api/game/start          - Start (or resume) a game date
//! GET    /api/game/current        - Active date and table
//! POST   /api/players/buy-in      - Record a chip purchase
//! POST   /api/players/payment     - Record money paid to the bank
//! POST   /api/players/cash-out    - Record chips redeemed
//! POST   /api/players/payout      - Record money paid back out
//! DELETE /api/players/remove      - Remove a player
//! GET    /api/table               - Active table
//! GET    /api/summary             - Night totals and bank balance
//! GET    /api/solve               - Settlement transfers
//! GET    /api/history/{date}      - Another date's saved table
//! GET    /api/export              - Write all records to CSV
//! POST   /api/save                - Persist the active table
//! POST   /api/clear               - Save and detach the active game
//! ```

pub mod game;
pub mod players;
pub mod request_id;
pub mod settlement;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
};
use serde::Serialize;
use serde_json::json;
use settle::ledger::{LedgerError, LedgerTracker};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to Arc wrappers).
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<LedgerTracker>,
    pub pool: Arc<SqlitePool>,
    pub export_dir: Arc<PathBuf>,
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error type: HTTP status plus the error envelope.
pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a ledger error onto an HTTP status and a client-safe message.
///
/// Business-rule violations are 400s, bad input values are 422s, and
/// storage failures are sanitized 500s.
pub(crate) fn ledger_error(err: LedgerError) -> ApiError {
    let status = match &err {
        LedgerError::Database(_) | LedgerError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LedgerError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/game/start", post(game::start_game))
        .route("/game/current", get(game::current_game))
        .route("/players/buy-in", post(players::buy_in))
        .route("/players/payment", post(players::payment))
        .route("/players/cash-out", post(players::cash_out))
        .route("/players/payout", post(players::payout))
        .route("/players/remove", delete(players::remove_player))
        .route("/table", get(game::get_table))
        .route("/summary", get(settlement::get_summary))
        .route("/solve", get(settlement::solve))
        .route("/history/{date}", get(game::get_history))
        .route("/export", get(game::export_csv))
        .route("/save", post(game::save_game))
        .route("/clear", post(game::clear_game));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Checks database connectivity and reports the active game date.
/// Returns `200 OK` when healthy, `503 Service Unavailable` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(state.pool.as_ref())
        .await
        .is_ok();

    let (current_date, table) = state.tracker.current_game().await;

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "game": {
            "current_date": current_date,
            "players": table.len(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
