//! Game session API handlers.
//!
//! Session lifecycle endpoints: starting (or resuming) a game date,
//! reading the active table, browsing history, exporting CSV, and
//! saving/clearing the session.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use settle::ledger::PlayerRow;

use super::{ApiError, AppState, ErrorResponse, ledger_error};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct StartGameResponse {
    pub message: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub current_date: Option<String>,
    pub table: Vec<PlayerRow>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub date: String,
    pub table: Vec<PlayerRow>,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub message: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Start a new game (or resume a saved one) for a specific date.
///
/// Any previously active game is saved first; the named date's persisted
/// table is loaded as the active session.
///
/// # Errors
///
/// - `400 Bad Request`: blank date
/// - `500 Internal Server Error`: storage failure
pub async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartGameRequest>,
) -> Result<Json<StartGameResponse>, ApiError> {
    let date = state
        .tracker
        .start_game(&request.date)
        .await
        .map_err(ledger_error)?;

    metrics::games_started_total();
    Ok(Json(StartGameResponse {
        message: format!("Game started for {date}"),
        date,
    }))
}

/// Get the active game date and its table.
pub async fn current_game(State(state): State<AppState>) -> Json<TableResponse> {
    let (current_date, table) = state.tracker.current_game().await;
    Json(TableResponse {
        current_date,
        table: table.rows(),
    })
}

/// Get the active table (same payload as `/game/current`).
pub async fn get_table(State(state): State<AppState>) -> Json<TableResponse> {
    current_game(State(state)).await
}

/// Get the saved table for a past date without touching the active game.
///
/// # Errors
///
/// - `400 Bad Request`: blank date
/// - `500 Internal Server Error`: storage failure
pub async fn get_history(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let table = state.tracker.history(&date).await.map_err(ledger_error)?;
    Ok(Json(HistoryResponse {
        date,
        table: table.rows(),
    }))
}

/// Export every persisted record to a CSV file in the export directory.
///
/// The filename is derived from the active date (`01/15` -> `01_15.csv`).
///
/// # Errors
///
/// - `400 Bad Request`: no active game
/// - `500 Internal Server Error`: storage or filesystem failure
pub async fn export_csv(
    State(state): State<AppState>,
) -> Result<Json<ExportResponse>, ApiError> {
    let export = state.tracker.export_csv().await.map_err(ledger_error)?;

    let write_result = async {
        tokio::fs::create_dir_all(state.export_dir.as_ref()).await?;
        tokio::fs::write(state.export_dir.join(&export.filename), &export.content).await
    }
    .await;

    if let Err(e) = write_result {
        tracing::error!(filename = %export.filename, "CSV export write failed: {e}");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to write export file".to_string(),
            }),
        ));
    }

    Ok(Json(ExportResponse {
        message: format!("Data exported to {}", export.filename),
        filename: export.filename,
    }))
}

/// Persist the active table.
///
/// # Errors
///
/// - `400 Bad Request`: no active game
pub async fn save_game(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let date = state.tracker.save().await.map_err(ledger_error)?;
    Ok(Json(MessageResponse {
        message: format!("{date} game saved"),
    }))
}

/// Save the active table, then detach from the session.
///
/// # Errors
///
/// - `400 Bad Request`: no active game
pub async fn clear_game(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let date = state.tracker.clear().await.map_err(ledger_error)?;
    metrics::active_players(0);
    Ok(Json(MessageResponse {
        message: format!("{date} game saved and cleared"),
    }))
}
