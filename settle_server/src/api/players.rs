//! Player action API handlers.
//!
//! Every mutation requires an active game and echoes the updated table so
//! clients can re-render without a second fetch. Payment and payout carry
//! a method (`cash` or `zelle`); unknown methods are rejected at
//! deserialization.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use settle::ledger::{PaymentMethod, PlayerRow, SessionTable};

use super::{ApiError, AppState, ledger_error};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct BuyInRequest {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub name: String,
    pub amount: i64,
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct CashOutRequest {
    pub name: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct PayoutRequest {
    pub name: String,
    pub amount: i64,
    pub method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct RemovePlayerRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TableUpdateResponse {
    pub message: String,
    pub table: Vec<PlayerRow>,
}

fn table_update(message: String, action: &str, table: &SessionTable) -> Json<TableUpdateResponse> {
    metrics::ledger_actions_total(action);
    metrics::active_players(table.len());
    Json(TableUpdateResponse {
        message,
        table: table.rows(),
    })
}

/// Record a chip purchase, seating the player on their first buy-in.
///
/// # Errors
///
/// - `400 Bad Request`: no active game or blank name
/// - `422 Unprocessable Entity`: non-positive amount
pub async fn buy_in(
    State(state): State<AppState>,
    Json(request): Json<BuyInRequest>,
) -> Result<Json<TableUpdateResponse>, ApiError> {
    let table = state
        .tracker
        .buy_in(&request.name, request.amount)
        .await
        .map_err(ledger_error)?;

    Ok(table_update(
        format!("{} bought in for {}", request.name, request.amount),
        "buy_in",
        &table,
    ))
}

/// Record money the player handed to the bank.
///
/// # Errors
///
/// - `400 Bad Request`: no active game, blank name, or player has not bought in
/// - `422 Unprocessable Entity`: non-positive amount or unknown method
pub async fn payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<TableUpdateResponse>, ApiError> {
    let table = state
        .tracker
        .payment(&request.name, request.amount, request.method)
        .await
        .map_err(ledger_error)?;

    Ok(table_update(
        format!(
            "{} paid {} via {}",
            request.name, request.amount, request.method
        ),
        "payment",
        &table,
    ))
}

/// Record chips the player redeemed at the end of play.
///
/// # Errors
///
/// - `400 Bad Request`: no active game, blank name, or player has not bought in
/// - `422 Unprocessable Entity`: non-positive amount
pub async fn cash_out(
    State(state): State<AppState>,
    Json(request): Json<CashOutRequest>,
) -> Result<Json<TableUpdateResponse>, ApiError> {
    let table = state
        .tracker
        .cash_out(&request.name, request.amount)
        .await
        .map_err(ledger_error)?;

    Ok(table_update(
        format!("{} cashed out {}", request.name, request.amount),
        "cash_out",
        &table,
    ))
}

/// Record money the bank paid back to the player.
///
/// # Errors
///
/// - `400 Bad Request`: no active game, blank name, or player has not bought in
/// - `422 Unprocessable Entity`: non-positive amount or unknown method
pub async fn payout(
    State(state): State<AppState>,
    Json(request): Json<PayoutRequest>,
) -> Result<Json<TableUpdateResponse>, ApiError> {
    let table = state
        .tracker
        .pay_out(&request.name, request.amount, request.method)
        .await
        .map_err(ledger_error)?;

    Ok(table_update(
        format!(
            "{} received payout of {} via {}",
            request.name, request.amount, request.method
        ),
        "payout",
        &table,
    ))
}

/// Remove a player from the table and from storage.
///
/// # Errors
///
/// - `400 Bad Request`: no active game, blank name, or player has not bought in
pub async fn remove_player(
    State(state): State<AppState>,
    Json(request): Json<RemovePlayerRequest>,
) -> Result<Json<TableUpdateResponse>, ApiError> {
    let table = state
        .tracker
        .remove_player(&request.name)
        .await
        .map_err(ledger_error)?;

    Ok(table_update(
        format!("{} removed from table", request.name),
        "remove",
        &table,
    ))
}
