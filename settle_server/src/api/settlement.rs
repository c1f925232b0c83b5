//! Summary and settlement API handlers.

use axum::{Json, extract::State};
use settle::ledger::GameSummary;
use settle::settlement::Settlement;

use super::{ApiError, AppState, ledger_error};
use crate::metrics;

/// Get night-level totals and the bank balance.
///
/// # Response
///
/// ```json
/// {
///   "total_buy_in": 250,
///   "total_cash_out": 150,
///   "total_payment": 100,
///   "total_payout": 0,
///   "bank_balance": 0
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: nobody has bought in yet
pub async fn get_summary(State(state): State<AppState>) -> Result<Json<GameSummary>, ApiError> {
    let summary = state.tracker.summary().await.map_err(ledger_error)?;
    Ok(Json(summary))
}

/// Compute the settlement transfers for the active table.
///
/// Balances are derived from the ledger, then matched greedily into the
/// fewest pairwise transfers. The bank's float is reported separately and
/// never moves during settlement.
///
/// # Response
///
/// ```json
/// {
///   "balances": [{"name": "alice", "balance": 50}, {"name": "bob", "balance": -50}],
///   "transactions": [{"payer": "bob", "receiver": "alice", "amount": 50}],
///   "missing_balances": [],
///   "final_bank_balance": 0
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: nobody has bought in yet
pub async fn solve(State(state): State<AppState>) -> Result<Json<Settlement>, ApiError> {
    let settlement = state.tracker.solve().await.map_err(ledger_error)?;

    metrics::settlements_solved_total();
    metrics::settlement_transfer_count(settlement.transactions.len());
    Ok(Json(settlement))
}
