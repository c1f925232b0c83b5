//! Prometheus metrics for monitoring ledger server health and usage.
//!
//! Metrics are exposed in Prometheus text format on the optional
//! `METRICS_BIND` listener for scraping by monitoring systems.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter.
///
/// Sets up a scrape endpoint on the specified address; metrics become
/// available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request with method, path, and status labels.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Ledger Metrics
// ============================================================================

/// Increment games started counter.
pub fn games_started_total() {
    metrics::counter!("games_started_total").increment(1);
}

/// Record a ledger action (buy_in, payment, cash_out, payout, remove).
pub fn ledger_actions_total(action: &str) {
    metrics::counter!("ledger_actions_total",
        "action" => action.to_string()
    )
    .increment(1);
}

/// Set current seated players count.
pub fn active_players(count: usize) {
    metrics::gauge!("active_players").set(count as f64);
}

// ============================================================================
// Settlement Metrics
// ============================================================================

/// Increment settlement solves counter.
pub fn settlements_solved_total() {
    metrics::counter!("settlements_solved_total").increment(1);
}

/// Record how many transfers a settlement produced.
pub fn settlement_transfer_count(count: usize) {
    metrics::histogram!("settlement_transfer_count").record(count as f64);
}
