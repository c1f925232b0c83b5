//! Poker-night ledger server.
//!
//! Exposes the [`settle`] library over a JSON REST API: session
//! management, per-player money flows, night summaries, and the
//! settlement solve.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
