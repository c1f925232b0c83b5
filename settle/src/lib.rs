//! # Settle
//!
//! A poker-night ledger with a settlement-transfer solver.
//!
//! The library tracks a single night's money flows per player (buy-ins,
//! payments, cash-outs, payouts), persists them per game date, and computes
//! the pairwise transfers that square everyone up at the end of the night.
//!
//! ## Core Modules
//!
//! - [`settlement`]: the pure settlement solver — balances in, transfers out
//! - [`ledger`]: session tracker, per-player records, and balance derivation
//! - [`db`]: SQLite connection pooling and the records repository
//!
//! ## Example
//!
//! ```
//! use settle::settlement::{self, PlayerBalance};
//!
//! let balances = vec![
//!     PlayerBalance::new("alice", 50),
//!     PlayerBalance::new("bob", -30),
//!     PlayerBalance::new("carol", -20),
//! ];
//! let settlement = settlement::solve(&balances, 0);
//! assert_eq!(settlement.transactions.len(), 2);
//! assert!(settlement.missing_balances.is_empty());
//! ```

/// Settlement solver: balances in, minimal pairwise transfers out.
pub mod settlement;
pub use settlement::{PlayerBalance, Settlement, Transfer, solve};

/// Session ledger: per-player records, balance derivation, persistence.
pub mod ledger;
pub use ledger::{
    GameSummary, LedgerError, LedgerResult, LedgerTracker, PaymentMethod, PlayerRecord, PlayerRow,
    SessionTable,
};

/// Database pooling and the records repository.
pub mod db;
pub use db::{Database, DatabaseConfig};
