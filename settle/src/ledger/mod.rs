//! Session ledger for a poker night.
//!
//! One game is active at a time, keyed by a date string (`MM/DD`). Each
//! player's row tracks chips bought (`buy_in`), money handed to the bank
//! (`cash`/`zelle`), chips redeemed (`cash_out`), and money paid back out
//! (`payout_cash`/`payout_zelle`). Every mutation is persisted, so a game
//! can be reopened on a later evening by starting the same date again.
//!
//! Balance derivation feeding the settlement solver:
//!
//! ```text
//! player balance = -buy_in + payment + cash_out - payout
//! bank balance   = Σbuy_in - Σcash_out - Σpayment + Σpayout
//! ```
//!
//! which keeps the ledger zero-sum: player balances and the bank always
//! cancel.

pub mod errors;
pub mod models;
pub mod tracker;

pub use errors::{LedgerError, LedgerResult};
pub use models::{CsvExport, GameSummary, PaymentMethod, PlayerRecord, PlayerRow, SessionTable};
pub use tracker::LedgerTracker;
