//! Settlement solver for end-of-night ledger squaring.
//!
//! Given each player's signed net balance (positive: the table owes the
//! player; negative: the player owes the table), the solver produces an
//! ordered list of pairwise transfers that zeroes every matched balance.
//! The bank's float is carried through untouched — settlement only moves
//! money between players.
//!
//! The solver is a pure function: no I/O, no shared state, deterministic
//! output for a given input. It is safe to call concurrently.
//!
//! ## Example
//!
//! ```
//! use settle::settlement::{self, PlayerBalance};
//!
//! let balances = vec![
//!     PlayerBalance::new("alice", 40),
//!     PlayerBalance::new("bob", -25),
//!     PlayerBalance::new("carol", -15),
//! ];
//! let settlement = settlement::solve(&balances, 0);
//!
//! assert_eq!(settlement.transactions[0].payer, "bob");
//! assert_eq!(settlement.transactions[0].amount, 25);
//! assert!(settlement.missing_balances.is_empty());
//! ```

pub mod models;
pub mod solver;

pub use models::{PlayerBalance, Settlement, Transfer};
pub use solver::solve;
