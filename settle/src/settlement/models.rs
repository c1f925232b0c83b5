//! Settlement data models.

use serde::{Deserialize, Serialize};

/// A player's signed net balance in whole currency units.
///
/// Positive means the table owes the player; negative means the player
/// owes the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBalance {
    pub name: String,
    pub balance: i64,
}

impl PlayerBalance {
    pub fn new(name: impl Into<String>, balance: i64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

/// A single payer-to-receiver transfer. `amount` is strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub payer: String,
    pub receiver: String,
    pub amount: i64,
}

/// Result of a settlement run.
///
/// Applying every entry of `transactions` (payer balance goes up by
/// `amount`, receiver balance goes down) drives all matched players to
/// zero; whatever could not be matched is reported in `missing_balances`
/// with its remaining signed value. `final_bank_balance` is the bank's
/// float, invariant across settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub balances: Vec<PlayerBalance>,
    pub transactions: Vec<Transfer>,
    pub missing_balances: Vec<PlayerBalance>,
    pub final_bank_balance: i64,
}
