//! Ledger data models.

use crate::settlement::PlayerBalance;
use serde::{Deserialize, Serialize};

/// How money changed hands with the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Zelle,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Zelle => write!(f, "zelle"),
        }
    }
}

/// One player's money flows for the night, in whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub buy_in: i64,
    pub cash: i64,
    pub zelle: i64,
    pub cash_out: i64,
    pub payout_cash: i64,
    pub payout_zelle: i64,
}

impl PlayerRecord {
    /// Money the player handed to the bank, across both methods.
    pub fn payment_total(&self) -> i64 {
        self.cash + self.zelle
    }

    /// Money the bank paid back to the player, across both methods.
    pub fn payout_total(&self) -> i64 {
        self.payout_cash + self.payout_zelle
    }

    /// Signed net balance: positive means the table owes the player.
    pub fn net_balance(&self) -> i64 {
        -self.buy_in + self.payment_total() + self.cash_out - self.payout_total()
    }
}

/// A named player row, as serialized on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRow {
    pub name: String,
    #[serde(flatten)]
    pub record: PlayerRecord,
}

/// The table for one game: player rows in seat (insertion) order.
///
/// Insertion order matters — it feeds the settlement solver's
/// deterministic tie-breaking. Lookups scan linearly, which is fine for a
/// table of poker-night size.
#[derive(Debug, Clone, Default)]
pub struct SessionTable {
    entries: Vec<(String, PlayerRecord)>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PlayerRecord> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    /// Fetch the player's record, seating them with a blank row first if
    /// they are new to the table.
    pub fn entry(&mut self, name: &str) -> &mut PlayerRecord {
        match self.entries.iter().position(|(n, _)| n == name) {
            Some(pos) => &mut self.entries[pos].1,
            None => {
                self.entries
                    .push((name.to_string(), PlayerRecord::default()));
                let pos = self.entries.len() - 1;
                &mut self.entries[pos].1
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<PlayerRecord> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerRecord)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Wire representation: player rows in seat order.
    pub fn rows(&self) -> Vec<PlayerRow> {
        self.entries
            .iter()
            .map(|(name, record)| PlayerRow {
                name: name.clone(),
                record: *record,
            })
            .collect()
    }

    /// Signed net balances in seat order, ready for the solver.
    pub fn balances(&self) -> Vec<PlayerBalance> {
        self.entries
            .iter()
            .map(|(name, record)| PlayerBalance::new(name.clone(), record.net_balance()))
            .collect()
    }

    /// The bank's float: chips sold minus chips redeemed, adjusted for
    /// money already settled with players.
    pub fn bank_balance(&self) -> i64 {
        self.entries
            .iter()
            .map(|(_, r)| r.buy_in - r.cash_out - r.payment_total() + r.payout_total())
            .sum()
    }

    pub fn summary(&self) -> GameSummary {
        let mut summary = GameSummary::default();
        for (_, record) in &self.entries {
            summary.total_buy_in += record.buy_in;
            summary.total_cash_out += record.cash_out;
            summary.total_payment += record.payment_total();
            summary.total_payout += record.payout_total();
        }
        summary.bank_balance = self.bank_balance();
        summary
    }
}

impl FromIterator<(String, PlayerRecord)> for SessionTable {
    fn from_iter<I: IntoIterator<Item = (String, PlayerRecord)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Night-level totals across all players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub total_buy_in: i64,
    pub total_cash_out: i64,
    pub total_payment: i64,
    pub total_payout: i64,
    pub bank_balance: i64,
}

/// A rendered CSV export of every persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_seats_new_players_in_order() {
        let mut table = SessionTable::new();
        table.entry("bob").buy_in += 100;
        table.entry("alice").buy_in += 50;
        table.entry("bob").cash += 60;

        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["bob", "alice"]);
        assert_eq!(table.get("bob").unwrap().buy_in, 100);
        assert_eq!(table.get("bob").unwrap().cash, 60);
    }

    #[test]
    fn balances_and_bank_cancel_out() {
        let mut table = SessionTable::new();
        let alice = table.entry("alice");
        alice.buy_in = 100;
        alice.cash = 40;
        alice.cash_out = 80;
        let bob = table.entry("bob");
        bob.buy_in = 60;
        bob.zelle = 60;
        bob.payout_cash = 20;

        let player_sum: i64 = table.balances().iter().map(|b| b.balance).sum();
        assert_eq!(player_sum + table.bank_balance(), 0);
    }

    #[test]
    fn summary_totals_span_methods() {
        let mut table = SessionTable::new();
        let alice = table.entry("alice");
        alice.buy_in = 100;
        alice.cash = 30;
        alice.zelle = 20;
        let bob = table.entry("bob");
        bob.buy_in = 50;
        bob.cash_out = 40;
        bob.payout_zelle = 10;

        let summary = table.summary();
        assert_eq!(summary.total_buy_in, 150);
        assert_eq!(summary.total_payment, 50);
        assert_eq!(summary.total_cash_out, 40);
        assert_eq!(summary.total_payout, 10);
        assert_eq!(summary.bank_balance, 150 - 40 - 50 + 10);
    }

    #[test]
    fn payment_method_round_trips_lowercase() {
        let method: PaymentMethod = serde_json::from_str("\"zelle\"").unwrap();
        assert_eq!(method, PaymentMethod::Zelle);
        assert_eq!(method.to_string(), "zelle");
        assert!(serde_json::from_str::<PaymentMethod>("\"venmo\"").is_err());
    }
}
