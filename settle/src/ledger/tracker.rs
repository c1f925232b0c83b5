//! Ledger tracker: session state plus persistence.

use super::{
    errors::{LedgerError, LedgerResult},
    models::{CsvExport, GameSummary, PaymentMethod, PlayerRecord, SessionTable},
};
use crate::db::RecordRepository;
use crate::settlement::{self, Settlement};
use log::info;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The active session: one game date and its table.
#[derive(Debug, Default)]
struct SessionState {
    current_date: Option<String>,
    table: SessionTable,
}

/// Tracks one poker night at a time.
///
/// All mutations require an active game (started with [`start_game`]) and
/// are persisted immediately, so the process can die at any point without
/// losing a recorded action. Re-starting the same date reloads its table.
///
/// The tracker is safe to share behind an `Arc`: session state lives in an
/// async `RwLock` and every method takes `&self`.
///
/// [`start_game`]: LedgerTracker::start_game
pub struct LedgerTracker {
    repo: RecordRepository,
    state: RwLock<SessionState>,
}

impl LedgerTracker {
    /// Create a new tracker with no active game.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            repo: RecordRepository::new(pool),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Create the backing schema if missing.
    pub async fn init_schema(&self) -> LedgerResult<()> {
        self.repo.init_schema().await?;
        Ok(())
    }

    /// Start (or resume) the game for `date`, loading its saved table.
    ///
    /// Any previously active game is saved first.
    pub async fn start_game(&self, date: &str) -> LedgerResult<String> {
        let date = validate_date(date)?;

        let mut state = self.state.write().await;
        if let Some(previous) = &state.current_date {
            self.repo.upsert_all(previous, &state.table).await?;
        }

        state.table = self.repo.load(&date).await?;
        info!("loaded {} player(s) for {date}", state.table.len());
        state.current_date = Some(date.clone());

        Ok(date)
    }

    /// The active date (if any) and a snapshot of its table.
    pub async fn current_game(&self) -> (Option<String>, SessionTable) {
        let state = self.state.read().await;
        (state.current_date.clone(), state.table.clone())
    }

    /// Record a chip purchase, seating the player on their first buy-in.
    pub async fn buy_in(&self, name: &str, amount: i64) -> LedgerResult<SessionTable> {
        let name = validate_name(name)?;
        let amount = validate_amount(amount)?;

        let mut state = self.state.write().await;
        let date = active_date(&state)?;
        let entry = state.table.entry(&name);
        entry.buy_in += amount;
        let record = *entry;

        self.repo.upsert(&date, &name, &record).await?;
        Ok(state.table.clone())
    }

    /// Record money the player handed to the bank.
    pub async fn payment(
        &self,
        name: &str,
        amount: i64,
        method: PaymentMethod,
    ) -> LedgerResult<SessionTable> {
        self.update_player(name, amount, |record, amount| match method {
            PaymentMethod::Cash => record.cash += amount,
            PaymentMethod::Zelle => record.zelle += amount,
        })
        .await
    }

    /// Record chips the player redeemed at the end of play.
    pub async fn cash_out(&self, name: &str, amount: i64) -> LedgerResult<SessionTable> {
        self.update_player(name, amount, |record, amount| record.cash_out += amount)
            .await
    }

    /// Record money the bank paid back to the player.
    pub async fn pay_out(
        &self,
        name: &str,
        amount: i64,
        method: PaymentMethod,
    ) -> LedgerResult<SessionTable> {
        self.update_player(name, amount, |record, amount| match method {
            PaymentMethod::Cash => record.payout_cash += amount,
            PaymentMethod::Zelle => record.payout_zelle += amount,
        })
        .await
    }

    /// Remove a player from the table and from storage.
    pub async fn remove_player(&self, name: &str) -> LedgerResult<SessionTable> {
        let name = validate_name(name)?;

        let mut state = self.state.write().await;
        let date = active_date(&state)?;
        ensure_bought_in(&state.table, &name)?;

        state.table.remove(&name);
        self.repo.delete(&date, &name).await?;
        info!("removed '{name}' from the {date} table");
        Ok(state.table.clone())
    }

    /// Night-level totals. Errors when nobody has bought in yet.
    pub async fn summary(&self) -> LedgerResult<GameSummary> {
        let state = self.state.read().await;
        if state.table.is_empty() {
            return Err(LedgerError::NoData);
        }
        Ok(state.table.summary())
    }

    /// Derive balances from the table and run the settlement solver.
    pub async fn solve(&self) -> LedgerResult<Settlement> {
        let state = self.state.read().await;
        if state.table.is_empty() {
            return Err(LedgerError::NoData);
        }
        let balances = state.table.balances();
        let bank_balance = state.table.bank_balance();
        Ok(settlement::solve(&balances, bank_balance))
    }

    /// Read another date's saved table without touching the active game.
    pub async fn history(&self, date: &str) -> LedgerResult<SessionTable> {
        let date = validate_date(date)?;
        Ok(self.repo.load(&date).await?)
    }

    /// Persist the active table. Returns the saved date.
    pub async fn save(&self) -> LedgerResult<String> {
        let state = self.state.read().await;
        let date = active_date(&state)?;
        self.repo.upsert_all(&date, &state.table).await?;
        info!("{date} game saved");
        Ok(date)
    }

    /// Save the active table, then detach from it. Returns the cleared date.
    pub async fn clear(&self) -> LedgerResult<String> {
        let mut state = self.state.write().await;
        let date = active_date(&state)?;
        self.repo.upsert_all(&date, &state.table).await?;

        state.table.clear();
        state.current_date = None;
        info!("{date} game saved and cleared");
        Ok(date)
    }

    /// Render every persisted record as CSV, named after the active date.
    pub async fn export_csv(&self) -> LedgerResult<CsvExport> {
        let date = {
            let state = self.state.read().await;
            active_date(&state)?
        };

        let records = self.repo.export_all().await?;
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "date",
            "name",
            "buy_in",
            "cash",
            "zelle",
            "cash_out",
            "payout_cash",
            "payout_zelle",
        ])?;
        for stored in &records {
            writer.write_record([
                stored.date.clone(),
                stored.name.clone(),
                stored.record.buy_in.to_string(),
                stored.record.cash.to_string(),
                stored.record.zelle.to_string(),
                stored.record.cash_out.to_string(),
                stored.record.payout_cash.to_string(),
                stored.record.payout_zelle.to_string(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| LedgerError::Export(e.into_error().into()))?;

        Ok(CsvExport {
            filename: format!("{}.csv", date.replace('/', "_")),
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Shared path for the bought-in-only mutations.
    async fn update_player<F>(&self, name: &str, amount: i64, apply: F) -> LedgerResult<SessionTable>
    where
        F: FnOnce(&mut PlayerRecord, i64),
    {
        let name = validate_name(name)?;
        let amount = validate_amount(amount)?;

        let mut state = self.state.write().await;
        let date = active_date(&state)?;
        let record = match state.table.get_mut(&name) {
            Some(record) if record.buy_in != 0 => record,
            _ => return Err(LedgerError::NotBoughtIn(name)),
        };
        apply(record, amount);
        let record = *record;

        self.repo.upsert(&date, &name, &record).await?;
        Ok(state.table.clone())
    }
}

fn active_date(state: &SessionState) -> LedgerResult<String> {
    state
        .current_date
        .clone()
        .ok_or(LedgerError::NoActiveGame)
}

fn ensure_bought_in(table: &SessionTable, name: &str) -> LedgerResult<()> {
    match table.get(name) {
        Some(record) if record.buy_in != 0 => Ok(()),
        _ => Err(LedgerError::NotBoughtIn(name.to_string())),
    }
}

fn validate_name(name: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingName);
    }
    Ok(trimmed.to_string())
}

fn validate_date(date: &str) -> LedgerResult<String> {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingDate);
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: i64) -> LedgerResult<i64> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(amount)
}
