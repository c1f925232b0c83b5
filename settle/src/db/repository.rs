//! Records repository: all SQL for the per-game ledger rows.

use crate::ledger::models::{PlayerRecord, SessionTable};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use std::sync::Arc;

/// A persisted ledger row, as stored: one player on one game date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub date: String,
    pub name: String,
    pub record: PlayerRecord,
}

/// Repository for the `records` table.
///
/// Each row is one player's totals for one game date; `(date, name)` is
/// unique so saves are upserts. Row ids preserve seat order across
/// reloads.
#[derive(Clone)]
pub struct RecordRepository {
    pool: Arc<SqlitePool>,
}

impl RecordRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Create the `records` table and its unique index if missing.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                buy_in INTEGER NOT NULL DEFAULT 0,
                cash INTEGER NOT NULL DEFAULT 0,
                zelle INTEGER NOT NULL DEFAULT 0,
                cash_out INTEGER NOT NULL DEFAULT 0,
                payout_cash INTEGER NOT NULL DEFAULT 0,
                payout_zelle INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_records_date_name
            ON records(date, name)
            "#,
        )
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    /// Load one date's table in seat order.
    pub async fn load(&self, date: &str) -> Result<SessionTable, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT name, buy_in, cash, zelle, cash_out, payout_cash, payout_zelle
              FROM records
             WHERE date = ?
             ORDER BY id
            "#,
        )
        .bind(date)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get::<String, _>("name"), player_record(&row)))
            .collect())
    }

    /// Insert or update one player's row for a date.
    pub async fn upsert(
        &self,
        date: &str,
        name: &str,
        record: &PlayerRecord,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO records
                (date, name, buy_in, cash, zelle, cash_out, payout_cash, payout_zelle)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(date, name) DO UPDATE SET
                buy_in = excluded.buy_in,
                cash = excluded.cash,
                zelle = excluded.zelle,
                cash_out = excluded.cash_out,
                payout_cash = excluded.payout_cash,
                payout_zelle = excluded.payout_zelle
            "#,
        )
        .bind(date)
        .bind(name)
        .bind(record.buy_in)
        .bind(record.cash)
        .bind(record.zelle)
        .bind(record.cash_out)
        .bind(record.payout_cash)
        .bind(record.payout_zelle)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    /// Persist a whole table for a date in one transaction.
    pub async fn upsert_all(&self, date: &str, table: &SessionTable) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for (name, record) in table.iter() {
            sqlx::query(
                r#"
                INSERT INTO records
                    (date, name, buy_in, cash, zelle, cash_out, payout_cash, payout_zelle)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(date, name) DO UPDATE SET
                    buy_in = excluded.buy_in,
                    cash = excluded.cash,
                    zelle = excluded.zelle,
                    cash_out = excluded.cash_out,
                    payout_cash = excluded.payout_cash,
                    payout_zelle = excluded.payout_zelle
                "#,
            )
            .bind(date)
            .bind(name)
            .bind(record.buy_in)
            .bind(record.cash)
            .bind(record.zelle)
            .bind(record.cash_out)
            .bind(record.payout_cash)
            .bind(record.payout_zelle)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Delete one player's row for a date.
    pub async fn delete(&self, date: &str, name: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM records WHERE date = ? AND name = ?")
            .bind(date)
            .bind(name)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    /// Every persisted row across all dates, oldest first.
    pub async fn export_all(&self) -> Result<Vec<StoredRecord>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT date, name, buy_in, cash, zelle, cash_out, payout_cash, payout_zelle
              FROM records
             ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| StoredRecord {
                date: row.get("date"),
                name: row.get("name"),
                record: player_record(&row),
            })
            .collect())
    }
}

fn player_record(row: &SqliteRow) -> PlayerRecord {
    PlayerRecord {
        buy_in: row.get("buy_in"),
        cash: row.get("cash"),
        zelle: row.get("zelle"),
        cash_out: row.get("cash_out"),
        payout_cash: row.get("payout_cash"),
        payout_zelle: row.get("payout_zelle"),
    }
}
