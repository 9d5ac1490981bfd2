use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::models::Observation;
use crate::utils::error::StoreError;

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS price_history (
    id TEXT PRIMARY KEY,
    product TEXT NOT NULL,
    title TEXT NOT NULL,
    price TEXT NOT NULL,
    timestamp TEXT NOT NULL
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_price_history_product ON price_history (product, timestamp)";

/// Read scope for [`PriceStore::history`].
#[derive(Debug, Clone, Copy)]
pub enum HistoryFilter<'a> {
    All,
    Product(&'a str),
}

/// Append-only ledger of price observations.
///
/// Single-writer discipline: only the monitor loop appends. The dashboard
/// collaborator opens the same file independently and read-only; SQLite row
/// atomicity guarantees it sees whole rows. The price column stores the
/// decimal's canonical text so external readers never depend on binary float
/// representation, and the schema only ever grows additively.
#[derive(Debug, Clone)]
pub struct PriceStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct ObservationRow {
    id: String,
    product: String,
    title: String,
    price: String,
    timestamp: DateTime<Utc>,
}

impl ObservationRow {
    fn into_observation(self) -> Result<Observation, StoreError> {
        let price = Decimal::from_str(&self.price).map_err(|e| {
            StoreError::SchemaMismatch(format!(
                "unparseable price {:?} in row {}: {}",
                self.price, self.id, e
            ))
        })?;
        Ok(Observation {
            id: self.id,
            product: self.product,
            title: self.title,
            price,
            timestamp: self.timestamp,
        })
    }
}

impl PriceStore {
    /// Opens the backing database, creating file and schema when absent.
    /// Opening an existing store is idempotent: prior rows are never touched.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(store_error)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(store_error)?;

        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(store_error)?;
        sqlx::query(CREATE_INDEX)
            .execute(&pool)
            .await
            .map_err(store_error)?;

        debug!(url = database_url, "price history opened");
        Ok(Self { pool })
    }

    /// Durably appends one observation. The insert is a single statement, so
    /// readers see either the whole row or nothing.
    pub async fn append(&self, observation: &Observation) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO price_history (id, product, title, price, timestamp)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&observation.id)
        .bind(&observation.product)
        .bind(&observation.title)
        .bind(observation.price.to_string())
        .bind(observation.timestamp)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    /// Most recent observation for a product, insertion order breaking
    /// timestamp ties.
    pub async fn latest(&self, product: &str) -> Result<Option<Observation>, StoreError> {
        let row: Option<ObservationRow> = sqlx::query_as(
            "SELECT id, product, title, price, timestamp FROM price_history
             WHERE product = ?
             ORDER BY timestamp DESC, rowid DESC
             LIMIT 1",
        )
        .bind(product)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(ObservationRow::into_observation).transpose()
    }

    /// Full or per-product history, oldest first.
    pub async fn history(&self, filter: HistoryFilter<'_>) -> Result<Vec<Observation>, StoreError> {
        let rows: Vec<ObservationRow> = match filter {
            HistoryFilter::All => {
                sqlx::query_as(
                    "SELECT id, product, title, price, timestamp FROM price_history
                     ORDER BY timestamp ASC, rowid ASC",
                )
                .fetch_all(&self.pool)
                .await
            }
            HistoryFilter::Product(product) => {
                sqlx::query_as(
                    "SELECT id, product, title, price, timestamp FROM price_history
                     WHERE product = ?
                     ORDER BY timestamp ASC, rowid ASC",
                )
                .bind(product)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(store_error)?;

        rows.into_iter().map(ObservationRow::into_observation).collect()
    }

    /// Per-product history restricted to a closed time range, oldest first.
    pub async fn history_between(
        &self,
        product: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Observation>, StoreError> {
        let rows: Vec<ObservationRow> = sqlx::query_as(
            "SELECT id, product, title, price, timestamp FROM price_history
             WHERE product = ? AND timestamp >= ? AND timestamp <= ?
             ORDER BY timestamp ASC, rowid ASC",
        )
        .bind(product)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(ObservationRow::into_observation).collect()
    }
}

fn store_error(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::TypeNotFound { .. } => StoreError::SchemaMismatch(e.to_string()),
        other => StoreError::Unwritable(other),
    }
}
