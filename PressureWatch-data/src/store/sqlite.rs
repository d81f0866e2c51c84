use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use super::errors::StoreError;
use super::HealthStore;
use crate::database::{create_sqlite_pool, DatabaseConfig, SqlitePool};
use crate::models::{CorrelatedSample, QuantityCategory, QuantitySample};

/// Health store persisted in SQLite.
///
/// rusqlite is blocking, so every statement runs on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteHealthStore {
    pool: SqlitePool,
}

/// Raw row shape of `quantity_samples`
type SampleRow = (String, String, f64, i64, i64);

impl SqliteHealthStore {
    /// Wrap an already migrated pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration and wrap it
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        Ok(Self::new(create_sqlite_pool(config)?))
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }
}

fn to_micros(at: &DateTime<Utc>) -> i64 {
    at.timestamp_micros()
}

fn from_micros(micros: i64) -> Result<DateTime<Utc>, StoreError> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| StoreError::InvalidSample(format!("timestamp out of range: {}", micros)))
}

fn sample_from_row(row: SampleRow) -> Result<QuantitySample, StoreError> {
    let (id, category, value_mmhg, start_us, end_us) = row;

    Ok(QuantitySample {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::InvalidSample(e.to_string()))?,
        category: category.parse().map_err(StoreError::InvalidSample)?,
        value_mmhg,
        start: from_micros(start_us)?,
        end: from_micros(end_us)?,
    })
}

#[async_trait]
impl HealthStore for SqliteHealthStore {
    async fn request_authorization(
        &self,
        _share: &[QuantityCategory],
        _read: &[QuantityCategory],
    ) -> Result<(), StoreError> {
        // A local database has no permission model
        Ok(())
    }

    async fn query_most_recent(
        &self,
        category: QuantityCategory,
    ) -> Result<Option<QuantitySample>, StoreError> {
        debug!("Querying most recent {} sample from database", category);

        let row = self
            .with_connection(move |conn| {
                let row: Option<SampleRow> = conn
                    .query_row(
                        "SELECT id, category, value_mmhg, start_us, end_us
                         FROM quantity_samples
                         WHERE category = ?1
                         ORDER BY start_us DESC, end_us DESC, seq DESC
                         LIMIT 1",
                        [category.as_str()],
                        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
                    )
                    .optional()?;
                Ok(row)
            })
            .await?;

        row.map(sample_from_row).transpose()
    }

    async fn save_correlation(&self, correlation: CorrelatedSample) -> Result<(), StoreError> {
        debug!("Storing correlation in database: id={}", correlation.id);

        self.with_connection(move |conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO correlations (id, kind, start_us, end_us) VALUES (?1, ?2, ?3, ?4)",
                (
                    correlation.id.to_string(),
                    correlation.kind.as_str(),
                    to_micros(&correlation.start),
                    to_micros(&correlation.end),
                ),
            )?;

            for sample in &correlation.samples {
                tx.execute(
                    "INSERT INTO quantity_samples
                     (id, correlation_id, category, value_mmhg, start_us, end_us)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    (
                        sample.id.to_string(),
                        correlation.id.to_string(),
                        sample.category.as_str(),
                        sample.value_mmhg,
                        to_micros(&sample.start),
                        to_micros(&sample.end),
                    ),
                )?;
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }
}
