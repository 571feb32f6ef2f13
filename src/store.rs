//! Record store / 记录存储
//!
//! `RecordRepository` is the narrow interface the handlers and the indexer see.
//! The SQLite implementation offers two read paths over the same `LIKE`
//! predicate: a typed one (`QueryBuilder` + `FromRow`) and a raw one
//! (literal SQL with rows mapped by hand).

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::models::{NewTravel, Travel};

/// Rows per INSERT statement, keeps binds under SQLite's variable limit
const INSERT_CHUNK_ROWS: usize = 500;

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Insert all records in one transaction, returns rows written
    async fn insert_batch(&self, travels: &[NewTravel]) -> Result<u64>;

    /// Every stored record, unpaginated
    async fn list_all(&self) -> Result<Vec<Travel>>;

    /// Description substring filter through the typed query layer
    async fn search_typed(&self, value: &str) -> Result<Vec<Travel>>;

    /// Description substring filter through a raw parameterized query
    async fn search_raw(&self, value: &str) -> Result<Vec<Travel>>;
}

pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for SqliteRecordRepository {
    async fn insert_batch(&self, travels: &[NewTravel]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for chunk in travels.chunks(INSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("INSERT INTO travels (title, description) ");
            builder.push_values(chunk, |mut row, travel| {
                row.push_bind(travel.title.as_str())
                    .push_bind(travel.description.as_str());
            });
            written += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        tracing::info!("Inserted {} travels", written);
        Ok(written)
    }

    async fn list_all(&self) -> Result<Vec<Travel>> {
        let travels = sqlx::query_as::<_, Travel>(
            "SELECT id, title, description FROM travels ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(travels)
    }

    async fn search_typed(&self, value: &str) -> Result<Vec<Travel>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, title, description FROM travels WHERE description LIKE '%' || ");
        builder.push_bind(value).push(" || '%'");

        let travels = builder
            .build_query_as::<Travel>()
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!("Typed search {:?}: {} rows", value, travels.len());
        Ok(travels)
    }

    async fn search_raw(&self, value: &str) -> Result<Vec<Travel>> {
        let rows = sqlx::query("SELECT * FROM travels WHERE description LIKE ?")
            .bind(format!("%{}%", value))
            .fetch_all(&self.pool)
            .await?;

        let travels = rows
            .iter()
            .map(|row| {
                Ok(Travel {
                    id: row.try_get("id")?,
                    title: row.try_get("title")?,
                    description: row.try_get("description")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        tracing::debug!("Raw search {:?}: {} rows", value, travels.len());
        Ok(travels)
    }
}
