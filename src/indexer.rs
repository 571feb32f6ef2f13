//! Store → index sync / 数据库到索引的同步
//!
//! One-shot copy of every stored record into the search index. Upserts run
//! inside the caller's future, so dropping it cancels whatever is in flight.
//! Upserts that already succeeded are not rolled back on failure.

use anyhow::Result;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

use crate::config::{IndexStrategy, IndexerConfig};
use crate::search::DocumentIndex;
use crate::store::RecordRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub indexed: usize,
}

pub struct Indexer {
    records: Arc<dyn RecordRepository>,
    index: Arc<dyn DocumentIndex>,
    config: IndexerConfig,
}

impl Indexer {
    pub fn new(
        records: Arc<dyn RecordRepository>,
        index: Arc<dyn DocumentIndex>,
        config: IndexerConfig,
    ) -> Self {
        Self { records, index, config }
    }

    pub async fn sync(&self) -> Result<SyncReport> {
        let travels = self.records.list_all().await?;
        tracing::info!(
            "Indexing {} travels ({:?})",
            travels.len(),
            self.config.strategy
        );

        match self.config.strategy {
            IndexStrategy::PerDocument => {
                stream::iter(travels.iter().cloned().map(|travel| {
                    let index = self.index.clone();
                    async move { index.upsert(&travel).await }
                }))
                .buffer_unordered(self.config.concurrency.max(1))
                .try_collect::<()>()
                .await?;
            }
            IndexStrategy::Bulk => {
                for chunk in travels.chunks(self.config.bulk_chunk_size.max(1)) {
                    self.index.upsert_bulk(chunk).await?;
                }
            }
        }

        tracing::info!("Index sync finished: {} documents", travels.len());
        Ok(SyncReport {
            indexed: travels.len(),
        })
    }
}
