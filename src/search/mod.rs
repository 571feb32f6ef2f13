//! Search index module / 搜索索引模块
//!
//! - `DocumentIndex` is the only surface the rest of the service sees
//! - `ElasticClient` speaks the Elasticsearch REST API over reqwest
//! - Documents are keyed by the record id, so re-indexing is an upsert

pub mod document;
pub mod elastic;
#[cfg(test)]
pub(crate) mod memory;

pub use document::TravelDocument;
pub use elastic::ElasticClient;

use async_trait::async_trait;

use crate::models::Travel;

/// Search index errors / 搜索索引错误
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("index returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid JSON in index response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed index response: {0}")]
    Malformed(String),
    #[error("bulk request rejected: {0}")]
    Bulk(String),
    #[error("invalid index url: {0}")]
    Url(#[from] url::ParseError),
}

#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Insert or replace the document keyed by `travel.id`
    async fn upsert(&self, travel: &Travel) -> Result<(), IndexError>;

    /// Upsert a batch through the native bulk endpoint
    async fn upsert_bulk(&self, travels: &[Travel]) -> Result<(), IndexError>;

    /// Wildcard match of `*value*` against the description field
    async fn search_description(&self, value: &str) -> Result<Vec<Travel>, IndexError>;
}
