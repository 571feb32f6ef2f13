//! In-process `DocumentIndex` used by tests

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DocumentIndex, IndexError, TravelDocument};
use crate::models::Travel;

#[derive(Default)]
pub struct MemoryIndex {
    docs: RwLock<BTreeMap<i64, TravelDocument>>,
    /// Fail upserts once this many have succeeded
    fail_after: Option<usize>,
    /// Fail every request, searches included
    offline: bool,
    upserts: AtomicUsize,
    bulk_calls: AtomicUsize,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(upserts: usize) -> Self {
        Self {
            fail_after: Some(upserts),
            ..Self::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn get(&self, id: i64) -> Option<TravelDocument> {
        self.docs.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    fn store(&self, travel: &Travel) -> Result<(), IndexError> {
        if self.offline {
            return Err(IndexError::Malformed("index offline".to_string()));
        }
        let done = self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| done >= limit) {
            return Err(IndexError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.docs.write().insert(travel.id, TravelDocument::from(travel));
        Ok(())
    }
}

#[async_trait]
impl DocumentIndex for MemoryIndex {
    async fn upsert(&self, travel: &Travel) -> Result<(), IndexError> {
        self.store(travel)
    }

    async fn upsert_bulk(&self, travels: &[Travel]) -> Result<(), IndexError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        travels.iter().try_for_each(|travel| self.store(travel))
    }

    async fn search_description(&self, value: &str) -> Result<Vec<Travel>, IndexError> {
        if self.offline {
            return Err(IndexError::Malformed("index offline".to_string()));
        }
        Ok(self
            .docs
            .read()
            .values()
            .filter(|doc| doc.description.contains(value))
            .cloned()
            .map(Travel::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn travel(id: i64, description: &str) -> Travel {
        Travel {
            id,
            title: "abcde".to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_limit_leaves_search_working() {
        let index = MemoryIndex::failing_after(1);
        index.upsert(&travel(1, "hello world")).await.unwrap();
        assert!(index.upsert(&travel(2, "world peace")).await.is_err());

        let found = index.search_description("world").await.unwrap();
        assert_eq!(found, vec![travel(1, "hello world")]);
    }

    #[tokio::test]
    async fn test_offline_rejects_everything() {
        let index = MemoryIndex::offline();
        assert!(index.upsert(&travel(1, "hello")).await.is_err());
        assert!(index.upsert_bulk(&[travel(2, "world")]).await.is_err());
        assert!(index.search_description("hello").await.is_err());
        assert_eq!(index.len(), 0);
    }
}
