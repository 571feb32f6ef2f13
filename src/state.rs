use std::sync::Arc;

use crate::config::AppConfig;
use crate::search::DocumentIndex;
use crate::store::RecordRepository;

/// Shared handler state / 共享状态
pub struct AppState {
    pub records: Arc<dyn RecordRepository>,
    pub index: Arc<dyn DocumentIndex>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        records: Arc<dyn RecordRepository>,
        index: Arc<dyn DocumentIndex>,
        config: AppConfig,
    ) -> Self {
        Self { records, index, config }
    }
}
