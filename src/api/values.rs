//! `/api/values/*` handlers
//!
//! Each handler is a straight pass-through: generate, sync, or one of the
//! three read paths. A client disconnect drops the handler future, which
//! aborts the store query or index request in flight.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::generator;
use crate::indexer::Indexer;
use crate::models::Travel;
use crate::state::AppState;

/// GET /api/values/action - 生成随机数据
pub async fn create_data(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    generator::populate(state.records.as_ref(), &state.config.generator).await?;
    Ok(StatusCode::OK)
}

/// GET /api/values/SyncToElastic - 同步到索引
pub async fn sync_to_elastic(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    let indexer = Indexer::new(
        state.records.clone(),
        state.index.clone(),
        state.config.indexer.clone(),
    );
    indexer.sync().await?;
    Ok(StatusCode::OK)
}

/// GET /api/values/GetDataListWithElasticSearch/:value
pub async fn get_data_list_with_elasticsearch(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<Json<Vec<Travel>>, ApiError> {
    let travels = state.index.search_description(&value).await?;
    Ok(Json(travels))
}

/// GET /api/values/GetDataListWithEF/:value
pub async fn get_data_list_typed(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<Json<Vec<Travel>>, ApiError> {
    let travels = state.records.search_typed(&value).await?;
    Ok(Json(travels))
}

/// GET /api/values/GetDataWithDapper/:value
pub async fn get_data_raw(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<Json<Vec<Travel>>, ApiError> {
    let travels = state.records.search_raw(&value).await?;
    Ok(Json(travels))
}
