pub mod server;
pub mod values;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Any failure becomes a bare 500; the cause only goes to the log / 统一错误响应
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(server::health_check))
        .route("/api/values/action", get(values::create_data))
        .route("/api/values/SyncToElastic", get(values::sync_to_elastic))
        .route(
            "/api/values/GetDataListWithElasticSearch/:value",
            get(values::get_data_list_with_elasticsearch),
        )
        .route("/api/values/GetDataListWithEF/:value", get(values::get_data_list_typed))
        .route("/api/values/GetDataWithDapper/:value", get(values::get_data_raw))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
