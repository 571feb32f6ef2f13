use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travels_api::config;
use travels_api::db;
use travels_api::search::ElasticClient;
use travels_api::state::AppState;
use travels_api::store::SqliteRecordRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travels_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration / 加载配置
    config::init_config().map_err(anyhow::Error::msg)?;
    let app_config = config::config().map_err(anyhow::Error::msg)?;
    tracing::info!("Server will listen on {}:{}", app_config.server.host, app_config.server.port);

    let pool = db::connect(&app_config.database).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database ready: {}", app_config.database.url);

    let index = ElasticClient::new(&app_config.elasticsearch)?;
    tracing::info!(
        "Search index: {} at {}",
        index.index_name(),
        app_config.elasticsearch.url
    );

    let bind_addr = app_config.get_bind_address();
    let state = Arc::new(AppState::new(
        Arc::new(SqliteRecordRepository::new(pool)),
        Arc::new(index),
        app_config,
    ));

    let app = travels_api::api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
