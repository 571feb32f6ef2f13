//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Global configuration instance / 全局配置实例
static CONFIG: OnceCell<Arc<RwLock<AppConfig>>> = OnceCell::new();

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    pub server: ServerConfig,
    /// Database configuration / 数据库配置
    pub database: DatabaseConfig,
    /// Elasticsearch configuration / 搜索引擎配置
    pub elasticsearch: ElasticsearchConfig,
    /// Index sync configuration / 索引同步配置
    pub indexer: IndexerConfig,
    /// Sample data configuration / 样本数据配置
    pub generator: GeneratorConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Database configuration / 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL / 数据库连接地址
    pub url: String,
    /// Pool size / 连接池大小
    pub max_connections: u32,
}

/// Elasticsearch configuration / 搜索引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    /// Base URL of the cluster / 集群地址
    pub url: String,
    /// Index holding the travel documents / 索引名称
    pub index: String,
    /// HTTP client timeout in seconds / 请求超时（秒）
    pub timeout_secs: u64,
    /// Explicit `size` for search requests, server default when unset
    pub search_size: Option<u32>,
}

/// How the indexer pushes documents / 索引写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStrategy {
    /// One upsert request per record / 逐条写入
    PerDocument,
    /// Native `_bulk` endpoint / 批量写入
    Bulk,
}

/// Index sync configuration / 索引同步配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    pub strategy: IndexStrategy,
    /// Max in-flight upserts for `per_document` / 最大并发数
    pub concurrency: usize,
    /// Actions per `_bulk` request / 每批文档数
    pub bulk_chunk_size: usize,
}

/// Sample data configuration / 样本数据配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Records created per invocation / 每次生成的记录数
    pub batch_size: usize,
    /// Letters per word (titles are a single word) / 单词长度
    pub word_length: usize,
    /// Words per description / 描述中的单词数
    pub words_per_description: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/travels.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            index: "travels".to_string(),
            timeout_secs: 30,
            search_size: None,
        }
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            strategy: IndexStrategy::PerDocument,
            concurrency: 64,
            bulk_chunk_size: 1000,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            batch_size: 5000,
            word_length: 5,
            words_per_description: 50,
        }
    }
}

impl AppConfig {
    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply `DATABASE_URL` / `ELASTICSEARCH_URL` from the environment / 环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        self.override_urls(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("ELASTICSEARCH_URL").ok(),
        );
    }

    fn override_urls(&mut self, database_url: Option<String>, elasticsearch_url: Option<String>) {
        if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(url) = elasticsearch_url.filter(|u| !u.trim().is_empty()) {
            self.elasticsearch.url = url;
        }
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    let config_path = get_config_path();

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config(&config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config: &AppConfig) -> Result<(), String> {
    let config_path = get_config_path();

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Initialize global configuration (file + environment) / 初始化全局配置
pub fn init_config() -> Result<Arc<RwLock<AppConfig>>, String> {
    let mut config = load_config()?;
    config.apply_env_overrides();

    let config_arc = Arc::new(RwLock::new(config));

    CONFIG
        .set(config_arc.clone())
        .map_err(|_| "Config already initialized".to_string())?;

    Ok(config_arc)
}

/// Get a read-only snapshot of current config / 获取当前配置的只读快照
pub fn config() -> Result<AppConfig, String> {
    CONFIG
        .get()
        .map(|config| config.read().clone())
        .ok_or_else(|| "Config not initialized".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.elasticsearch.url, "http://localhost:9200");
        assert_eq!(config.elasticsearch.index, "travels");
        assert_eq!(config.generator.batch_size, 5000);
        assert_eq!(config.generator.word_length, 5);
        assert_eq!(config.generator.words_per_description, 50);
        assert_eq!(config.indexer.strategy, IndexStrategy::PerDocument);
        assert_eq!(config.get_bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"server": {"port": 8080}, "indexer": {"strategy": "bulk"}}"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.indexer.strategy, IndexStrategy::Bulk);
        assert_eq!(config.indexer.concurrency, 64);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.override_urls(Some("sqlite::memory:".to_string()), Some("  ".to_string()));
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.elasticsearch.url, "http://localhost:9200");

        config.override_urls(None, Some("http://es:9200".to_string()));
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.elasticsearch.url, "http://es:9200");
    }

    #[test]
    fn test_snapshot_requires_init() {
        assert_eq!(config().unwrap_err(), "Config not initialized");
    }
}
