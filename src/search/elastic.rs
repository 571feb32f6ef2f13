//! Elasticsearch REST client / Elasticsearch 客户端

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::document::{self, TravelDocument};
use super::{DocumentIndex, IndexError};
use crate::config::ElasticsearchConfig;
use crate::models::Travel;

#[derive(Clone)]
pub struct ElasticClient {
    http: Client,
    base_url: String,
    index: String,
    search_size: Option<u32>,
}

impl ElasticClient {
    pub fn new(config: &ElasticsearchConfig) -> Result<Self, IndexError> {
        let base = Url::parse(&config.url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            index: config.index.clone(),
            search_size: config.search_size,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index
    }

    fn doc_url(&self, id: i64) -> String {
        format!("{}/{}/_doc/{}", self.base_url, self.index, id)
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.base_url, self.index)
    }

    fn bulk_url(&self) -> String {
        format!("{}/_bulk", self.base_url)
    }

    /// Fail on non-2xx, keeping the response body for the error / 检查响应状态
    async fn check(response: Response) -> Result<Response, IndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(IndexError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DocumentIndex for ElasticClient {
    async fn upsert(&self, travel: &Travel) -> Result<(), IndexError> {
        let response = self
            .http
            .put(self.doc_url(travel.id))
            .json(&TravelDocument::from(travel))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn upsert_bulk(&self, travels: &[Travel]) -> Result<(), IndexError> {
        if travels.is_empty() {
            return Ok(());
        }

        let body = document::bulk_body(&self.index, travels)?;
        let response = self
            .http
            .post(self.bulk_url())
            .header(header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await?;
        let result: Value = Self::check(response).await?.json().await?;

        match document::bulk_failure(&result) {
            Some(reason) => Err(IndexError::Bulk(reason)),
            None => Ok(()),
        }
    }

    async fn search_description(&self, value: &str) -> Result<Vec<Travel>, IndexError> {
        let query = document::wildcard_query(value, self.search_size);
        let response = self.http.post(self.search_url()).json(&query).send().await?;
        let text = Self::check(response).await?.text().await?;

        let body: Value = serde_json::from_str(&text)?;
        let travels = document::parse_hits(&body)?;
        tracing::debug!("Index search {:?}: {} hits", value, travels.len());
        Ok(travels)
    }
}
