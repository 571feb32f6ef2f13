//! Index document layout, query bodies and response parsing / 索引文档与查询

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::IndexError;
use crate::models::Travel;

/// Field the wildcard query targets
pub const DESCRIPTION_FIELD: &str = "Description";

/// Stored `_source` of one travel / 索引文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDocument {
    #[serde(rename = "Id", alias = "id")]
    pub id: i64,
    #[serde(rename = "Title", alias = "title")]
    pub title: String,
    #[serde(rename = "Description", alias = "description")]
    pub description: String,
}

impl From<&Travel> for TravelDocument {
    fn from(travel: &Travel) -> Self {
        Self {
            id: travel.id,
            title: travel.title.clone(),
            description: travel.description.clone(),
        }
    }
}

impl From<TravelDocument> for Travel {
    fn from(doc: TravelDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
        }
    }
}

/// `{"query":{"wildcard":{"Description":{"value":"*v*"}}}}`, value passed through unescaped
pub fn wildcard_query(value: &str, size: Option<u32>) -> Value {
    let mut body = json!({
        "query": {
            "wildcard": {
                DESCRIPTION_FIELD: { "value": format!("*{}*", value) }
            }
        }
    });
    if let Some(size) = size {
        body["size"] = json!(size);
    }
    body
}

/// Rebuild one travel per `hits.hits[*]._source`
pub fn parse_hits(body: &Value) -> Result<Vec<Travel>, IndexError> {
    let hits = body
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(|h| h.as_array())
        .ok_or_else(|| IndexError::Malformed("missing hits.hits".to_string()))?;

    hits.iter()
        .map(|hit| {
            let source = hit
                .get("_source")
                .cloned()
                .ok_or_else(|| IndexError::Malformed("hit without _source".to_string()))?;
            let doc: TravelDocument = serde_json::from_value(source)?;
            Ok(doc.into())
        })
        .collect()
}

/// NDJSON body for `_bulk`: one `index` action line plus one source line per travel
pub fn bulk_body(index: &str, travels: &[Travel]) -> Result<String, IndexError> {
    let mut body = String::new();
    for travel in travels {
        let action = json!({ "index": { "_index": index, "_id": travel.id.to_string() } });
        body.push_str(&serde_json::to_string(&action)?);
        body.push('\n');
        body.push_str(&serde_json::to_string(&TravelDocument::from(travel))?);
        body.push('\n');
    }
    Ok(body)
}

/// First item error of a `_bulk` response that reports `"errors": true`
pub fn bulk_failure(body: &Value) -> Option<String> {
    if !body.get("errors").and_then(Value::as_bool).unwrap_or(false) {
        return None;
    }

    let first = body
        .get("items")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.as_object()?.values().next())
        .find_map(|result| {
            let error = result.get("error")?;
            let id = result.get("_id").and_then(Value::as_str).unwrap_or("?");
            let reason = error
                .get("reason")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            Some(format!("document {}: {}", id, reason))
        });

    Some(first.unwrap_or_else(|| "bulk response reported errors".to_string()))
}
