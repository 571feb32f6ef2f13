use serde::{Deserialize, Serialize};

/// A stored travel record / 旅行记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// A record that has not been assigned an id yet / 待插入的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTravel {
    pub title: String,
    pub description: String,
}
