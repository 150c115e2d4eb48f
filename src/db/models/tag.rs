use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag a folder may point at. Tags are owned elsewhere; folders only hold
/// the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub tag_id: i64,
    pub tag_name: String,
    pub created_at: DateTime<Utc>,
}
