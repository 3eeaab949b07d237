use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
    pub id: i64,
    pub section: String,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Row id touched by an upsert and how many rows it changed (0 or 1).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: i64,
    pub changes: u64,
}

/// What a call to `ContentStore::initialize` actually wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub bootstrap_created: bool,
    pub content_seeded: u64,
}
