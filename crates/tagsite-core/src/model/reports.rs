//! Small acknowledgement payloads returned by mutating endpoints

use serde::Deserialize;

use super::de::null_as_default;

/// `POST /tags/sync-tags`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SyncReport {
    #[serde(default)]
    pub updated: u64,
}

/// `DELETE {prefix}/{platform}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteAllReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// `POST /tags/delete-slash`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PurgeReport {
    #[serde(default)]
    pub deleted: u64,
}
