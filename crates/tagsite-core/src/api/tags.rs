//! Tag translation table endpoints

use reqwest::Method;

use super::{ApiClient, ApiResult};
use crate::model::{PurgeReport, SyncReport, Tag};

impl ApiClient {
    /// `GET /tags/`
    pub async fn list_tags(&self) -> ApiResult<Vec<Tag>> {
        let url = self.endpoint(&["tags", ""])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// `POST /tags/` with the full tag as body
    pub async fn upsert_tag(&self, tag: &Tag) -> ApiResult<()> {
        let url = self.endpoint(&["tags", ""])?;
        self.send(self.request(Method::POST, url).json(tag)).await?;
        Ok(())
    }

    /// `POST /tags/sync-tags` - re-derive Korean tags on every game document
    pub async fn sync_tags(&self) -> ApiResult<SyncReport> {
        let url = self.endpoint(&["tags", "sync-tags"])?;
        self.send_json(self.request(Method::POST, url).json(&serde_json::json!({})))
            .await
    }

    /// `POST /tags/delete-slash` - drop mappings containing `/` on either side
    pub async fn purge_slash_tags(&self) -> ApiResult<PurgeReport> {
        let url = self.endpoint(&["tags", "delete-slash"])?;
        self.send_json(self.request(Method::POST, url).json(&serde_json::json!({})))
            .await
    }
}
