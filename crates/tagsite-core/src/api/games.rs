//! Game catalogue endpoints, parametrized by [`Catalogue`]

use reqwest::Method;

use super::{ApiClient, ApiError, ApiResult};
use crate::catalogue::{Capability, Catalogue};
use crate::model::{DeleteAllReport, GameRecord, TagStats};
use crate::platform::Platform;

/// Server-side search criteria
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Substring of the Korean or Japanese title
    Title(String),
    /// Exact Korean tag
    Tag(String),
}

impl SearchQuery {
    fn pair(&self) -> (&'static str, &str) {
        match self {
            SearchQuery::Title(q) => ("query", q),
            SearchQuery::Tag(t) => ("tag", t),
        }
    }
}

fn require(catalogue: Catalogue, capability: Capability) -> ApiResult<()> {
    if catalogue.supports(capability) {
        Ok(())
    } else {
        Err(ApiError::Unsupported {
            catalogue,
            capability,
        })
    }
}

impl ApiClient {
    /// `GET {prefix}/{platform}`
    pub async fn list_games(
        &self,
        catalogue: Catalogue,
        platform: &Platform,
    ) -> ApiResult<Vec<GameRecord>> {
        let url = self.endpoint(&[catalogue.path_prefix(), platform.as_str()])?;
        self.send_json(self.request(Method::GET, url)).await
    }

    /// `GET {prefix}/{platform}/{code}`; `Ok(None)` on 404
    pub async fn get_game(
        &self,
        catalogue: Catalogue,
        platform: &Platform,
        code: &str,
    ) -> ApiResult<Option<GameRecord>> {
        let url = self.endpoint(&[catalogue.path_prefix(), platform.as_str(), code])?;
        match self.send_json(self.request(Method::GET, url)).await {
            Ok(game) => Ok(Some(game)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `POST {prefix}/{platform}/{code}` with the full record as body
    pub async fn save_game(
        &self,
        catalogue: Catalogue,
        platform: &Platform,
        code: &str,
        game: &GameRecord,
    ) -> ApiResult<()> {
        let url = self.endpoint(&[catalogue.path_prefix(), platform.as_str(), code])?;
        self.send(self.request(Method::POST, url).json(game)).await?;
        Ok(())
    }

    /// `DELETE {prefix}/{platform}/{code}`
    pub async fn delete_game(
        &self,
        catalogue: Catalogue,
        platform: &Platform,
        code: &str,
    ) -> ApiResult<()> {
        let url = self.endpoint(&[catalogue.path_prefix(), platform.as_str(), code])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// `DELETE {prefix}/{platform}`
    pub async fn delete_all_games(
        &self,
        catalogue: Catalogue,
        platform: &Platform,
    ) -> ApiResult<DeleteAllReport> {
        let url = self.endpoint(&[catalogue.path_prefix(), platform.as_str()])?;
        self.send_json(self.request(Method::DELETE, url)).await
    }

    /// `GET {prefix}/tag-stats?platform=`
    pub async fn tag_stats(&self, catalogue: Catalogue, platform: &Platform) -> ApiResult<TagStats> {
        require(catalogue, Capability::TagStats)?;
        let mut url = self.endpoint(&[catalogue.path_prefix(), "tag-stats"])?;
        url.query_pairs_mut()
            .append_pair("platform", platform.as_str());
        self.send_json(self.request(Method::GET, url)).await
    }

    /// `GET {prefix}/search?platform=&query=` or `...&tag=`
    pub async fn search_games(
        &self,
        catalogue: Catalogue,
        platform: &Platform,
        query: &SearchQuery,
    ) -> ApiResult<Vec<GameRecord>> {
        require(catalogue, Capability::Search)?;
        let (key, value) = query.pair();
        let mut url = self.endpoint(&[catalogue.path_prefix(), "search"])?;
        url.query_pairs_mut()
            .append_pair("platform", platform.as_str())
            .append_pair(key, value);
        self.send_json(self.request(Method::GET, url)).await
    }
}
