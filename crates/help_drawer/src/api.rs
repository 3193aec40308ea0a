// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Help content: what the drawer asks for and the REST client answering it

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::HelpConfig;

/// A help article as delivered by the content API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub href: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("content API responded with status {0}")]
    Status(u16),
}

/// Source of help articles and search results.
///
/// Futures are not `Send`: everything runs on the page's single thread.
#[cfg_attr(test, mockall::automock)]
#[async_trait(?Send)]
pub trait ContentProvider {
    async fn fetch_article_by_resource_id(&self, resource_id: &str) -> Result<Article, ContentError>;

    async fn fetch_article_by_path(&self, path: &str) -> Result<Article, ContentError>;

    async fn search(&self, query: &str) -> Result<SearchResults, ContentError>;
}

/// Client for the deployment content API.
pub struct HerettoApi {
    client: reqwest::Client,
    base: String,
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery<'a> {
    query_string: &'a str,
}

impl HerettoApi {
    pub fn new(config: &HelpConfig) -> Self {
        HerettoApi {
            client: reqwest::Client::new(),
            base: format!(
                "{}/{}/deployments/{}",
                config.api_url.trim_end_matches('/'),
                config.api_org_id,
                config.api_deploy_id,
            ),
            token: config.api_token.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// The deployment's table of contents, passed through untyped.
    pub async fn structure(&self) -> Result<serde_json::Value, ContentError> {
        self.get("/structure", &[]).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ContentError> {
        debug!("GET {path} {query:?}");

        let response = self
            .client
            .get(self.endpoint(path))
            .header(AUTH_HEADER, &self.token)
            .query(query)
            .send()
            .await?;

        decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ContentError> {
        debug!("POST {path}");

        let response = self
            .client
            .post(self.endpoint(path))
            .header(AUTH_HEADER, &self.token)
            .json(body)
            .send()
            .await?;

        decode(response).await
    }
}

const AUTH_HEADER: &str = "X-Deploy-API-Auth";

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ContentError> {
    let status = response.status();

    if !status.is_success() {
        return Err(ContentError::Status(status.as_u16()));
    }

    Ok(response.json().await?)
}

#[async_trait(?Send)]
impl ContentProvider for HerettoApi {
    async fn fetch_article_by_resource_id(&self, resource_id: &str) -> Result<Article, ContentError> {
        self.get("/content", &[("for-resourceid", resource_id)]).await
    }

    async fn fetch_article_by_path(&self, path: &str) -> Result<Article, ContentError> {
        self.get("/content", &[("for-path", path)]).await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ContentError> {
        self.post("/search", &SearchQuery { query_string: query }).await
    }
}
