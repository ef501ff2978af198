use crate::config::NotionConfig;
use crate::error::{NotionError, Result};
use crate::wire::{heading_update_body, ChildrenResponse, SearchResponse};
use async_trait::async_trait;
use outline_engine::{ChildPage, HeadingLevel, OutlineError, OutlineStore, UpdateResponse};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

/// [`OutlineStore`] backed by the Notion REST API
pub struct NotionStore {
    client: Client,
    config: NotionConfig,
}

impl NotionStore {
    pub fn new(config: NotionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| NotionError::InvalidHeader("Authorization".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "Notion-Version",
            HeaderValue::from_str(&config.notion_version)
                .map_err(|_| NotionError::InvalidHeader("Notion-Version".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &NotionConfig {
        &self.config
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NotionError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl OutlineStore for NotionStore {
    async fn search(&self, query: &str) -> outline_engine::Result<String> {
        let response = self
            .client
            .post(self.config.url("search"))
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(NotionError::from)?;
        let found: SearchResponse = read_json(response).await?;

        let page_id = found
            .results
            .into_iter()
            .next()
            .map(|page| page.id)
            .ok_or_else(|| OutlineError::PageNotFound(query.to_string()))?;
        log::debug!("Page ID: {page_id}");
        Ok(page_id)
    }

    async fn list_children(
        &self,
        container_id: &str,
        cursor: Option<&str>,
    ) -> outline_engine::Result<ChildPage> {
        let mut request = self
            .client
            .get(self.config.url(&format!("blocks/{container_id}/children")));
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }

        let response = request.send().await.map_err(NotionError::from)?;
        let page: ChildrenResponse = read_json(response).await?;
        Ok(page.into())
    }

    async fn update_heading(
        &self,
        block_id: &str,
        level: HeadingLevel,
        text: &str,
    ) -> UpdateResponse {
        let result = self
            .client
            .patch(self.config.url(&format!("blocks/{block_id}")))
            .json(&heading_update_body(level, text))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(err) => return UpdateResponse::Error(format!("request failed: {err}")),
        };

        let status = response.status();
        if status.is_success() {
            UpdateResponse::Ok
        } else if status == StatusCode::CONFLICT {
            UpdateResponse::Conflict
        } else {
            let body = response.text().await.unwrap_or_default();
            UpdateResponse::Error(format!("HTTP {}: {body}", status.as_u16()))
        }
    }
}
