use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::ApiSettings;
use crate::domain::model::response::BookResponse;
use crate::domain::repository::BookSearchApi;

const HTTP_USER_AGENT: &str = concat!("bookshelf-repo/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum GoogleBooksError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Google Books `volumes` エンドポイントによるBookSearchApi実装。
pub struct GoogleBooksApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, GoogleBooksError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(HTTP_USER_AGENT)
            .build()?;
        Ok(Self::with_client(client, settings))
    }

    /// 構成済みの `reqwest::Client` を使う。タイムアウト設定はclient側の責任。
    pub fn with_client(client: Client, settings: &ApiSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        }
    }

    fn volumes_url(&self) -> String {
        format!("{}/volumes", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl BookSearchApi for GoogleBooksApi {
    type Error = GoogleBooksError;

    async fn search_books(&self, query: &str) -> Result<BookResponse, Self::Error> {
        let mut request = self
            .client
            .get(self.volumes_url())
            .query(&[("q", query)])
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GoogleBooksError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "volumes response received");
        Ok(serde_json::from_slice(&body)?)
    }
}
