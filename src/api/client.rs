//! Data API client.
//!
//! One method per endpoint. Requests are plain `GET`s with the key and
//! parameters in the query string; every non-success status becomes an
//! [`ApiError`] and nothing is retried.

use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use super::models::{
    ChannelListResponse, ChannelResource, CommentThreadListResponse, SearchListResponse,
    VideoListResponse, VideoResource,
};
use crate::config::{Config, COMMENT_PAGE_SIZE};
use crate::error_handling::{
    error_from_response, error_from_transport, ApiError, Endpoint, InitializationError,
    RequestStats,
};
use crate::initialization::init_client;

/// Parameters of the keyword search, fixed for every page of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    /// ISO 8601 lower bound on publish time
    pub published_after: String,
    /// `maxResults` of each page
    pub page_size: u32,
    /// Upper-cased region hint
    pub region_code: Option<String>,
}

/// Outcome of the key verification probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCheck {
    pub ok: bool,
    /// Human-readable failure reason
    pub reason: Option<String>,
}

/// Client for the YouTube Data API.
///
/// Cheap to clone; clones share the connection pool and the request statistics.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    stats: Arc<RequestStats>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Builds a client from the library configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the base URL does not parse.
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self, InitializationError> {
        let http = init_client(config)?;
        Self::with_http_client(http, &config.api_base_url, api_key)
    }

    /// Builds a client around an existing `reqwest::Client`.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, InitializationError> {
        // Url::join replaces the last segment unless the base ends with '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|source| {
            InitializationError::BaseUrlError {
                url: base_url.to_string(),
                source,
            }
        })?;

        Ok(ApiClient {
            http,
            base_url,
            api_key: api_key.into().trim().to_string(),
            stats: Arc::new(RequestStats::new()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Per-endpoint request counters shared by all clones of this client.
    pub fn stats(&self) -> &Arc<RequestStats> {
        &self.stats
    }

    /// A clone that authenticates with `api_key` instead.
    pub fn with_api_key(&self, api_key: &str) -> Self {
        ApiClient {
            api_key: api_key.trim().to_string(),
            ..self.clone()
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        if !self.has_api_key() {
            return Err(ApiError::MissingApiKey);
        }

        let url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!("GET {} {:?}", url, params);

        self.stats.record_request(endpoint);
        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                self.stats.record_failure(endpoint);
                error_from_transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            self.stats.record_failure(endpoint);
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(endpoint, status.as_u16(), &body));
        }

        let body = response.text().await.map_err(|e| {
            self.stats.record_failure(endpoint);
            error_from_transport(e)
        })?;
        serde_json::from_str(&body).map_err(|e| {
            self.stats.record_failure(endpoint);
            ApiError::Decode {
                endpoint,
                message: e.to_string(),
            }
        })
    }

    /// Fetches one page of keyword search results.
    pub async fn search_page(
        &self,
        query: &SearchQuery,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, ApiError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("maxResults", query.page_size.to_string()),
            ("q", query.keyword.clone()),
            ("publishedAfter", query.published_after.clone()),
            ("order", "relevance".to_string()),
        ];
        if let Some(region) = &query.region_code {
            params.push(("regionCode", region.clone()));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        self.get(Endpoint::Search, &params).await
    }

    /// Fetches snippet, statistics, and content details for up to 50 videos.
    pub async fn videos(&self, ids: &[String]) -> Result<Vec<VideoResource>, ApiError> {
        let params = [
            ("part", "snippet,statistics,contentDetails".to_string()),
            ("id", ids.join(",")),
            ("maxResults", ids.len().to_string()),
        ];
        let response: VideoListResponse = self.get(Endpoint::Videos, &params).await?;
        Ok(response.items)
    }

    /// Fetches snippet and statistics for up to 50 channels.
    pub async fn channels(&self, ids: &[String]) -> Result<Vec<ChannelResource>, ApiError> {
        let params = [
            ("part", "snippet,statistics".to_string()),
            ("id", ids.join(",")),
            ("maxResults", ids.len().to_string()),
        ];
        let response: ChannelListResponse = self.get(Endpoint::Channels, &params).await?;
        Ok(response.items)
    }

    /// Fetches one page of comment threads (with replies) for a video.
    pub async fn comment_threads(
        &self,
        video_id: &str,
        page_token: Option<&str>,
    ) -> Result<CommentThreadListResponse, ApiError> {
        let mut params = vec![
            ("part", "snippet,replies".to_string()),
            ("videoId", video_id.to_string()),
            ("maxResults", COMMENT_PAGE_SIZE.to_string()),
            ("textFormat", "plainText".to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        self.get(Endpoint::CommentThreads, &params).await
    }

    /// Confirms the key authenticates with a one-item read.
    pub async fn verify_key(&self) -> KeyCheck {
        let params = [
            ("part", "snippet".to_string()),
            ("maxResults", "1".to_string()),
        ];
        match self
            .get::<serde_json::Value>(Endpoint::I18nLanguages, &params)
            .await
        {
            Ok(_) => KeyCheck {
                ok: true,
                reason: None,
            },
            Err(e) => KeyCheck {
                ok: false,
                reason: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client =
            ApiClient::with_http_client(reqwest::Client::new(), "http://localhost:9/v3", "k")
                .unwrap();
        assert_eq!(
            client.base_url.join(Endpoint::Search.path()).unwrap().as_str(),
            "http://localhost:9/v3/search"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ApiClient::with_http_client(reqwest::Client::new(), "not a url", "k");
        assert!(matches!(
            result,
            Err(InitializationError::BaseUrlError { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = ApiClient::with_http_client(
            reqwest::Client::new(),
            "http://localhost:9",
            "secret-key",
        )
        .unwrap();
        assert!(!format!("{:?}", client).contains("secret-key"));
    }

    #[tokio::test]
    async fn test_blank_key_fails_before_any_request() {
        let client =
            ApiClient::with_http_client(reqwest::Client::new(), "http://localhost:9", "  ")
                .unwrap();
        let err = client.videos(&["a".to_string()]).await.unwrap_err();
        assert_eq!(err, ApiError::MissingApiKey);
        assert_eq!(client.stats().total_requests(), 0);
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error_without_key() {
        let client = ApiClient::with_http_client(
            reqwest::Client::new(),
            "http://127.0.0.1:9/v3",
            "SECRETKEY",
        )
        .unwrap();
        let err = client.videos(&["a".to_string()]).await.unwrap_err();

        let ApiError::Transport(message) = &err else {
            panic!("expected a transport error, got {:?}", err);
        };
        assert!(!message.is_empty());
        assert!(!message.contains("SECRETKEY"));
        assert!(!err.to_string().contains("SECRETKEY"));
        assert_eq!(client.stats().request_count(Endpoint::Videos), 1);
        assert_eq!(client.stats().failure_count(Endpoint::Videos), 1);
    }

    #[test]
    fn test_with_api_key_shares_stats() {
        let client =
            ApiClient::with_http_client(reqwest::Client::new(), "http://localhost:9", "").unwrap();
        let keyed = client.with_api_key(" new-key ");
        assert!(keyed.has_api_key());
        assert!(!client.has_api_key());
        assert!(Arc::ptr_eq(client.stats(), keyed.stats()));
    }
}
