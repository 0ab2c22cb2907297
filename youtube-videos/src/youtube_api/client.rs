//! Core Data API client: keyed requests, channel resolution, and paginated listings.

use crate::error::{RetrievalError, upstream_message};
use crate::video::VideoRecord;
use crate::youtube_api::{
    channels::{ChannelListResponse, parse_channel_id},
    playlist_items::PlaylistItemListResponse,
    search::{ChannelSearchResponse, SearchListResponse, VideoSearch},
    types::PagedStream,
};
use http::Method;
use serde::de::DeserializeOwned;
use std::fmt;
use tokio_stream::{Stream, StreamExt};
use tracing::instrument;

/// Root of the YouTube Data API v3.
pub const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Items requested per page. This is the largest page the Data API will serve.
///
/// Every page asks for this many items, even when fewer are needed to reach a cap; the
/// surplus of the last page is dropped by the caller.
pub const PAGE_SIZE: u32 = 50;

/// Upper bound on how many results a video search yields, whatever the caller asks for.
pub const SEARCH_RESULT_CEILING: usize = 5000;

/// A client for the public (API-key authenticated) parts of the YouTube Data API v3.
///
/// The client holds no mutable state, so it can be cloned freely and shared between
/// concurrent retrievals.
#[derive(Clone)]
pub struct YouTubeClient {
    /// Sent as the `key` query parameter on every request
    api_key: String,
    /// Without a trailing slash
    base_url: String,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a client that authenticates with `api_key`.
    ///
    /// Fails with [`RetrievalError::MissingCredential`] if the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, RetrievalError> {
        Self::with_http_client(api_key, reqwest::Client::new())
    }

    /// Like [`Self::new`], but sends requests through the given HTTP client.
    ///
    /// No timeouts are applied by this crate; configure them on `client` if needed.
    pub fn with_http_client(
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Result<Self, RetrievalError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(RetrievalError::MissingCredential);
        }

        Ok(Self {
            api_key,
            base_url: API_BASE_URL.to_string(),
            client,
        })
    }

    /// Sends requests to a different API root instead of [`API_BASE_URL`].
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Issues a keyed GET request to a Data API endpoint and parses the JSON response.
    ///
    /// Non-success responses become [`RetrievalError::Upstream`], carrying the API's own
    /// message if it sent one and `failure_context` otherwise. Requests that never yield a
    /// readable response become [`RetrievalError::Unknown`].
    #[instrument(skip(self, query_params), level = tracing::Level::TRACE)]
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        failure_context: &str,
    ) -> Result<T, RetrievalError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        // The key is added last and kept out of errors, which would otherwise include the URL.
        let response = self
            .client
            .request(Method::GET, &url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| RetrievalError::Unknown(e.without_url()))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = upstream_message(&error_text, failure_context);
            tracing::warn!(
                endpoint,
                %status_code,
                reason = %message,
                "YouTube Data API rejected request"
            );
            return Err(RetrievalError::Upstream(message));
        }

        response
            .json()
            .await
            .map_err(|e| RetrievalError::Unknown(e.without_url()))
    }

    /// Turns a channel URL, handle, name, or id into a channel id.
    ///
    /// Channel ids and channel URLs containing one are recognized locally. Anything else is
    /// looked up with a `search.list` call for a single channel, which costs 100 quota units.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self), ret, err(Display))]
    pub async fn resolve_channel_id(&self, query: &str) -> Result<String, RetrievalError> {
        if let Some(channel_id) = parse_channel_id(query) {
            tracing::debug!(channel_id, "recognized channel id without lookup");
            return Ok(channel_id.to_string());
        }

        let query_params = [
            ("part", "snippet"),
            ("q", query),
            ("type", "channel"),
            ("maxResults", "1"),
        ];
        let results: ChannelSearchResponse = self
            .get_json(
                "search",
                &query_params,
                "Failed to search for YouTube channel.",
            )
            .await?;

        results
            .first_channel_id()
            .ok_or_else(|| RetrievalError::NotFound(format!("Channel \"{query}\" not found.")))
    }

    /// Gets the id of the playlist holding every video the channel has uploaded.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self), ret, err(Display))]
    pub async fn uploads_playlist_id(&self, channel_id: &str) -> Result<String, RetrievalError> {
        let query_params = [("part", "contentDetails"), ("id", channel_id)];
        let channels: ChannelListResponse = self
            .get_json("channels", &query_params, "Failed to get channel details.")
            .await?;

        tracing::debug!(returned_items = channels.items.len(), "fetched channel details");

        channels
            .items
            .into_iter()
            .next()
            .map(|channel| channel.content_details.related_playlists.uploads)
            .ok_or_else(|| RetrievalError::NotFound("Could not retrieve channel details.".into()))
    }

    /// Returns a paginated stream of the videos in a playlist, in playlist order.
    ///
    /// Items that don't refer to a video are skipped. Each page costs 1 quota unit.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub fn playlist_videos<'a>(
        &'a self,
        playlist_id: &'a str,
    ) -> impl Stream<Item = Result<VideoRecord, RetrievalError>> + 'a {
        PagedStream::new(move |page_token| async move {
            let response = self
                .list_playlist_items_internal(playlist_id, page_token)
                .await?;
            Ok(response.into_videos())
        })
    }

    /// Returns a paginated stream of the videos matching a search.
    ///
    /// Results that aren't videos are skipped. The stream ends after
    /// [`SEARCH_RESULT_CEILING`] videos even if the API has more, without requesting the page
    /// after the one that reached it. Each page costs 100 quota units, and the API tends to stop
    /// handing out continuation tokens after a few hundred results.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub fn video_search_results<'a>(
        &'a self,
        search: &'a VideoSearch,
    ) -> impl Stream<Item = Result<VideoRecord, RetrievalError>> + 'a {
        PagedStream::new(move |page_token| async move {
            let response = self.search_videos_internal(search, page_token).await?;
            Ok(response.into_videos())
        })
        .take(SEARCH_RESULT_CEILING)
    }

    /// Internal method to fetch one page of a playlist's items.
    async fn list_playlist_items_internal(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<PlaylistItemListResponse, RetrievalError> {
        let max_results_string = PAGE_SIZE.to_string();
        let mut query_params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results_string.as_str()),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let items: PlaylistItemListResponse = self
            .get_json(
                "playlistItems",
                &query_params,
                "Failed to fetch video playlist.",
            )
            .await?;

        tracing::debug!(
            playlist_id,
            total_results = items.page_info.as_ref().map(|p| p.total_results),
            returned_items = items.items.len(),
            next_page = items.next_page_token.is_some(),
            "fetched playlist items"
        );

        Ok(items)
    }

    /// Internal method to fetch one page of video search results.
    async fn search_videos_internal(
        &self,
        search: &VideoSearch,
        page_token: Option<String>,
    ) -> Result<SearchListResponse, RetrievalError> {
        let max_results_string = PAGE_SIZE.to_string();
        let mut query_params = search.query_params();
        query_params.push(("maxResults", max_results_string.as_str()));

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let results: SearchListResponse = self
            .get_json("search", &query_params, "Failed to search/filter videos.")
            .await?;

        tracing::debug!(
            total_results = results.page_info.as_ref().map(|p| p.total_results),
            returned_items = results.items.len(),
            next_page = results.next_page_token.is_some(),
            "fetched search results"
        );

        Ok(results)
    }
}
