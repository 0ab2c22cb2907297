//! The two retrieval operations offered to callers.

use crate::error::RetrievalError;
use crate::strategy::{Strategy, select_strategy};
use crate::video::{RetrievalOptions, VideoRecord};
use crate::youtube_api::search::{SearchScope, VideoSearch};
use crate::youtube_api::types::collect_capped;
use crate::youtube_api::YouTubeClient;
use tracing::instrument;

impl YouTubeClient {
    /// Lists up to `cap` videos from a channel.
    ///
    /// `channel_query` may be a channel id, a channel URL, a handle, or a channel name.
    /// Unfiltered requests in the default order walk the channel's uploads playlist; anything
    /// else is answered by a search restricted to the channel (see [`select_strategy`]).
    ///
    /// Returns an empty list if the channel has no matching videos. Any failure aborts the
    /// whole retrieval, and videos gathered before it are not returned.
    #[instrument(skip(self), err(Display))]
    pub async fn fetch_channel_videos(
        &self,
        channel_query: &str,
        cap: usize,
        options: &RetrievalOptions,
    ) -> Result<Vec<VideoRecord>, RetrievalError> {
        let channel_query = channel_query.trim();
        if channel_query.is_empty() {
            return Err(RetrievalError::InvalidInput(
                "Please enter a YouTube channel name, ID, or URL.".into(),
            ));
        }
        if cap == 0 {
            return Ok(Vec::new());
        }

        let channel_id = self.resolve_channel_id(channel_query).await?;

        let strategy = select_strategy(options);
        tracing::debug!(?strategy, channel_id, "retrieving channel videos");

        let videos = match strategy {
            Strategy::UploadsPlaylist => {
                let playlist_id = self.uploads_playlist_id(&channel_id).await?;
                collect_capped(self.playlist_videos(&playlist_id), cap).await?
            }
            Strategy::ChannelSearch => {
                let search = VideoSearch {
                    scope: SearchScope::Channel(channel_id),
                    options: *options,
                };
                collect_capped(self.video_search_results(&search), cap).await?
            }
        };

        tracing::info!(collected = videos.len(), "retrieved channel videos");
        Ok(videos)
    }

    /// Searches all of YouTube for up to `cap` videos about `topic_query`.
    ///
    /// At most [`SEARCH_RESULT_CEILING`](crate::SEARCH_RESULT_CEILING) videos are returned.
    /// A `cap` of zero returns an empty list without contacting the API.
    #[instrument(skip(self), err(Display))]
    pub async fn search_videos(
        &self,
        topic_query: &str,
        cap: usize,
        options: &RetrievalOptions,
    ) -> Result<Vec<VideoRecord>, RetrievalError> {
        let topic_query = topic_query.trim();
        if topic_query.is_empty() {
            return Err(RetrievalError::InvalidInput(
                "Please enter a topic to search for.".into(),
            ));
        }
        if cap == 0 {
            return Ok(Vec::new());
        }

        let search = VideoSearch {
            scope: SearchScope::Topic(topic_query.to_string()),
            options: *options,
        };
        let videos = collect_capped(self.video_search_results(&search), cap).await?;

        tracing::info!(collected = videos.len(), "retrieved search results");
        Ok(videos)
    }
}

/// Lists up to `cap` videos from a channel, authenticating with `api_key`.
///
/// Convenience wrapper around [`YouTubeClient::fetch_channel_videos`] for one-off calls.
pub async fn fetch_channel_videos(
    channel_query: &str,
    api_key: &str,
    cap: usize,
    options: &RetrievalOptions,
) -> Result<Vec<VideoRecord>, RetrievalError> {
    YouTubeClient::new(api_key)?
        .fetch_channel_videos(channel_query, cap, options)
        .await
}

/// Searches for up to `cap` videos about a topic, authenticating with `api_key`.
///
/// Convenience wrapper around [`YouTubeClient::search_videos`] for one-off calls.
pub async fn search_videos(
    topic_query: &str,
    api_key: &str,
    cap: usize,
    options: &RetrievalOptions,
) -> Result<Vec<VideoRecord>, RetrievalError> {
    YouTubeClient::new(api_key)?
        .search_videos(topic_query, cap, options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_reported_before_input() {
        let err = fetch_channel_videos("", " ", 10, &RetrievalOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::MissingCredential));

        let err = search_videos("rust", "", 0, &RetrievalOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::MissingCredential));
    }

    #[tokio::test]
    async fn blank_queries_are_invalid_input() {
        let client = YouTubeClient::new("key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let options = RetrievalOptions::default();

        let err = client
            .fetch_channel_videos(" \t\n", 10, &options)
            .await
            .unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidInput(_)));

        let err = client.search_videos("", 10, &options).await.unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidInput(_)));
    }
}
