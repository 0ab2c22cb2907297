//! Search API types: channel lookup by name, and filtered video search.

use crate::video::{RetrievalOptions, VideoRecord};
use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for a `search.list` call with `type=video`.
///
/// `items` is required: a page without it is malformed and fails to decode.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchListResponse {
    pub items: VecDeque<SearchResult>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

impl SearchListResponse {
    /// Converts the page into video records, skipping results that aren't videos.
    pub fn into_videos(self) -> (VecDeque<VideoRecord>, Option<String>) {
        let videos = self
            .items
            .into_iter()
            .filter_map(SearchResult::into_video)
            .collect();
        (videos, self.next_page_token)
    }
}

/// Response structure for the single-result `search.list` call with `type=channel` used to
/// look up a channel by name. No `items` means no match.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelSearchResponse {
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
}

impl ChannelSearchResponse {
    /// The channel id of the first result.
    pub fn first_channel_id(self) -> Option<String> {
        self.items.into_iter().next()?.id?.channel_id
    }
}

/// A search result points at a video, channel, or playlist; only the first two are used here.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: Option<SearchResultId>,
    pub snippet: Option<SearchResultSnippet>,
}

impl SearchResult {
    pub fn into_video(self) -> Option<VideoRecord> {
        let video_id = self.id?.video_id.filter(|id| !id.is_empty())?;
        let title = self.snippet.map(|s| s.title).unwrap_or_default();
        Some(VideoRecord::new(title, &video_id))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultId {
    /// Set when the result is a video.
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    /// Set when the result is a channel.
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultSnippet {
    #[serde(default)]
    pub title: String,
}

/// What a video search is restricted to.
///
/// At least one of a free-text query or a channel is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Videos matching free text, from any channel.
    Topic(String),
    /// Any video uploaded by the given channel.
    Channel(String),
}

/// Everything that determines which videos a search returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSearch {
    pub scope: SearchScope,
    pub options: RetrievalOptions,
}

impl VideoSearch {
    /// Query parameters for one `search.list` call, excluding paging and the API key.
    ///
    /// Filters are only included when set, so that unset filters use the API's defaults.
    pub fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("part", "snippet"), ("type", "video")];
        match &self.scope {
            SearchScope::Topic(q) => params.push(("q", q.as_str())),
            SearchScope::Channel(channel_id) => params.push(("channelId", channel_id.as_str())),
        }
        if let Some(order) = self.options.order {
            params.push(("order", order.as_str()));
        }
        if let Some(duration) = self.options.video_duration {
            params.push(("videoDuration", duration.as_str()));
        }
        if let Some(safe_search) = self.options.safe_search {
            params.push(("safeSearch", safe_search.as_str()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{Order, SafeSearch, VideoDuration};
    use pretty_assertions::assert_eq;

    #[test]
    fn results_that_are_not_videos_are_skipped() {
        let page: SearchListResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#searchListResponse",
                "regionCode": "US",
                "pageInfo": { "totalResults": 1000000, "resultsPerPage": 50 },
                "items": [
                    { "id": { "kind": "youtube#video", "videoId": "aaaaaaaaaaa" }, "snippet": { "title": "Video" } },
                    { "id": { "kind": "youtube#channel", "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw" }, "snippet": { "title": "Channel" } },
                    { "snippet": { "title": "No id" } },
                    { "id": { "kind": "youtube#video", "videoId": "bbbbbbbbbbb" } }
                ]
            }"#,
        )
        .unwrap();

        let (videos, next) = page.into_videos();
        assert_eq!(next, None);
        assert_eq!(
            Vec::from(videos),
            vec![
                VideoRecord::new("Video", "aaaaaaaaaaa"),
                VideoRecord::new("", "bbbbbbbbbbb"),
            ]
        );
    }

    #[test]
    fn video_page_without_items_is_malformed() {
        let page = serde_json::from_str::<SearchListResponse>(
            r#"{"kind": "youtube#searchListResponse", "nextPageToken": "CDIQAA"}"#,
        );
        assert!(page.is_err());
    }

    #[test]
    fn first_channel_id() {
        let page: ChannelSearchResponse = serde_json::from_str(
            r#"{"items": [
                { "id": { "kind": "youtube#channel", "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw" } },
                { "id": { "kind": "youtube#channel", "channelId": "UCother0000000000000000" } }
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            page.first_channel_id().as_deref(),
            Some("UCuAXFkgsw1L7xaCfnd5JJOw")
        );

        let empty: ChannelSearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_channel_id(), None);
    }

    #[test]
    fn topic_search_params() {
        let search = VideoSearch {
            scope: SearchScope::Topic("rust async".into()),
            options: RetrievalOptions::default(),
        };
        assert_eq!(
            search.query_params(),
            vec![("part", "snippet"), ("type", "video"), ("q", "rust async")]
        );
    }

    #[test]
    fn channel_search_params_carry_filters() {
        let search = VideoSearch {
            scope: SearchScope::Channel("UCuAXFkgsw1L7xaCfnd5JJOw".into()),
            options: RetrievalOptions {
                order: Some(Order::ViewCount),
                video_duration: Some(VideoDuration::Long),
                safe_search: Some(SafeSearch::Strict),
            },
        };
        assert_eq!(
            search.query_params(),
            vec![
                ("part", "snippet"),
                ("type", "video"),
                ("channelId", "UCuAXFkgsw1L7xaCfnd5JJOw"),
                ("order", "viewCount"),
                ("videoDuration", "long"),
                ("safeSearch", "strict"),
            ]
        );
    }
}
