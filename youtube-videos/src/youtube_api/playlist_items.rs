//! Playlist item types, used to enumerate a channel's uploads.

use crate::video::VideoRecord;
use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `playlistItems.list` API call with `part=snippet`.
///
/// `items` is required: a page without it is malformed and fails to decode.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    pub items: VecDeque<PlaylistItem>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

impl PlaylistItemListResponse {
    /// Converts the page into video records, skipping items that don't name a video.
    pub fn into_videos(self) -> (VecDeque<VideoRecord>, Option<String>) {
        let videos = self
            .items
            .into_iter()
            .filter_map(PlaylistItem::into_video)
            .collect();
        (videos, self.next_page_token)
    }
}

/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub snippet: Option<PlaylistItemSnippet>,
}

impl PlaylistItem {
    /// Returns `None` for items that are missing their video id (e.g. removed videos).
    pub fn into_video(self) -> Option<VideoRecord> {
        let snippet = self.snippet?;
        let video_id = snippet.resource_id?.video_id.filter(|id| !id.is_empty())?;
        Some(VideoRecord::new(snippet.title, &video_id))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: String,
    /// Identifies the resource that the playlist item refers to.
    #[serde(rename = "resourceId")]
    pub resource_id: Option<PlaylistItemResourceId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemResourceId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn items_without_video_id_are_skipped() {
        let page: PlaylistItemListResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#playlistItemListResponse",
                "nextPageToken": "EAAaBlBUOkNESQ",
                "pageInfo": { "totalResults": 4, "resultsPerPage": 50 },
                "items": [
                    { "snippet": { "title": "First", "resourceId": { "kind": "youtube#video", "videoId": "aaaaaaaaaaa" } } },
                    { "snippet": { "title": "No resource" } },
                    { "snippet": { "title": "Empty id", "resourceId": { "videoId": "" } } },
                    { "id": "no snippet" },
                    { "snippet": { "title": "Second", "resourceId": { "videoId": "bbbbbbbbbbb" } } }
                ]
            }"#,
        )
        .unwrap();

        let (videos, next) = page.into_videos();
        assert_eq!(next.as_deref(), Some("EAAaBlBUOkNESQ"));
        assert_eq!(
            Vec::from(videos),
            vec![
                VideoRecord::new("First", "aaaaaaaaaaa"),
                VideoRecord::new("Second", "bbbbbbbbbbb"),
            ]
        );
    }

    #[test]
    fn last_page_has_no_token() {
        let page: PlaylistItemListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        let (videos, next) = page.into_videos();
        assert!(videos.is_empty());
        assert_eq!(next, None);
    }

    #[test]
    fn page_without_items_is_malformed() {
        let page = serde_json::from_str::<PlaylistItemListResponse>(r#"{"kind": "weird"}"#);
        assert!(page.is_err());
    }
}
