//! Channel lookup types, and recognition of channel ids in user input.

use crate::youtube_api::types::PageInfo;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::LazyLock;

/// A channel id, possibly preceded by one of the channel URL path forms.
static CHANNEL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:c/|channel/|user/))?([a-zA-Z0-9_-]{24})")
        .expect("channel id pattern is valid")
});

/// Every channel id starts with this.
pub const CHANNEL_ID_PREFIX: &str = "UC";

/// Extracts a channel id from a bare id or a channel URL, without contacting the API.
///
/// Only the first 24-character token in `query` is considered, and it is only accepted if it
/// has the channel id prefix. Returns `None` for handles, names, and anything else that needs
/// to be looked up remotely.
pub fn parse_channel_id(query: &str) -> Option<&str> {
    let token = CHANNEL_ID.captures(query)?.get(1)?.as_str();
    token.starts_with(CHANNEL_ID_PREFIX).then_some(token)
}

/// Response structure for the `channels.list` API call with `part=contentDetails`.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Channels matching the requested id. Absent when nothing matched.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
}

/// A `channel` resource, reduced to the parts needed to find its uploads.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: String,
    #[serde(rename = "contentDetails")]
    pub content_details: ChannelContentDetails,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#contentDetails>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

/// Playlists associated with a channel.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// The ID of the playlist that contains the channel's uploaded videos.
    pub uploads: String,
}
