//! Choosing how to list a channel's videos.

use crate::video::{Order, RetrievalOptions, VideoDuration};

/// How a channel's videos are retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Walk the channel's uploads playlist. Costs 1 quota unit per page and reaches every
    /// upload, but only in upload order and without filters.
    UploadsPlaylist,
    /// Search for videos restricted to the channel. Costs 100 quota units per page and
    /// usually stops after a few hundred results, but supports ordering and filters.
    ChannelSearch,
}

/// Picks the cheapest strategy that honors `options`.
///
/// The uploads playlist is already newest-first and unfiltered, so it is used whenever the
/// caller asks for nothing else. `safe_search` does not affect the choice.
pub fn select_strategy(options: &RetrievalOptions) -> Strategy {
    let default_order = matches!(options.order, None | Some(Order::Date));
    let any_duration = matches!(options.video_duration, None | Some(VideoDuration::Any));

    if default_order && any_duration {
        Strategy::UploadsPlaylist
    } else {
        Strategy::ChannelSearch
    }
}
