//! YouTube Data API v3 client library.
//!
//! This module covers the four read-only calls needed to list videos with nothing but an
//! API key:
//!
//! | Call | Used for | Quota cost |
//! |------|----------|------------|
//! | `search.list` (`type=channel`) | turning a channel name or handle into a channel id | 100 |
//! | `channels.list` (`part=contentDetails`) | finding a channel's uploads playlist | 1 |
//! | `playlistItems.list` | walking the uploads playlist, 50 videos per page | 1 per page |
//! | `search.list` (`type=video`) | sorted/filtered or free-text video search, 50 per page | 100 per page |
//!
//! Listings are exposed as [`PagedStream`]s, which fetch the next page only once the current
//! one has been consumed. Combine them with [`types::collect_capped`] to stop after a given
//! number of videos without issuing further requests.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tokio_stream::StreamExt;
//! use youtube_videos::YouTubeClient;
//!
//! # async fn example() -> Result<(), youtube_videos::RetrievalError> {
//! let client = YouTubeClient::new("AIza...")?;
//! let channel_id = client.resolve_channel_id("@RickAstleyYT").await?;
//! let uploads = client.uploads_playlist_id(&channel_id).await?;
//!
//! let mut videos = std::pin::pin!(client.playlist_videos(&uploads));
//! while let Some(video) = videos.next().await {
//!     let video = video?;
//!     println!("{}: {}", video.title(), video.url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod search;
pub mod types;

pub use client::{API_BASE_URL, PAGE_SIZE, SEARCH_RESULT_CEILING, YouTubeClient};
pub use types::{PageInfo, PagedStream};

pub use channels::parse_channel_id;
pub use search::{SearchScope, VideoSearch};
