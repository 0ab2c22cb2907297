//! List a YouTube channel's videos, or search for videos by topic, using the YouTube Data API
//! v3 and a plain API key.
//!
//! Channel listings walk the channel's uploads playlist when no ordering or duration filter is
//! requested, since that is by far the cheapest way to enumerate a channel in terms of API
//! quota. Otherwise they fall back to a search restricted to the channel. Either way, pages are
//! fetched one after another until the requested number of videos has been collected or the
//! listing runs out.
//!
//! ```rust,no_run
//! use youtube_videos::{Order, RetrievalOptions, fetch_channel_videos};
//!
//! # async fn example() -> Result<(), youtube_videos::RetrievalError> {
//! let options = RetrievalOptions {
//!     order: Some(Order::ViewCount),
//!     ..Default::default()
//! };
//! for video in fetch_channel_videos("@RickAstleyYT", "AIza...", 10, &options).await? {
//!     println!("{}\n  {}", video.title(), video.url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod key_store;
pub mod retrieval;
pub mod strategy;
pub mod video;
pub mod youtube_api;

pub use error::RetrievalError;
pub use key_store::KeyStore;
pub use retrieval::{fetch_channel_videos, search_videos};
pub use strategy::{Strategy, select_strategy};
pub use video::{Order, RetrievalOptions, SafeSearch, VideoDuration, VideoRecord};
pub use youtube_api::{SEARCH_RESULT_CEILING, YouTubeClient};
