//! The records handed back to callers, and the filters they can ask for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every [`VideoRecord::url`] starts with this, followed by the (query-encoded) video id.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A single retrieved video.
///
/// The URL is always built from the video id; URLs reported by the API are never used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    title: String,
    url: String,
}

impl VideoRecord {
    /// Builds a record for the video with the given id.
    pub fn new(title: impl Into<String>, video_id: &str) -> Self {
        let encoded_id: String = form_urlencoded::byte_serialize(video_id.as_bytes()).collect();
        Self {
            title: title.into(),
            url: format!("{WATCH_URL_PREFIX}{encoded_id}"),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The canonical watch URL for this video.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Recovers the video id from the watch URL.
    pub fn video_id(&self) -> Option<String> {
        let query = self.url.strip_prefix("https://www.youtube.com/watch?")?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
    }
}

impl fmt::Display for VideoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.url)
    }
}

/// Optional filters for a retrieval. `None` leaves the choice to the Data API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<VideoDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safe_search: Option<SafeSearch>,
}

/// Declares a filter enum whose variants map one-to-one onto Data API query values.
macro_rules! api_value_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// All accepted values, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent to the Data API.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let accepted: Vec<_> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        format!("'{s}' is not one of: {}", accepted.join(", "))
                    })
            }
        }
    };
}

api_value_enum! {
    /// Result ordering. The Data API's own default for channel uploads is [`Order::Date`].
    Order {
        /// Newest first.
        Date => "date",
        Rating => "rating",
        Relevance => "relevance",
        /// Alphabetical by title.
        Title => "title",
        /// Most viewed first.
        ViewCount => "viewCount",
    }
}

api_value_enum! {
    /// Video length filter.
    VideoDuration {
        Any => "any",
        /// Longer than 20 minutes.
        Long => "long",
        /// Between 4 and 20 minutes.
        Medium => "medium",
        /// Shorter than 4 minutes.
        Short => "short",
    }
}

api_value_enum! {
    /// Restricted-content filtering for search results.
    SafeSearch {
        Moderate => "moderate",
        /// No filtering (`none` on the wire).
        Off => "none",
        Strict => "strict",
    }
}
