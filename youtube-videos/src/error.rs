//! Failures surfaced by the retrieval engine, and translation of Data API error payloads.

use regex::Regex;
use std::sync::LazyLock;

/// Matches markup tags, including a trailing tag that was never closed.
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("markup pattern is valid"));

/// Everything that can go wrong while retrieving videos.
///
/// The `Display` output of every variant is meant to be shown to the end user as-is.
/// Any failure aborts the whole retrieval; records gathered from earlier pages are discarded.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// No API key was supplied.
    #[error("A YouTube Data API key is required.")]
    MissingCredential,

    /// The channel or topic query was empty.
    #[error("{0}")]
    InvalidInput(String),

    /// A channel lookup returned no matches.
    #[error("{0}")]
    NotFound(String),

    /// The Data API rejected a request.
    ///
    /// Carries the API's own message with markup removed, or a generic description of the
    /// operation that failed if the API did not provide one.
    #[error("{0}")]
    Upstream(String),

    /// The request never produced a usable response (connection failure, unreadable body).
    #[error("An unknown error occurred while communicating with the YouTube API.")]
    Unknown(#[source] reqwest::Error),
}

impl RetrievalError {
    /// A stable, machine-readable name for the kind of failure.
    pub fn kind(&self) -> &'static str {
        match self {
            RetrievalError::MissingCredential => "missing_credential",
            RetrievalError::InvalidInput(_) => "invalid_input",
            RetrievalError::NotFound(_) => "not_found",
            RetrievalError::Upstream(_) => "upstream_error",
            RetrievalError::Unknown(_) => "unknown_error",
        }
    }
}

/// Turns the body of a non-success Data API response into a user-facing message.
///
/// The Data API reports failures as `{"error": {"message": "..."}}`, where the message may
/// contain HTML. If such a message is present it is returned with all markup stripped.
/// Otherwise `fallback` is returned.
pub fn upstream_message(body: &str, fallback: &str) -> String {
    let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback.to_string();
    };

    match payload.pointer("/error/message").and_then(|m| m.as_str()) {
        Some(message) if !message.is_empty() => strip_markup(message),
        _ => fallback.to_string(),
    }
}

/// Removes anything that looks like a markup tag.
pub fn strip_markup(message: &str) -> String {
    MARKUP.replace_all(message, "").into_owned()
}
