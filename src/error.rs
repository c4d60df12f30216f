use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single fetch against the catalog service. The session does
/// not retry and does not branch on the cause beyond logging it; a timeout
/// is kept separate so it can surface its own message.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("request timed out")]
    Timeout,
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else {
            SourceError::Http(err)
        }
    }
}

/// Message key carried by the Error screen. Rendering layers own the final
/// wording and styling; `text` is the stock English the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorMessage {
    LoadListingFailed,
    SearchFailed,
    LoadDetailFailed,
    LoadChapterFailed,
    Timeout,
    RequestInvalid,
}

impl ErrorMessage {
    pub fn text(self) -> &'static str {
        match self {
            ErrorMessage::LoadListingFailed => "Failed to load manga",
            ErrorMessage::SearchFailed => "Search failed",
            ErrorMessage::LoadDetailFailed => "Failed to load manga details",
            ErrorMessage::LoadChapterFailed => "Failed to load chapter",
            ErrorMessage::Timeout => "The request timed out",
            ErrorMessage::RequestInvalid => "Invalid request",
        }
    }

    /// A timed-out fetch reports the timeout key; every other failure keeps
    /// the operation's own key.
    pub(crate) fn for_failure(self, err: &SourceError) -> Self {
        match err {
            SourceError::Timeout => ErrorMessage::Timeout,
            _ => self,
        }
    }
}
