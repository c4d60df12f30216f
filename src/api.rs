// Wire data model and the source seam shared between the session and its
// backends. Field names follow the remote JSON; identifiers are opaque
// strings assigned by the service.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::state::Feed;

/// One entry in a listing or search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MangaSummary {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "altTitles")]
    pub alt_titles: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A page of summaries plus the server's next-page hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub results: Vec<MangaSummary>,
    #[serde(default, rename = "hasNextPage")]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<String>,
}

/// The remote emits the release year as a bare number for manga and as a
/// string elsewhere; accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseDate {
    Year(i64),
    Text(String),
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseDate::Year(year) => write!(f, "{year}"),
            ReleaseDate::Text(text) => f.write_str(text),
        }
    }
}

/// Full metadata plus the ordered chapter list for one manga. Chapter order
/// is the server's; it defines prev/next adjacency in the reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manga {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "altTitles")]
    pub alt_titles: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<ReleaseDate>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chapters: Vec<ChapterSummary>,
}

/// One image of a chapter, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    pub img: String,
    #[serde(default)]
    pub page: Option<u32>,
}

/// Backend seam between the session and the catalog service.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn listing(&self, feed: Feed, page: u32) -> Result<Listing, SourceError>;
    async fn search(&self, query: &str) -> Result<Listing, SourceError>;
    async fn manga(&self, manga_id: &str) -> Result<Manga, SourceError>;
    async fn chapter_pages(&self, chapter_id: &str) -> Result<Vec<PageImage>, SourceError>;
}
