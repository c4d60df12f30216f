use serde::{Deserialize, Serialize};

/// Curated feeds exposed by the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feed {
    Popular,
    Latest,
    Recent,
}

impl Feed {
    /// Path segment on the remote API.
    pub fn path(self) -> &'static str {
        match self {
            Feed::Popular => "popular",
            Feed::Latest => "latest",
            Feed::Recent => "recent",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Feed::Popular => "Popular",
            Feed::Latest => "Latest",
            Feed::Recent => "Recent",
        }
    }
}

/// What a listing screen is showing: a curated feed or a search result set.
/// Both render identically; only the heading differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingKind {
    Feed(Feed),
    Search(String),
}

impl ListingKind {
    pub fn heading(&self) -> String {
        match self {
            ListingKind::Feed(feed) => feed.title().to_string(),
            ListingKind::Search(query) => format!("Search: {query}"),
        }
    }
}

/// Which screen the session is on. `page` exists only while listing; a new
/// listing kind always starts at page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationState {
    Listing { kind: ListingKind, page: u32 },
    Detail { manga_id: String },
    Reader { chapter_id: String },
}

impl NavigationState {
    pub fn listing(kind: ListingKind) -> Self {
        NavigationState::Listing { kind, page: 1 }
    }

    pub fn listing_kind(&self) -> Option<&ListingKind> {
        match self {
            NavigationState::Listing { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Ties an in-flight fetch to the navigation state that issued it. A
/// response is committed only while its token is still the newest one, so a
/// slow fetch can never overwrite a screen the user already left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(pub(crate) u64);
