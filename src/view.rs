// Declarative view-models, one per screen. These carry data only; the
// rendering layer (the CLI's text renderer, an embedder's UI) decides
// presentation.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::{ChapterSummary, Listing, Manga, PageImage};
use crate::error::ErrorMessage;
use crate::state::{Feed, ListingKind, NavigationState};

/// Inline fallback shown when a cover or page image is absent, and by
/// contract when a renderer fails to load or decode a remote image.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22200%22 height=%22300%22%3E%3Crect fill=%22%23333%22 width=%22200%22 height=%22300%22/%3E%3C/svg%3E";

const UNKNOWN_TITLE: &str = "Unknown Title";

/// Resolved image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageUrl {
    /// No usable source; render the inline placeholder.
    Placeholder,
    /// Fetchable URL. Renderers still fall back to [`PLACEHOLDER_IMAGE`]
    /// when the fetch or decode fails.
    Remote(String),
}

impl ImageUrl {
    /// Resolve a raw image reference: absent means placeholder, absolute
    /// URLs are routed through the image proxy (the origin hosts reject
    /// hotlinks), anything else passes through untouched.
    pub fn resolve(proxy_base: &str, raw: Option<&str>) -> ImageUrl {
        match raw {
            None => ImageUrl::Placeholder,
            Some(r) if r.is_empty() => ImageUrl::Placeholder,
            Some(r) if r.starts_with("http") => ImageUrl::Remote(proxied(proxy_base, r)),
            Some(r) => ImageUrl::Remote(r.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageUrl::Placeholder => PLACEHOLDER_IMAGE,
            ImageUrl::Remote(url) => url,
        }
    }
}

fn proxied(proxy_base: &str, original: &str) -> String {
    match Url::parse(proxy_base) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("url", original);
            url.into()
        }
        // An unparseable proxy base leaves the original URL in place.
        Err(_) => original.to_string(),
    }
}

/// The one screen a session shows at a time. Every navigation action
/// replaces the whole screen; there is no partial render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Screen {
    Loading(LoadingScreen),
    Listing(ListingScreen),
    Empty(EmptyScreen),
    Detail(DetailScreen),
    Reader(ReaderScreen),
    Error(ErrorScreen),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingScreen {
    pub message: String,
}

impl LoadingScreen {
    /// Placeholder text matching the navigation a fetch was issued for.
    pub fn for_nav(nav: &NavigationState) -> LoadingScreen {
        let message = match nav {
            NavigationState::Listing { kind, .. } => match kind {
                ListingKind::Feed(Feed::Popular) => "Loading popular manga...",
                ListingKind::Feed(Feed::Latest) => "Loading latest manga...",
                ListingKind::Feed(Feed::Recent) => "Loading recent manga...",
                ListingKind::Search(_) => "Searching...",
            },
            NavigationState::Detail { .. } => "Loading manga details...",
            NavigationState::Reader { .. } => "Loading pages...",
        };
        LoadingScreen {
            message: message.to_string(),
        }
    }
}

/// Shown in place of a listing whose result set came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyScreen {
    pub heading: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorScreen {
    pub message: ErrorMessage,
}

impl ErrorScreen {
    pub fn new(message: ErrorMessage) -> Self {
        Self { message }
    }
}

/// Pagination controls. Previous appears only past page 1, Next only when
/// the server reported another page; the current page is always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    pub prev: Option<u32>,
    pub current: u32,
    pub next: Option<u32>,
}

impl Pager {
    pub fn build(page: u32, has_next_page: bool) -> Pager {
        Pager {
            prev: (page > 1).then(|| page - 1),
            current: page,
            next: has_next_page.then(|| page + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub id: String,
    pub title: String,
    /// First alternate title, when the catalog has one.
    pub subtitle: Option<String>,
    pub cover: ImageUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingScreen {
    pub heading: String,
    pub entries: Vec<ListingEntry>,
    pub pager: Pager,
    /// Set when the screen was reached by a page change; the viewport
    /// should return to the top.
    pub reset_scroll: bool,
}

/// Build the listing (or empty) screen for one response page.
pub fn listing_screen(
    kind: &ListingKind,
    page: u32,
    listing: &Listing,
    proxy_base: &str,
    reset_scroll: bool,
) -> Screen {
    if listing.results.is_empty() {
        return Screen::Empty(EmptyScreen {
            heading: kind.heading(),
        });
    }
    let entries = listing
        .results
        .iter()
        .map(|manga| ListingEntry {
            id: manga.id.clone(),
            title: manga
                .title
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            subtitle: manga.alt_titles.first().cloned().filter(|s| !s.is_empty()),
            cover: ImageUrl::resolve(proxy_base, manga.image.as_deref()),
        })
        .collect();
    Screen::Listing(ListingScreen {
        heading: kind.heading(),
        entries,
        pager: Pager::build(page, listing.has_next_page),
        reset_scroll,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRow {
    pub id: String,
    pub title: String,
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailScreen {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub cover: ImageUrl,
    pub status: Option<String>,
    pub year: Option<String>,
    pub genres: Vec<String>,
    pub description: Option<String>,
    /// Server order. Empty means the renderer shows an explicit
    /// no-chapters placeholder, never a bare list.
    pub chapters: Vec<ChapterRow>,
}

pub fn detail_screen(manga: &Manga, proxy_base: &str) -> DetailScreen {
    DetailScreen {
        id: manga.id.clone(),
        title: manga
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        subtitle: manga.alt_titles.first().cloned().filter(|s| !s.is_empty()),
        cover: ImageUrl::resolve(proxy_base, manga.image.as_deref()),
        status: manga.status.clone().filter(|s| !s.is_empty()),
        year: manga.release_date.as_ref().map(|d| d.to_string()),
        genres: manga.genres.clone(),
        description: manga.description.clone().filter(|d| !d.is_empty()),
        chapters: manga
            .chapters
            .iter()
            .map(|chapter| ChapterRow {
                id: chapter.id.clone(),
                title: chapter_label(chapter),
                release_date: chapter.release_date.clone().filter(|d| !d.is_empty()),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterLink {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderPage {
    pub number: u32,
    pub image: ImageUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderScreen {
    pub manga_title: String,
    pub chapter_title: String,
    /// Reading order; may be empty, in which case the renderer shows an
    /// explicit no-pages placeholder.
    pub pages: Vec<ReaderPage>,
    pub prev: Option<ChapterLink>,
    pub next: Option<ChapterLink>,
}

pub fn reader_screen(
    manga: &Manga,
    chapter_id: &str,
    pages: &[PageImage],
    proxy_base: &str,
) -> ReaderScreen {
    let (prev, next) = chapter_neighbors(&manga.chapters, chapter_id);
    let chapter_title = manga
        .chapters
        .iter()
        .find(|c| c.id == chapter_id)
        .map(chapter_label)
        .unwrap_or_else(|| format!("Chapter {chapter_id}"));
    ReaderScreen {
        manga_title: manga
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        chapter_title,
        pages: pages
            .iter()
            .enumerate()
            .map(|(index, page)| ReaderPage {
                number: page.page.unwrap_or(index as u32 + 1),
                image: ImageUrl::resolve(proxy_base, Some(&page.img)),
            })
            .collect(),
        prev,
        next,
    }
}

/// Adjacent chapters in server order. An id that is not in the list gets no
/// neighbors at all.
pub fn chapter_neighbors(
    chapters: &[ChapterSummary],
    chapter_id: &str,
) -> (Option<ChapterLink>, Option<ChapterLink>) {
    let Some(index) = chapters.iter().position(|c| c.id == chapter_id) else {
        return (None, None);
    };
    let link = |chapter: &ChapterSummary| ChapterLink {
        id: chapter.id.clone(),
        title: chapter_label(chapter),
    };
    let prev = (index > 0).then(|| link(&chapters[index - 1]));
    let next = chapters.get(index + 1).map(link);
    (prev, next)
}

fn chapter_label(chapter: &ChapterSummary) -> String {
    chapter
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Chapter {}", chapter.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MangaSummary;

    const PROXY: &str = "https://api.example.com/manga/mangadex/proxy";

    fn chapter(id: &str, title: Option<&str>) -> ChapterSummary {
        ChapterSummary {
            id: id.to_string(),
            title: title.map(str::to_string),
            release_date: None,
        }
    }

    #[test]
    fn absent_image_resolves_to_the_placeholder() {
        assert_eq!(ImageUrl::resolve(PROXY, None), ImageUrl::Placeholder);
        assert_eq!(ImageUrl::resolve(PROXY, Some("")), ImageUrl::Placeholder);
        assert_eq!(ImageUrl::Placeholder.as_str(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn absolute_image_is_routed_through_the_proxy() {
        let resolved = ImageUrl::resolve(PROXY, Some("https://host/x.png"));
        assert_eq!(
            resolved,
            ImageUrl::Remote(format!("{PROXY}?url=https%3A%2F%2Fhost%2Fx.png"))
        );
    }

    #[test]
    fn relative_image_ref_passes_through() {
        let resolved = ImageUrl::resolve(PROXY, Some("covers/x.png"));
        assert_eq!(resolved, ImageUrl::Remote("covers/x.png".to_string()));
    }

    #[test]
    fn first_page_with_more_shows_only_next() {
        let pager = Pager::build(1, true);
        assert_eq!(pager.prev, None);
        assert_eq!(pager.current, 1);
        assert_eq!(pager.next, Some(2));
    }

    #[test]
    fn last_page_shows_only_previous_and_the_indicator() {
        let pager = Pager::build(3, false);
        assert_eq!(pager.prev, Some(2));
        assert_eq!(pager.current, 3);
        assert_eq!(pager.next, None);
    }

    #[test]
    fn empty_results_build_the_empty_screen() {
        let screen = listing_screen(
            &ListingKind::Search("nothing".to_string()),
            1,
            &Listing::default(),
            PROXY,
            false,
        );
        assert_eq!(
            screen,
            Screen::Empty(EmptyScreen {
                heading: "Search: nothing".to_string()
            })
        );
    }

    #[test]
    fn listing_entries_fall_back_to_an_unknown_title() {
        let listing = Listing {
            results: vec![MangaSummary {
                id: "m1".to_string(),
                title: None,
                alt_titles: vec![String::new(), "Alt".to_string()],
                image: None,
            }],
            has_next_page: true,
        };
        let Screen::Listing(screen) =
            listing_screen(&ListingKind::Feed(Feed::Popular), 1, &listing, PROXY, false)
        else {
            panic!("expected a listing screen");
        };
        assert_eq!(screen.entries[0].title, "Unknown Title");
        // the first alternate title was empty, so no subtitle at all
        assert_eq!(screen.entries[0].subtitle, None);
        assert_eq!(screen.entries[0].cover, ImageUrl::Placeholder);
        assert_eq!(screen.pager.next, Some(2));
    }

    #[test]
    fn chapter_neighbors_disable_controls_at_either_end() {
        let chapters = vec![
            chapter("c1", Some("One")),
            chapter("c2", None),
            chapter("c3", Some("Three")),
        ];

        let (prev, next) = chapter_neighbors(&chapters, "c1");
        assert!(prev.is_none());
        assert_eq!(next.unwrap().id, "c2");

        let (prev, next) = chapter_neighbors(&chapters, "c2");
        assert_eq!(prev.unwrap().id, "c1");
        assert_eq!(next.unwrap().id, "c3");

        let (prev, next) = chapter_neighbors(&chapters, "c3");
        assert_eq!(prev.unwrap().title, "Chapter c2");
        assert!(next.is_none());
    }

    #[test]
    fn unknown_chapter_id_gets_no_neighbors() {
        let chapters = vec![chapter("c1", None), chapter("c2", None)];
        assert_eq!(chapter_neighbors(&chapters, "zzz"), (None, None));
    }

    #[test]
    fn reader_pages_number_from_sequence_when_unnumbered() {
        let manga = Manga {
            id: "m1".to_string(),
            title: Some("Frieren".to_string()),
            alt_titles: vec![],
            image: None,
            status: None,
            release_date: None,
            genres: vec![],
            description: None,
            chapters: vec![chapter("c1", Some("One"))],
        };
        let pages = vec![
            PageImage {
                img: "https://host/1.png".to_string(),
                page: None,
            },
            PageImage {
                img: "https://host/2.png".to_string(),
                page: Some(7),
            },
        ];
        let screen = reader_screen(&manga, "c1", &pages, PROXY);
        assert_eq!(screen.chapter_title, "One");
        assert_eq!(screen.pages[0].number, 1);
        assert_eq!(screen.pages[1].number, 7);
        assert!(matches!(screen.pages[0].image, ImageUrl::Remote(_)));
        assert!(screen.prev.is_none() && screen.next.is_none());
    }
}
