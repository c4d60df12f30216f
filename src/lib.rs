pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod state;
pub mod view;
pub mod websource;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::api::{CatalogSource, ChapterSummary, Listing, Manga, MangaSummary, PageImage};
    pub use crate::config::Config;
    pub use crate::error::{ErrorMessage, SourceError};
    pub use crate::state::{Feed, ListingKind, NavigationState, RequestToken};
    pub use crate::view::{
        DetailScreen, EmptyScreen, ErrorScreen, ImageUrl, ListingScreen, LoadingScreen, Pager,
        ReaderScreen, Screen,
    };
    pub use crate::Tankobon;
}

use tracing::{debug, warn};

use crate::api::{CatalogSource, Listing, Manga, PageImage};
use crate::config::Config;
use crate::error::{ErrorMessage, SourceError};
use crate::state::{Feed, ListingKind, NavigationState, RequestToken};
use crate::view::{ErrorScreen, LoadingScreen, Screen};
use crate::websource::WebSource;

/// One browsing session over a catalog source. Owns the navigation state,
/// the manga detail held for back-navigation, and the fetch generation
/// counter; every operation returns the next screen to show.
///
/// The high-level async operations (`select_listing`, `search`, ...) fetch
/// inline. Callers that drive fetches themselves (a UI event loop) use the
/// `begin_*`/`complete_*` pairs instead: `begin_*` records the navigation
/// intent and returns the token the eventual response must present, and
/// `complete_*` refuses responses whose token has been superseded.
pub struct Tankobon {
    source: Box<dyn CatalogSource>,
    config: Config,
    nav: NavigationState,
    current_manga: Option<Manga>,
    generation: u64,
}

impl Tankobon {
    pub fn new(source: Box<dyn CatalogSource>, config: Config) -> Self {
        Self {
            source,
            config,
            nav: NavigationState::listing(ListingKind::Feed(Feed::Popular)),
            current_manga: None,
            generation: 0,
        }
    }

    /// Session over the real web backend.
    pub fn connect(config: Config) -> Result<Self, SourceError> {
        let source = WebSource::new(&config)?;
        Ok(Self::new(Box::new(source), config))
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// The detail held from the last successful `open_manga`, if any.
    pub fn current_manga(&self) -> Option<&Manga> {
        self.current_manga.as_ref()
    }

    /// Loading placeholder for whatever fetch is currently in flight.
    pub fn loading_screen(&self) -> Screen {
        Screen::Loading(LoadingScreen::for_nav(&self.nav))
    }

    // --- Listing ---

    /// Show one of the curated feeds.
    pub async fn select_listing(&mut self, feed: Feed, page: u32) -> Screen {
        self.show_listing(ListingKind::Feed(feed), page, false).await
    }

    /// Search the catalog. An empty or whitespace-only query falls back to
    /// the popular feed instead of issuing a nonsense request.
    pub async fn search(&mut self, query: &str) -> Screen {
        let query = query.trim();
        if query.is_empty() {
            debug!("empty search query, falling back to the popular feed");
            return self.select_listing(Feed::Popular, 1).await;
        }
        self.show_listing(ListingKind::Search(query.to_string()), 1, false)
            .await
    }

    /// Move the current listing to another page. Outside a listing view
    /// this falls back to the popular feed.
    pub async fn change_page(&mut self, page: u32) -> Screen {
        let kind = self
            .nav
            .listing_kind()
            .cloned()
            .unwrap_or(ListingKind::Feed(Feed::Popular));
        self.show_listing(kind, page, true).await
    }

    async fn show_listing(&mut self, kind: ListingKind, page: u32, reset_scroll: bool) -> Screen {
        if page == 0 {
            warn!("rejected listing request for page 0");
            return Screen::Error(ErrorScreen::new(ErrorMessage::RequestInvalid));
        }
        let token = self.begin_listing(kind.clone(), page);
        let outcome = match &kind {
            ListingKind::Feed(feed) => self.source.listing(*feed, page).await,
            ListingKind::Search(query) => self.source.search(query).await,
        };
        self.complete_listing(token, outcome, reset_scroll)
            .unwrap_or_else(|| self.loading_screen())
    }

    pub fn begin_listing(&mut self, kind: ListingKind, page: u32) -> RequestToken {
        self.begin(NavigationState::Listing { kind, page })
    }

    /// Commit a listing response. Returns `None` when the token has been
    /// superseded by a later navigation; the response is then discarded
    /// without touching any session state.
    pub fn complete_listing(
        &mut self,
        token: RequestToken,
        outcome: Result<Listing, SourceError>,
        reset_scroll: bool,
    ) -> Option<Screen> {
        if !self.accept(token) {
            return None;
        }
        let NavigationState::Listing { kind, page } = self.nav.clone() else {
            return None;
        };
        Some(match outcome {
            Ok(listing) => {
                view::listing_screen(&kind, page, &listing, &self.config.proxy_base, reset_scroll)
            }
            Err(err) => {
                warn!(error = %err, "listing fetch failed");
                let message = match kind {
                    ListingKind::Search(_) => ErrorMessage::SearchFailed,
                    ListingKind::Feed(_) => ErrorMessage::LoadListingFailed,
                };
                Screen::Error(ErrorScreen::new(message.for_failure(&err)))
            }
        })
    }

    // --- Detail ---

    /// Fetch a title's metadata and chapter list, holding the result for
    /// reader navigation and back-navigation.
    pub async fn open_manga(&mut self, manga_id: &str) -> Screen {
        let token = self.begin_detail(manga_id);
        let outcome = self.source.manga(manga_id).await;
        self.complete_detail(token, outcome)
            .unwrap_or_else(|| self.loading_screen())
    }

    pub fn begin_detail(&mut self, manga_id: &str) -> RequestToken {
        self.begin(NavigationState::Detail {
            manga_id: manga_id.to_string(),
        })
    }

    /// Commit a detail response; `None` means the token was superseded. A
    /// failed fetch keeps whatever detail was held before.
    pub fn complete_detail(
        &mut self,
        token: RequestToken,
        outcome: Result<Manga, SourceError>,
    ) -> Option<Screen> {
        if !self.accept(token) {
            return None;
        }
        Some(match outcome {
            Ok(manga) => {
                let screen = view::detail_screen(&manga, &self.config.proxy_base);
                self.current_manga = Some(manga);
                Screen::Detail(screen)
            }
            Err(err) => {
                warn!(error = %err, "detail fetch failed");
                Screen::Error(ErrorScreen::new(
                    ErrorMessage::LoadDetailFailed.for_failure(&err),
                ))
            }
        })
    }

    // --- Reader ---

    /// Fetch a chapter's page images. Requires a held detail: prev/next
    /// come from its chapter order, and the reader is only reachable from
    /// a detail screen in any sane driver.
    pub async fn read_chapter(&mut self, chapter_id: &str) -> Screen {
        if self.current_manga.is_none() {
            warn!("reader requested with no open manga");
            return Screen::Error(ErrorScreen::new(ErrorMessage::LoadChapterFailed));
        }
        let token = self.begin_reader(chapter_id);
        let outcome = self.source.chapter_pages(chapter_id).await;
        self.complete_reader(token, outcome)
            .unwrap_or_else(|| self.loading_screen())
    }

    pub fn begin_reader(&mut self, chapter_id: &str) -> RequestToken {
        self.begin(NavigationState::Reader {
            chapter_id: chapter_id.to_string(),
        })
    }

    /// Commit a page-list response; `None` means the token was superseded.
    pub fn complete_reader(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<PageImage>, SourceError>,
    ) -> Option<Screen> {
        if !self.accept(token) {
            return None;
        }
        let NavigationState::Reader { chapter_id } = self.nav.clone() else {
            return None;
        };
        let Some(manga) = self.current_manga.as_ref() else {
            return Some(Screen::Error(ErrorScreen::new(
                ErrorMessage::LoadChapterFailed,
            )));
        };
        Some(match outcome {
            Ok(pages) => Screen::Reader(view::reader_screen(
                manga,
                &chapter_id,
                &pages,
                &self.config.proxy_base,
            )),
            Err(err) => {
                warn!(error = %err, "chapter fetch failed");
                Screen::Error(ErrorScreen::new(
                    ErrorMessage::LoadChapterFailed.for_failure(&err),
                ))
            }
        })
    }

    /// Return to the held detail without refetching; with nothing held,
    /// fall back to the popular feed.
    pub async fn back_to_manga(&mut self) -> Screen {
        let Some(manga) = self.current_manga.take() else {
            return self.select_listing(Feed::Popular, 1).await;
        };
        // still a navigation: supersede any fetch in flight
        let _ = self.begin(NavigationState::Detail {
            manga_id: manga.id.clone(),
        });
        let screen = Screen::Detail(view::detail_screen(&manga, &self.config.proxy_base));
        self.current_manga = Some(manga);
        screen
    }

    // --- helpers ---

    fn begin(&mut self, next: NavigationState) -> RequestToken {
        self.generation += 1;
        self.nav = next;
        RequestToken(self.generation)
    }

    fn accept(&self, token: RequestToken) -> bool {
        if token.0 == self.generation {
            true
        } else {
            debug!(
                token = token.0,
                current = self.generation,
                "stale response discarded"
            );
            false
        }
    }
}
