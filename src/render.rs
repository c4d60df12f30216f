// Plain-text presentation of the screen view-models, used by the CLI. Any
// other front end would consume the same view-models and ignore this.

use std::fmt::Write;

use crate::view::{DetailScreen, ListingScreen, Pager, ReaderScreen, Screen};

pub fn render(screen: &Screen) -> String {
    match screen {
        Screen::Loading(loading) => format!("{}\n", loading.message),
        Screen::Empty(empty) => format!(
            "== {} ==\n\nNo manga found\nTry a different search\n",
            empty.heading
        ),
        Screen::Error(error) => format!("! {}\nPlease try again\n", error.message.text()),
        Screen::Listing(listing) => render_listing(listing),
        Screen::Detail(detail) => render_detail(detail),
        Screen::Reader(reader) => render_reader(reader),
    }
}

fn render_listing(screen: &ListingScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", screen.heading);
    for entry in &screen.entries {
        match &entry.subtitle {
            Some(subtitle) => {
                let _ = writeln!(out, "  {}  ({})  [{}]", entry.title, subtitle, entry.id);
            }
            None => {
                let _ = writeln!(out, "  {}  [{}]", entry.title, entry.id);
            }
        }
    }
    out.push('\n');
    out.push_str(&render_pager(&screen.pager));
    out
}

fn render_pager(pager: &Pager) -> String {
    let mut parts = Vec::new();
    if let Some(prev) = pager.prev {
        parts.push(format!("< Previous ({prev})"));
    }
    parts.push(format!("[{}]", pager.current));
    if let Some(next) = pager.next {
        parts.push(format!("Next ({next}) >"));
    }
    parts.join("  ") + "\n"
}

fn render_detail(screen: &DetailScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", screen.title);
    if let Some(subtitle) = &screen.subtitle {
        let _ = writeln!(out, "{subtitle}");
    }
    let _ = writeln!(out, "Cover: {}", screen.cover.as_str());
    if let Some(status) = &screen.status {
        let _ = writeln!(out, "Status: {status}");
    }
    if let Some(year) = &screen.year {
        let _ = writeln!(out, "Year: {year}");
    }
    if !screen.genres.is_empty() {
        let _ = writeln!(out, "Genres: {}", screen.genres.join(", "));
    }
    if let Some(description) = &screen.description {
        let _ = writeln!(out, "\n{description}");
    }
    let _ = writeln!(out, "\nChapters:");
    if screen.chapters.is_empty() {
        let _ = writeln!(out, "  No chapters available");
    }
    for chapter in &screen.chapters {
        match &chapter.release_date {
            Some(date) => {
                let _ = writeln!(out, "  {}  ({})  [{}]", chapter.title, date, chapter.id);
            }
            None => {
                let _ = writeln!(out, "  {}  [{}]", chapter.title, chapter.id);
            }
        }
    }
    out
}

fn render_reader(screen: &ReaderScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} / {} ==", screen.manga_title, screen.chapter_title);
    if screen.pages.is_empty() {
        let _ = writeln!(out, "No pages found");
    }
    for page in &screen.pages {
        let _ = writeln!(out, "  p.{:03}  {}", page.number, page.image.as_str());
    }
    out.push('\n');
    if let Some(prev) = &screen.prev {
        let _ = writeln!(out, "< Prev: {}  [{}]", prev.title, prev.id);
    }
    if let Some(next) = &screen.next {
        let _ = writeln!(out, "Next: {}  [{}] >", next.title, next.id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorMessage;
    use crate::view::{ChapterLink, EmptyScreen, ErrorScreen, ImageUrl, ListingEntry};

    #[test]
    fn empty_screen_states_it_explicitly() {
        let text = render(&Screen::Empty(EmptyScreen {
            heading: "Search: nothing".to_string(),
        }));
        assert!(text.contains("No manga found"));
    }

    #[test]
    fn detail_without_chapters_shows_the_placeholder() {
        let screen = DetailScreen {
            id: "m1".to_string(),
            title: "Frieren".to_string(),
            subtitle: None,
            cover: ImageUrl::Placeholder,
            status: None,
            year: None,
            genres: vec![],
            description: None,
            chapters: vec![],
        };
        let text = render(&Screen::Detail(screen));
        assert!(text.contains("No chapters available"));
    }

    #[test]
    fn pager_controls_follow_the_view_model() {
        let only_next = render_pager(&Pager::build(1, true));
        assert!(!only_next.contains("Previous"));
        assert!(only_next.contains("[1]"));
        assert!(only_next.contains("Next (2)"));

        let only_prev = render_pager(&Pager::build(3, false));
        assert!(only_prev.contains("Previous (2)"));
        assert!(only_prev.contains("[3]"));
        assert!(!only_prev.contains("Next"));
    }

    #[test]
    fn listing_lines_carry_ids_for_follow_up_commands() {
        let screen = ListingScreen {
            heading: "Popular".to_string(),
            entries: vec![ListingEntry {
                id: "m1".to_string(),
                title: "Berserk".to_string(),
                subtitle: Some("Berserk of Gluttony".to_string()),
                cover: ImageUrl::Placeholder,
            }],
            pager: Pager::build(1, false),
            reset_scroll: false,
        };
        let text = render(&Screen::Listing(screen));
        assert!(text.contains("Berserk  (Berserk of Gluttony)  [m1]"));
    }

    #[test]
    fn reader_without_pages_shows_the_placeholder() {
        let screen = ReaderScreen {
            manga_title: "Frieren".to_string(),
            chapter_title: "One".to_string(),
            pages: vec![],
            prev: None,
            next: Some(ChapterLink {
                id: "c2".to_string(),
                title: "Two".to_string(),
            }),
        };
        let text = render(&Screen::Reader(screen));
        assert!(text.contains("No pages found"));
        assert!(!text.contains("Prev:"));
        assert!(text.contains("Next: Two  [c2]"));
    }

    #[test]
    fn error_screen_uses_the_message_key_text() {
        let text = render(&Screen::Error(ErrorScreen::new(ErrorMessage::SearchFailed)));
        assert!(text.contains("Search failed"));
        assert!(text.contains("Please try again"));
    }
}
