use clap::{Parser, Subcommand};

/// Terminal front end for the catalog browsing library
#[derive(Parser)]
#[command(name = "tankobon")]
#[command(about = "Browse a remote manga catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the popular feed
    Popular {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show the latest feed
    Latest {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show the recently added feed
    Recent {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search the catalog by title
    Search {
        /// Query text
        query: String,
    },
    /// Show a manga's metadata and chapter list
    Info {
        /// Manga id from a listing
        manga_id: String,
    },
    /// List a chapter's page images with prev/next chapter pointers
    Read {
        /// Manga id the chapter belongs to
        manga_id: String,
        /// Chapter id from the info output
        chapter_id: String,
    },
}
