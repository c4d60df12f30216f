mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use tankobon::prelude::*;
use tankobon::render;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut session = Tankobon::connect(Config::from_env())?;

    let screen = match cli.command {
        Commands::Popular { page } => session.select_listing(Feed::Popular, page).await,
        Commands::Latest { page } => session.select_listing(Feed::Latest, page).await,
        Commands::Recent { page } => session.select_listing(Feed::Recent, page).await,
        Commands::Search { query } => session.search(&query).await,
        Commands::Info { manga_id } => session.open_manga(&manga_id).await,
        Commands::Read {
            manga_id,
            chapter_id,
        } => {
            // the reader needs the chapter list for prev/next pointers
            let detail = session.open_manga(&manga_id).await;
            if matches!(detail, Screen::Error(_)) {
                detail
            } else {
                session.read_chapter(&chapter_id).await
            }
        }
    };

    print!("{}", render::render(&screen));
    Ok(())
}
