use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::{CatalogSource, Listing, Manga, PageImage};
use crate::config::Config;
use crate::error::SourceError;
use crate::state::Feed;

/// Catalog backend speaking the consumet-style REST API over HTTPS. One
/// reqwest client, one bounded timeout per request.
pub struct WebSource {
    client: Client,
    base_url: String,
}

impl WebSource {
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| SourceError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn listing_url(&self, feed: Feed, page: u32) -> Result<Url, SourceError> {
        let mut url = self.endpoint(&[feed.path()])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn search_url(&self, query: &str) -> Result<Url, SourceError> {
        self.endpoint(&[query])
    }

    fn manga_url(&self, manga_id: &str) -> Result<Url, SourceError> {
        self.endpoint(&["info", manga_id])
    }

    fn pages_url(&self, chapter_id: &str) -> Result<Url, SourceError> {
        self.endpoint(&["read", chapter_id])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        debug!(%url, "catalog request");
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogSource for WebSource {
    async fn listing(&self, feed: Feed, page: u32) -> Result<Listing, SourceError> {
        self.get_json(self.listing_url(feed, page)?).await
    }

    async fn search(&self, query: &str) -> Result<Listing, SourceError> {
        self.get_json(self.search_url(query)?).await
    }

    async fn manga(&self, manga_id: &str) -> Result<Manga, SourceError> {
        self.get_json(self.manga_url(manga_id)?).await
    }

    async fn chapter_pages(&self, chapter_id: &str) -> Result<Vec<PageImage>, SourceError> {
        self.get_json(self.pages_url(chapter_id)?).await
    }
}
