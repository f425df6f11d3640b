use reqwest::Client;

use crate::models::feed_entry::FeedEntry;

// See: https://stackoverflow.com/a/7001617/5155484
const FEED_ACCEPT: &str = "application/rss+xml, application/rdf+xml, application/atom+xml, application/feed+json, application/xml;q=0.9, text/xml;q=0.8";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
    #[error("unable to parse feed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Entries in the order the feed lists them (newest first for Steam).
    pub async fn fetch(&self, source: &str, url: &str) -> Result<Vec<FeedEntry>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, FEED_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_entries(source, &body)
    }
}

pub fn parse_entries(source: &str, body: &[u8]) -> Result<Vec<FeedEntry>, FetchError> {
    let parsed = feed_rs::parser::parse(body)?;
    let total = parsed.entries.len();

    let entries: Vec<FeedEntry> = parsed
        .entries
        .iter()
        .filter_map(|entry| FeedEntry::from_feed_rs(source, entry))
        .collect();

    if entries.len() < total {
        tracing::debug!(
            source = source,
            dropped = total - entries.len(),
            "Dropped entries without a link"
        );
    }
    Ok(entries)
}
