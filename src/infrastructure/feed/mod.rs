//! Feed client - single-shot fetch of the newest syndication entry
//!
//! RSS 2.0 is tried first, then Atom. No retries and no caching: every call
//! goes to the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::errors::{BotError, FetchError};
use crate::domain::entities::FeedEntry;
use crate::domain::traits::FeedSource;

const UNTITLED: &str = "Untitled";
const UNKNOWN_AUTHOR: &str = "Unknown";
const UNKNOWN_DATE: &str = "unknown date";

/// HTTP feed client
pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Result<Self, BotError> {
        let client = Client::builder()
            .user_agent(concat!("InternetTimesBot/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch_latest(&self, url: &str) -> Result<FeedEntry, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/rss+xml, application/atom+xml, application/xml, text/xml")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!("HTTP error: {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        parse_latest(&bytes)
    }
}

/// Parse a feed document and project its first entry
pub fn parse_latest(bytes: &[u8]) -> Result<FeedEntry, FetchError> {
    match rss::Channel::read_from(bytes) {
        Ok(channel) => first_rss_item(&channel),
        Err(rss_err) => match atom_syndication::Feed::read_from(bytes) {
            Ok(feed) => first_atom_entry(&feed),
            Err(atom_err) => Err(FetchError::Malformed(format!(
                "not RSS ({}) or Atom ({})",
                rss_err, atom_err
            ))),
        },
    }
}

fn first_rss_item(channel: &rss::Channel) -> Result<FeedEntry, FetchError> {
    let item = channel.items().first().ok_or(FetchError::Empty)?;

    let author = item
        .author()
        .or_else(|| {
            item.dublin_core_ext()
                .and_then(|dc| dc.creators().first())
                .map(String::as_str)
        })
        .unwrap_or(UNKNOWN_AUTHOR);

    Ok(FeedEntry {
        title: item.title().unwrap_or(UNTITLED).to_string(),
        link: item.link().unwrap_or_default().to_string(),
        author: author.to_string(),
        published_at: item.pub_date().unwrap_or(UNKNOWN_DATE).to_string(),
    })
}

fn first_atom_entry(feed: &atom_syndication::Feed) -> Result<FeedEntry, FetchError> {
    let entry = feed.entries().first().ok_or(FetchError::Empty)?;

    let link = entry
        .links()
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|l| l.href().to_string())
        .unwrap_or_default();

    let title = entry.title().value.trim();
    let published = entry.published().unwrap_or_else(|| entry.updated());

    Ok(FeedEntry {
        title: if title.is_empty() { UNTITLED } else { title }.to_string(),
        link,
        author: entry
            .authors()
            .first()
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        published_at: published.to_rfc3339(),
    })
}
