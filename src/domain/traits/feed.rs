use async_trait::async_trait;

use crate::application::errors::FetchError;
use crate::domain::entities::FeedEntry;

/// Feed source - fetches the most recent entry of a syndication feed
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_latest(&self, url: &str) -> Result<FeedEntry, FetchError>;
}
