/// First entry of a syndication feed, as shown by `technews`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub author: String,
    pub published_at: String,
}
