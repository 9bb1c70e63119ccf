use super::User;

/// A text channel the bot can post into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Snapshot of the guild taken when an event arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: String,
    pub name: String,
    pub member_count: u64,
    pub text_channels: Vec<Channel>,
}

impl Guild {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            member_count: 0,
            text_channels: Vec::new(),
        }
    }

    pub fn with_member_count(mut self, count: u64) -> Self {
        self.member_count = count;
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.text_channels.push(channel);
        self
    }

    /// Find a text channel by exact name
    pub fn text_channel(&self, name: &str) -> Option<&Channel> {
        self.text_channels.iter().find(|c| c.name == name)
    }
}

/// A user together with the guild they belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user: User,
    pub guild: Guild,
}

impl Member {
    pub fn new(user: User, guild: Guild) -> Self {
        Self { user, guild }
    }
}
