use chrono::{DateTime, Utc};

/// Accent colour shown on the side of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    DarkPurple,
    Orange,
    Green,
}

impl Accent {
    pub fn rgb(&self) -> u32 {
        match self {
            Accent::Blue => 0x3498db,
            Accent::DarkPurple => 0x71368a,
            Accent::Orange => 0xe67e22,
            Accent::Green => 0x2ecc71,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Structured message handed to the transport for display
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsePayload {
    pub title: String,
    pub description: String,
    pub accent: Accent,
    pub url: Option<String>,
    pub author: Option<String>,
    pub fields: Vec<Field>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
}

impl ResponsePayload {
    pub fn new(title: impl Into<String>, accent: Accent) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            accent,
            url: None,
            author: None,
            fields: Vec::new(),
            footer: None,
            timestamp: None,
            thumbnail_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }
}

/// Handle to a delivered message, used to attach reactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub channel_id: String,
    pub message_id: String,
}

impl MessageRef {
    pub fn new(channel_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
        }
    }
}
