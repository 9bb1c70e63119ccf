//! Console adapter for development/testing
//!
//! Reads prefixed commands from stdin and prints whatever the dispatcher
//! sends. The invoking channel defaults to the first lounge so `!hello` works.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::{CommandParser, EventDispatcher};
use crate::domain::entities::{Channel, Event, MessageRef, ResponsePayload, User};
use crate::domain::traits::Transport;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    name: String,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Read commands line by line until EOF
    pub async fn run(&self, dispatcher: &EventDispatcher, channel: Channel) -> Result<(), BotError> {
        let parser = CommandParser::new(&dispatcher.app().config.bot.prefix);
        let author = User::new("0", "console");

        self.dispatch(dispatcher, Event::Ready {
            bot_name: self.name.clone(),
            guild_count: 1,
        })
        .await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?
        {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parser.parse(author.clone(), channel.clone(), line) {
                Some(event) => self.dispatch(dispatcher, event).await,
                None => println!("[console] commands start with '{}'", parser.prefix()),
            }
        }

        tracing::info!("Console input closed");
        Ok(())
    }

    async fn dispatch(&self, dispatcher: &EventDispatcher, event: Event) {
        dispatcher.dispatch(self, event).await;
    }
}

#[async_trait]
impl Transport for ConsoleAdapter {
    async fn set_presence(&self, activity: &str) -> Result<(), BotError> {
        println!("[PRESENCE] Playing {}", activity);
        Ok(())
    }

    async fn send_text(&self, channel: &Channel, text: &str) -> Result<MessageRef, BotError> {
        println!("[#{}] {}", channel.name, text);
        Ok(MessageRef::new(&channel.id, uuid::Uuid::new_v4().to_string()))
    }

    async fn send_payload(&self, channel: &Channel, payload: &ResponsePayload) -> Result<MessageRef, BotError> {
        println!("{}", render(channel, payload));
        Ok(MessageRef::new(&channel.id, uuid::Uuid::new_v4().to_string()))
    }

    async fn add_reaction(&self, message: &MessageRef, marker: &str) -> Result<(), BotError> {
        println!("  [REACT {}] {}", message.message_id, marker);
        Ok(())
    }

    async fn latency(&self) -> Option<Duration> {
        Some(Duration::ZERO)
    }
}

/// Plain-text rendering of a payload
fn render(channel: &Channel, payload: &ResponsePayload) -> String {
    let mut out = format!("[#{}] ┃ {}", channel.name, payload.title);
    if let Some(url) = &payload.url {
        out.push_str(&format!(" <{}>", url));
    }
    if let Some(author) = &payload.author {
        out.push_str(&format!("\n  ┃ {}", author));
    }
    for line in payload.description.lines() {
        out.push_str(&format!("\n  ┃ {}", line));
    }
    for field in &payload.fields {
        out.push_str(&format!("\n  ┃ [{}]", field.name));
        for line in field.value.lines() {
            out.push_str(&format!("\n  ┃   {}", line));
        }
    }
    if let Some(footer) = &payload.footer {
        out.push_str(&format!("\n  ┃ -- {}", footer));
    }
    if let Some(at) = payload.timestamp {
        out.push_str(&format!(" ({})", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    out
}
