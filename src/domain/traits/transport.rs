use std::time::Duration;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Channel, MessageRef, ResponsePayload};

/// Transport trait - abstraction over the chat platform connection
#[async_trait]
pub trait Transport: Send + Sync {
    /// Set the bot's "playing" presence
    async fn set_presence(&self, activity: &str) -> Result<(), BotError>;

    /// Send a plain text message to a channel
    async fn send_text(&self, channel: &Channel, text: &str) -> Result<MessageRef, BotError>;

    /// Send a structured payload to a channel
    async fn send_payload(&self, channel: &Channel, payload: &ResponsePayload) -> Result<MessageRef, BotError>;

    /// Add a unicode reaction to a delivered message
    async fn add_reaction(&self, message: &MessageRef, marker: &str) -> Result<(), BotError>;

    /// Gateway heartbeat latency, if measured yet
    async fn latency(&self) -> Option<Duration>;
}
