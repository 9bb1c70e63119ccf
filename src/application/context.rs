//! Explicit application context handed to every handler

use std::sync::Arc;

use crate::domain::entities::{Channel, CommandRegistry, User};
use crate::domain::traits::{FeedSource, Transport};
use crate::infrastructure::config::Config;

/// Process-wide state, immutable once the bot starts serving events
pub struct AppContext {
    pub registry: CommandRegistry,
    pub config: Config,
    pub feed: Arc<dyn FeedSource>,
}

impl AppContext {
    pub fn new(registry: CommandRegistry, config: Config, feed: Arc<dyn FeedSource>) -> Self {
        Self { registry, config, feed }
    }
}

/// Per-invocation view passed to command handlers
pub struct CommandContext<'a> {
    pub app: &'a AppContext,
    pub transport: &'a dyn Transport,
    pub author: &'a User,
    pub channel: &'a Channel,
}

impl<'a> CommandContext<'a> {
    pub fn config(&self) -> &Config {
        &self.app.config
    }
}
