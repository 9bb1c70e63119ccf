//! Discord adapter
//!
//! Translates gateway callbacks into [`Event`]s and implements [`Transport`]
//! over the serenity HTTP client. Dispatch is serialized so events are
//! handled one at a time in arrival order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serenity::all::{
    ActivityData, ChannelId, ChannelType, Client, Context, CreateEmbed, CreateEmbedAuthor,
    CreateEmbedFooter, CreateMessage, EventHandler, GatewayIntents, GuildId, Message, MessageId,
    ReactionType, Ready, ShardManager, Timestamp,
};
use serenity::prelude::TypeMapKey;
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::application::messaging::{CommandParser, EventDispatcher};
use crate::domain::entities::{Channel, Event, Guild, Member, MessageRef, ResponsePayload, User};
use crate::domain::traits::Transport;

struct ShardManagerKey;

impl TypeMapKey for ShardManagerKey {
    type Value = Arc<ShardManager>;
}

/// Per-event transport bound to the serenity context that delivered the event
pub struct DiscordTransport {
    ctx: Context,
}

impl DiscordTransport {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Transport for DiscordTransport {
    async fn set_presence(&self, activity: &str) -> Result<(), BotError> {
        self.ctx.set_activity(Some(ActivityData::playing(activity)));
        Ok(())
    }

    async fn send_text(&self, channel: &Channel, text: &str) -> Result<MessageRef, BotError> {
        let message = ChannelId::new(snowflake(&channel.id)?)
            .say(&self.ctx.http, text)
            .await
            .map_err(transport_error)?;

        Ok(message_ref(&message))
    }

    async fn send_payload(&self, channel: &Channel, payload: &ResponsePayload) -> Result<MessageRef, BotError> {
        let builder = CreateMessage::new().embed(embed(payload)?);
        let message = ChannelId::new(snowflake(&channel.id)?)
            .send_message(&self.ctx.http, builder)
            .await
            .map_err(transport_error)?;

        Ok(message_ref(&message))
    }

    async fn add_reaction(&self, message: &MessageRef, marker: &str) -> Result<(), BotError> {
        ChannelId::new(snowflake(&message.channel_id)?)
            .create_reaction(
                &self.ctx.http,
                MessageId::new(snowflake(&message.message_id)?),
                ReactionType::Unicode(marker.to_string()),
            )
            .await
            .map_err(transport_error)
    }

    async fn latency(&self) -> Option<Duration> {
        let data = self.ctx.data.read().await;
        let manager = data.get::<ShardManagerKey>()?;
        let runners = manager.runners.lock().await;
        runners.get(&self.ctx.shard_id).and_then(|runner| runner.latency)
    }
}

/// Gateway event handler feeding the dispatcher
struct Handler {
    dispatcher: Arc<EventDispatcher>,
    parser: CommandParser,
    serial: Mutex<()>,
}

impl Handler {
    async fn dispatch(&self, ctx: Context, event: Event) {
        let _guard = self.serial.lock().await;
        self.dispatcher
            .dispatch(&DiscordTransport::new(ctx), event)
            .await;
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let event = Event::Ready {
            bot_name: ready.user.name.clone(),
            guild_count: ready.guilds.len(),
        };
        self.dispatch(ctx, event).await;
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: serenity::all::Member) {
        let Some(guild) = guild_snapshot(&ctx, new_member.guild_id) else {
            tracing::warn!("Member joined uncached guild {}", new_member.guild_id);
            return;
        };

        let user = user_from(&new_member.user, new_member.nick.clone());
        self.dispatch(ctx, Event::MemberJoin(Member::new(user, guild)))
            .await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || !msg.content.starts_with(self.parser.prefix()) {
            return;
        }

        // Held across the channel lookup so a slow lookup cannot reorder messages
        let _guard = self.serial.lock().await;

        let channel_name = match msg.channel(&ctx).await {
            Ok(channel) => channel.guild().map(|c| c.name).unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Could not resolve channel {}: {}", msg.channel_id, e);
                String::new()
            }
        };

        let nick = msg.member.as_ref().and_then(|m| m.nick.clone());
        let author = user_from(&msg.author, nick);
        let channel = Channel::new(msg.channel_id.to_string(), channel_name);

        if let Some(event) = self.parser.parse(author, channel, &msg.content) {
            self.dispatcher
                .dispatch(&DiscordTransport::new(ctx), event)
                .await;
        }
    }
}

/// Connect to the gateway and serve events until the client shuts down
pub async fn start_bot(token: &str, dispatcher: Arc<EventDispatcher>) -> Result<(), BotError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler {
        parser: CommandParser::new(&dispatcher.app().config.bot.prefix),
        dispatcher,
        serial: Mutex::new(()),
    };

    let mut client = Client::builder(token, intents)
        .event_handler(handler)
        .await
        .map_err(transport_error)?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerKey>(client.shard_manager.clone());
    }

    tracing::info!("Starting Discord bot...");
    client.start().await.map_err(transport_error)?;

    Ok(())
}

/// Convert a payload into a Discord embed
fn embed(payload: &ResponsePayload) -> Result<CreateEmbed, BotError> {
    let mut embed = CreateEmbed::new()
        .title(&payload.title)
        .color(payload.accent.rgb());

    // Discord rejects empty descriptions
    if !payload.description.is_empty() {
        embed = embed.description(&payload.description);
    }
    if let Some(url) = &payload.url {
        embed = embed.url(url);
    }
    if let Some(author) = &payload.author {
        embed = embed.author(CreateEmbedAuthor::new(author));
    }
    for field in &payload.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(thumbnail) = &payload.thumbnail_url {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(footer) = &payload.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(at) = payload.timestamp {
        let timestamp = Timestamp::from_unix_timestamp(at.timestamp())
            .map_err(|e| BotError::Internal(format!("Invalid timestamp {}: {}", at, e)))?;
        embed = embed.timestamp(timestamp);
    }

    Ok(embed)
}

fn guild_snapshot(ctx: &Context, guild_id: GuildId) -> Option<Guild> {
    let guild = ctx.cache.guild(guild_id)?;

    let mut text_channels: Vec<_> = guild
        .channels
        .values()
        .filter(|c| c.kind == ChannelType::Text)
        .collect();
    text_channels.sort_by_key(|c| c.position);

    Some(Guild {
        id: guild.id.to_string(),
        name: guild.name.clone(),
        member_count: guild.member_count,
        text_channels: text_channels
            .into_iter()
            .map(|c| Channel::new(c.id.to_string(), c.name.clone()))
            .collect(),
    })
}

fn user_from(user: &serenity::all::User, nick: Option<String>) -> User {
    let mut out = User::new(user.id.to_string(), user.name.clone())
        .with_default_avatar(user.default_avatar_url());

    if let Some(url) = user.avatar_url() {
        out = out.with_avatar(url);
    }
    if let Some(name) = nick.or_else(|| user.global_name.clone()) {
        out = out.with_nickname(name);
    }
    if user.bot {
        out = out.as_bot();
    }
    out
}

fn message_ref(message: &Message) -> MessageRef {
    MessageRef::new(message.channel_id.to_string(), message.id.to_string())
}

fn snowflake(raw: &str) -> Result<u64, BotError> {
    raw.parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .ok_or_else(|| BotError::Transport(format!("Invalid snowflake: {:?}", raw)))
}

fn transport_error(e: serenity::Error) -> BotError {
    BotError::Transport(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflakes_must_be_nonzero_integers() {
        assert_eq!(snowflake("81384788765712384").unwrap(), 81384788765712384);
        assert!(snowflake("0").is_err());
        assert!(snowflake("").is_err());
        assert!(snowflake("general").is_err());
    }
}
