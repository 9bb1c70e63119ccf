//! Event dispatcher - Routes platform events to handlers

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;

use super::parser::tokenize;
use crate::application::context::{AppContext, CommandContext};
use crate::application::errors::{BotError, CommandError};
use crate::application::services::formatter;
use crate::domain::entities::{
    Channel, Command, CommandErrorKind, Event, HandlerResult, Member, Reply, User,
};
use crate::domain::traits::Transport;

pub const MISSING_ARGUMENT: &str = "You're missing some arguments for this command. 🤔";
pub const TOO_MANY_ARGUMENTS: &str = "Too many arguments for this command. 🤔";
pub const MISSING_PERMISSION: &str = "You don't have the required permissions to run this command. 🚫";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// Event dispatcher - handles one event to completion, never propagates handler failures
pub struct EventDispatcher {
    app: Arc<AppContext>,
}

impl EventDispatcher {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &AppContext {
        &self.app
    }

    /// Dispatch a single event, performing its side effects through `transport`
    pub async fn dispatch(&self, transport: &dyn Transport, event: Event) {
        tracing::debug!("Dispatching {} event", event.kind());

        match event {
            Event::Ready { bot_name, guild_count } => {
                self.on_ready(transport, &bot_name, guild_count).await
            }
            Event::MemberJoin(member) => self.on_member_join(transport, &member).await,
            Event::MessageCommand {
                author,
                channel,
                command,
                raw_args,
            } => {
                self.on_command(transport, &author, &channel, &command, &raw_args)
                    .await
            }
            Event::CommandError {
                kind,
                channel,
                command,
            } => {
                self.on_command_error(transport, kind, &channel, command.as_deref())
                    .await
            }
        }
    }

    async fn on_ready(&self, transport: &dyn Transport, bot_name: &str, guild_count: usize) {
        if let Err(e) = transport.set_presence(&self.app.config.bot.presence).await {
            tracing::warn!("Failed to set presence: {}", e);
        }
        tracing::info!("Logged in as {}! Serving {} guild(s)", bot_name, guild_count);
    }

    async fn on_member_join(&self, transport: &dyn Transport, member: &Member) {
        let welcome = &self.app.config.channels.welcome;
        let Some(channel) = member.guild.text_channel(welcome) else {
            tracing::warn!("Welcome channel '{}' not found.", welcome);
            return;
        };

        let payload = formatter::welcome(member, Utc::now());
        if let Err(e) = transport.send_payload(channel, &payload).await {
            tracing::error!("Failed to welcome {}: {}", member.user, e);
        } else {
            tracing::info!("Welcomed {} to {}", member.user, member.guild.name);
        }
    }

    async fn on_command(
        &self,
        transport: &dyn Transport,
        author: &User,
        channel: &Channel,
        name: &str,
        raw_args: &str,
    ) {
        let Some(command) = self.app.registry.resolve(name) else {
            tracing::debug!("Ignoring unknown command: {}", name);
            return;
        };

        tracing::debug!("[{}] {} invoked {}", channel.name, author, name);

        match self.invoke(transport, command, author, channel, raw_args).await {
            Ok(reply) => {
                if let Err(e) = self.deliver(transport, channel, reply).await {
                    tracing::error!("Failed to deliver reply to {}: {}", name, e);
                }
            }
            Err(e) => {
                self.on_command_error(transport, e.kind(), channel, Some(name))
                    .await
            }
        }
    }

    /// Tokenize, check arity, then run the handler behind a panic boundary.
    /// Parameterless commands get an empty slice and never see `raw_args`.
    async fn invoke(
        &self,
        transport: &dyn Transport,
        command: &Command,
        author: &User,
        channel: &Channel,
        raw_args: &str,
    ) -> HandlerResult {
        let args = if command.arity.takes_arguments() {
            let args = tokenize(raw_args)?;
            command.check_arity(args.len())?;
            args
        } else {
            Vec::new()
        };

        let ctx = CommandContext {
            app: self.app.as_ref(),
            transport,
            author,
            channel,
        };

        match AssertUnwindSafe(command.handler.handle(&ctx, &args))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(CommandError::ExecutionFailed(panic_message(panic.as_ref()))),
        }
    }

    async fn on_command_error(
        &self,
        transport: &dyn Transport,
        kind: CommandErrorKind,
        channel: &Channel,
        command: Option<&str>,
    ) {
        let text = match kind {
            CommandErrorKind::MissingArgument => MISSING_ARGUMENT,
            CommandErrorKind::TooManyArguments => TOO_MANY_ARGUMENTS,
            CommandErrorKind::MissingPermission => MISSING_PERMISSION,
            CommandErrorKind::UnknownCommand => return,
            CommandErrorKind::Unexpected(detail) => {
                tracing::error!(
                    "An unexpected error occurred in {}: {}",
                    command.unwrap_or("<unknown>"),
                    detail
                );
                UNEXPECTED_ERROR
            }
        };

        if let Err(e) = transport.send_text(channel, text).await {
            tracing::error!("Failed to report command error: {}", e);
        }
    }

    async fn deliver(&self, transport: &dyn Transport, channel: &Channel, reply: Reply) -> Result<(), BotError> {
        match reply {
            Reply::Text(text) => {
                transport.send_text(channel, &text).await?;
            }
            Reply::Payload(payload) => {
                transport.send_payload(channel, &payload).await?;
            }
            Reply::Poll(poll) => {
                let message = transport.send_payload(channel, &poll.payload).await?;
                for marker in &poll.markers {
                    transport.add_reaction(&message, marker).await?;
                }
            }
            Reply::Nothing => {}
        }
        Ok(())
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("handler panicked: {}", s)
    } else {
        "handler panicked".to_string()
    }
}
