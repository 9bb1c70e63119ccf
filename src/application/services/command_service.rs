//! Built-in commands served by the bot

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::application::context::CommandContext;
use crate::application::errors::{CommandError, FetchError, RegistryError};
use crate::application::services::{formatter, poll_builder};
use crate::domain::entities::{Arity, Command, CommandHandler, CommandRegistry, HandlerResult, Reply};

pub const QUOTES: [&str; 5] = [
    "The Internet is becoming the town square for the global village. - Bill Gates",
    "Information is the oil of the 21st century, and analytics is the combustion engine. - Peter Sondergaard",
    "The Web as I envisaged it, we have not seen it yet. The future is still so much bigger than the past. - Tim Berners-Lee",
    "Technology is anything that wasn’t around when you were born. - Alan Kay",
    "The advance of technology is based on making it fit in so that you don't even notice it, so it's part of everyday life. - Bill Gates",
];

pub const LOUNGE_ONLY: &str = "This command can only be used in the lounge channels!";
pub const NEWS_UNAVAILABLE: &str = "Sorry, I couldn't fetch the news right now.";
pub const NEWS_FAILED: &str = "An error occurred while fetching the news.";

/// Register every built-in command
pub fn register_defaults(registry: &mut CommandRegistry) -> Result<(), RegistryError> {
    registry.register(
        Command::new("ping", Ping).with_description("Checks the bot's latency."),
    )?;

    registry.register(
        Command::from_fn("quote", |_, _| {
            let quote = pick_quote(&QUOTES, &mut rand::rng()).unwrap_or_default();
            Ok(Reply::text(quote))
        })
        .with_description("Get a random tech quote."),
    )?;

    registry.register(
        Command::from_fn("hello", |ctx, _| {
            let in_lounge = ctx
                .config()
                .channels
                .lounges
                .iter()
                .any(|name| *name == ctx.channel.name);

            if in_lounge {
                Ok(Reply::text(format!(
                    "Hello {}! Welcome to the lounge 🛋️",
                    ctx.author.mention()
                )))
            } else {
                Ok(Reply::text(LOUNGE_ONLY))
            }
        })
        .with_description("Say hello in the lounge."),
    )?;

    registry.register(
        Command::new("technews", TechNews).with_description("Fetches the latest tech news."),
    )?;

    registry.register(
        Command::from_fn("poll", |ctx, args| {
            let (question, options) = args
                .split_first()
                .ok_or(CommandError::MissingArgument { expected: 1, got: 0 })?;

            match poll_builder::build(question.as_str(), options.to_vec()) {
                Ok(spec) => Ok(poll_builder::message(&spec, ctx.author.display_name()).into()),
                Err(e) => Ok(Reply::text(e.to_string())),
            }
        })
        .with_arity(Arity::at_least(1))
        .with_description("Creates a poll."),
    )?;

    registry.register(
        Command::from_fn("help", |ctx, _| Ok(formatter::help(&ctx.config().bot.prefix).into()))
            .with_description("Shows the command reference."),
    )?;

    Ok(())
}

/// Uniform pick from a fixed quote list
pub fn pick_quote<'a, R: Rng + ?Sized>(quotes: &[&'a str], rng: &mut R) -> Option<&'a str> {
    quotes.choose(rng).copied()
}

/// Latency reply, rounded to whole milliseconds
pub fn pong(latency: Duration) -> String {
    let ms = (latency.as_secs_f64() * 1000.0).round() as u64;
    format!("Pong! 🏓 Latency is {}ms.", ms)
}

struct Ping;

#[async_trait]
impl CommandHandler for Ping {
    async fn handle(&self, ctx: &CommandContext<'_>, _args: &[String]) -> HandlerResult {
        let latency = ctx.transport.latency().await.unwrap_or_default();
        Ok(Reply::text(pong(latency)))
    }
}

struct TechNews;

#[async_trait]
impl CommandHandler for TechNews {
    async fn handle(&self, ctx: &CommandContext<'_>, _args: &[String]) -> HandlerResult {
        let feed = &ctx.config().feed;

        match ctx.app.feed.fetch_latest(&feed.url).await {
            Ok(entry) => {
                tracing::debug!("Latest entry from {}: {}", feed.url, entry.title);
                Ok(formatter::news(&entry, &feed.source_name).into())
            }
            Err(FetchError::Empty) => {
                tracing::warn!("Feed {} returned no entries", feed.url);
                Ok(Reply::text(NEWS_UNAVAILABLE))
            }
            Err(e) => {
                tracing::error!("Error fetching news from {}: {}", feed.url, e);
                Ok(Reply::text(NEWS_FAILED))
            }
        }
    }
}
