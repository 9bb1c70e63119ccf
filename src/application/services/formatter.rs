//! Response formatter - pure builders from domain data to payloads

use chrono::{DateTime, Utc};

use crate::domain::entities::{Accent, FeedEntry, Member, PollSpec, ResponsePayload};

/// Welcome card posted when a member joins
pub fn welcome(member: &Member, at: DateTime<Utc>) -> ResponsePayload {
    ResponsePayload::new(format!("Welcome to {}!", member.guild.name), Accent::Blue)
        .with_description(format!(
            "Hola there, {}! Welcome to **The Internet Times** 📰✨\n\n\
             We're glad to have you here. Feel free to introduce yourself and check out the channels!",
            member.user.mention()
        ))
        .with_thumbnail(member.user.avatar_or_default())
        .with_footer(format!("Member #{} | Joined at", member.guild.member_count))
        .with_timestamp(at)
}

/// Headline card for the latest feed entry
pub fn news(entry: &FeedEntry, source: &str) -> ResponsePayload {
    ResponsePayload::new(&entry.title, Accent::Orange)
        .with_url(&entry.link)
        .with_description(format!("Published on {}", entry.published_at))
        .with_author(format!("By {} on {}", entry.author, source))
        .with_footer("Stay informed!")
}

/// Numbered poll card; markers prefix each option in input order
pub fn poll(spec: &PollSpec, created_by: &str) -> ResponsePayload {
    let lines: Vec<String> = spec
        .choices()
        .map(|(marker, option)| format!("{} {}", marker, option))
        .collect();

    ResponsePayload::new(spec.question(), Accent::Green)
        .with_description(lines.join("\n"))
        .with_footer(format!("Poll created by {}", created_by))
}

/// Static command reference
pub fn help(prefix: &str) -> ResponsePayload {
    ResponsePayload::new("The Internet Times Bot Help", Accent::DarkPurple)
        .with_description("Here are all the available commands:")
        .with_field(
            "📰 General Commands",
            format!(
                "`{p}ping` - Checks the bot's latency.\n\
                 `{p}quote` - Get a random tech quote.\n\
                 `{p}technews` - Fetches the latest tech news.\n\
                 `{p}help` - Shows this message.",
                p = prefix
            ),
            false,
        )
        .with_field(
            "💬 Fun Commands",
            format!(
                "`{p}hello` - Say hello in the lounge.\n\
                 `{p}poll \"Question\" \"Option1\" \"Option2\"...` - Creates a poll.",
                p = prefix
            ),
            false,
        )
        .with_footer(format!(
            "Use {p}<command> to run a command. Example: {p}ping",
            p = prefix
        ))
}
