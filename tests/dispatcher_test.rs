//! End-to-end dispatch tests against an in-memory transport
//! Run with: cargo test --test dispatcher_test

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;

use common::*;
use internet_times_bot::application::errors::CommandError;
use internet_times_bot::application::messaging::dispatcher::{
    MISSING_ARGUMENT, MISSING_PERMISSION, TOO_MANY_ARGUMENTS, UNEXPECTED_ERROR,
};
use internet_times_bot::application::services::command_service::{
    LOUNGE_ONLY, NEWS_FAILED, NEWS_UNAVAILABLE, QUOTES,
};
use internet_times_bot::domain::entities::{
    Accent, Arity, Channel, Command, CommandErrorKind, Event, Guild, Member, Reply, User,
};

#[tokio::test]
async fn unknown_command_is_silently_ignored() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    dispatcher.dispatch(&transport, command("general", "doesnotexist", "")).await;
    dispatcher.dispatch(&transport, command("general", "", "")).await;

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn unknown_command_error_event_is_suppressed() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    let event = Event::CommandError {
        kind: CommandErrorKind::UnknownCommand,
        channel: Channel::new("1", "general"),
        command: Some("doesnotexist".to_string()),
    };
    dispatcher.dispatch(&transport, event).await;

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn command_error_kinds_map_to_fixed_messages() {
    let dispatcher = dispatcher();
    let cases = [
        (CommandErrorKind::MissingArgument, MISSING_ARGUMENT),
        (CommandErrorKind::TooManyArguments, TOO_MANY_ARGUMENTS),
        (CommandErrorKind::MissingPermission, MISSING_PERMISSION),
        (CommandErrorKind::Unexpected("boom".to_string()), UNEXPECTED_ERROR),
    ];

    for (kind, expected) in cases {
        let transport = RecordingTransport::new();
        let event = Event::CommandError {
            kind,
            channel: Channel::new("1", "general"),
            command: None,
        };
        dispatcher.dispatch(&transport, event).await;
        assert_eq!(transport.texts(), vec![expected.to_string()]);
    }
}

#[tokio::test]
async fn missing_arguments_never_reach_the_handler() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let counter = invoked.clone();
    let pair = Command::from_fn("pair", move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Reply::text("ok"))
    })
    .with_arity(Arity::between(2, 2));

    let dispatcher = dispatcher_with(StubFeed::new(FeedScript::Empty), vec![pair]);

    let with_min: Vec<(String, usize)> = dispatcher
        .app()
        .registry
        .all()
        .filter(|c| c.arity.min > 0)
        .map(|c| (c.name.clone(), c.arity.min))
        .collect();
    assert!(with_min.iter().any(|(name, _)| name == "poll"));

    for (name, min) in with_min {
        for count in 0..min {
            let transport = RecordingTransport::new();
            let args = vec!["x"; count].join(" ");
            dispatcher.dispatch(&transport, command("general", &name, &args)).await;
            assert_eq!(transport.texts(), vec![MISSING_ARGUMENT.to_string()], "{} with {} args", name, count);
            assert!(transport.payloads().is_empty());
        }
    }
    assert_eq!(invoked.load(Ordering::SeqCst), 0);

    let transport = RecordingTransport::new();
    dispatcher.dispatch(&transport, command("general", "pair", "a b c")).await;
    assert_eq!(transport.texts(), vec![TOO_MANY_ARGUMENTS.to_string()]);
    assert_eq!(invoked.load(Ordering::SeqCst), 0);

    dispatcher.dispatch(&transport, command("general", "pair", "a \"b c\"")).await;
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn poll_rejects_one_and_eleven_options() {
    let dispatcher = dispatcher();

    let transport = RecordingTransport::new();
    dispatcher.dispatch(&transport, command("general", "poll", "\"Lunch?\" Pizza")).await;
    assert_eq!(transport.texts(), vec!["You need at least 2 options to create a poll.".to_string()]);

    let transport = RecordingTransport::new();
    let eleven: Vec<String> = (1..=11).map(|i| format!("o{}", i)).collect();
    let raw = format!("\"Pick one\" {}", eleven.join(" "));
    dispatcher.dispatch(&transport, command("general", "poll", &raw)).await;
    assert_eq!(transport.texts(), vec!["You can only have a maximum of 10 options.".to_string()]);
    assert!(transport.payloads().is_empty());
}

#[tokio::test]
async fn poll_with_two_options_reacts_in_order() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    dispatcher
        .dispatch(&transport, command("general", "poll", "\"Best editor?\" \"Neo vim\" Emacs"))
        .await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    match &sent[0] {
        Sent::Payload { payload, .. } => {
            assert_eq!(payload.title, "Best editor?");
            assert_eq!(payload.description, "1️⃣ Neo vim\n2️⃣ Emacs");
            assert_eq!(payload.accent, Accent::Green);
            assert_eq!(payload.footer.as_deref(), Some("Poll created by Ada"));
        }
        other => panic!("expected payload first, got {:?}", other),
    }
    assert_eq!(
        sent[1..].to_vec(),
        vec![
            Sent::Reaction { message_id: "m1".to_string(), marker: "1️⃣".to_string() },
            Sent::Reaction { message_id: "m1".to_string(), marker: "2️⃣".to_string() },
        ]
    );
}

#[tokio::test]
async fn poll_with_ten_options_uses_every_marker() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();
    let options: Vec<String> = (1..=10).map(|i| format!("o{}", i)).collect();

    dispatcher
        .dispatch(&transport, command("general", "poll", &format!("Q {}", options.join(" "))))
        .await;

    let markers: Vec<String> = transport
        .sent()
        .into_iter()
        .filter_map(|s| match s {
            Sent::Reaction { marker, .. } => Some(marker),
            _ => None,
        })
        .collect();
    assert_eq!(
        markers,
        vec!["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟"]
    );

    let payload = &transport.payloads()[0];
    let lines: Vec<&str> = payload.description.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "1️⃣ o1");
    assert_eq!(lines[9], "🔟 o10");
}

#[tokio::test]
async fn hello_only_in_lounges() {
    let dispatcher = dispatcher();

    let transport = RecordingTransport::new();
    dispatcher.dispatch(&transport, command("🛋️ʟᴏᴜɴɢᴇ-2", "hello", "")).await;
    assert_eq!(transport.texts(), vec!["Hello <@42>! Welcome to the lounge 🛋️".to_string()]);

    let transport = RecordingTransport::new();
    dispatcher.dispatch(&transport, command("general", "hello", "")).await;
    assert_eq!(transport.texts(), vec![LOUNGE_ONLY.to_string()]);
}

#[tokio::test]
async fn technews_empty_feed_sends_only_fallback() {
    let feed = StubFeed::new(FeedScript::Empty);
    let calls = feed.calls();
    let dispatcher = dispatcher_with(feed, Vec::new());
    let transport = RecordingTransport::new();

    dispatcher.dispatch(&transport, command("general", "technews", "")).await;

    assert_eq!(
        transport.sent(),
        vec![Sent::Text {
            channel: "general".to_string(),
            text: NEWS_UNAVAILABLE.to_string()
        }]
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn technews_failures_degrade_to_a_message() {
    for script in [FeedScript::NetworkDown, FeedScript::Malformed] {
        let dispatcher = dispatcher_with(StubFeed::new(script), Vec::new());
        let transport = RecordingTransport::new();

        dispatcher.dispatch(&transport, command("general", "technews", "")).await;
        assert_eq!(transport.texts(), vec![NEWS_FAILED.to_string()]);
        assert!(transport.payloads().is_empty());
    }
}

#[tokio::test]
async fn technews_formats_latest_entry() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    dispatcher.dispatch(&transport, command("general", "technews", "")).await;

    let payloads = transport.payloads();
    assert_eq!(payloads.len(), 1);
    let news = &payloads[0];
    assert_eq!(news.title, "Chips get smaller again");
    assert_eq!(news.url.as_deref(), Some("https://www.theverge.com/chips"));
    assert_eq!(news.author.as_deref(), Some("By Jane Doe on The Verge"));
    assert_eq!(news.description, "Published on 2024-05-01T08:00:00-04:00");
}

#[tokio::test]
async fn technews_fetches_fresh_each_time() {
    let feed = StubFeed::new(FeedScript::Entry(sample_entry()));
    let calls = feed.calls();
    let dispatcher = dispatcher_with(feed, Vec::new());
    let transport = RecordingTransport::new();

    for _ in 0..3 {
        dispatcher.dispatch(&transport, command("general", "technews", "")).await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn ping_reports_non_negative_millis() {
    let dispatcher = dispatcher();

    for latency in [Some(std::time::Duration::from_millis(42)), None] {
        let transport = RecordingTransport::new().with_latency(latency);
        dispatcher.dispatch(&transport, command("general", "ping", "")).await;

        let texts = transport.texts();
        assert_eq!(texts.len(), 1);
        let ms: u64 = texts[0]
            .strip_prefix("Pong! 🏓 Latency is ")
            .and_then(|rest| rest.strip_suffix("ms."))
            .and_then(|n| n.parse().ok())
            .expect("latency in milliseconds");
        assert_eq!(ms, latency.map(|d| d.as_millis() as u64).unwrap_or(0));
    }
}

#[tokio::test]
async fn quote_is_one_of_the_fixed_list() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    for _ in 0..20 {
        dispatcher.dispatch(&transport, command("general", "quote", "")).await;
    }

    let texts = transport.texts();
    assert_eq!(texts.len(), 20);
    assert!(texts.iter().all(|t| QUOTES.contains(&t.as_str())));
}

#[tokio::test]
async fn help_is_a_static_payload() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    dispatcher.dispatch(&transport, command("general", "help", "")).await;

    let payloads = transport.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].title, "The Internet Times Bot Help");
    assert_eq!(payloads[0].accent, Accent::DarkPurple);
    assert_eq!(payloads[0].fields.len(), 2);
}

#[tokio::test]
async fn handler_errors_and_panics_are_contained() {
    let failing = Command::from_fn("fail", |_, _| {
        Err(CommandError::ExecutionFailed("database on fire".to_string()))
    });
    let denied = Command::from_fn("admin", |_, _| Err(CommandError::PermissionDenied));
    let panicking = Command::from_fn("explode", |_, _| panic!("kaboom"));
    let dispatcher = dispatcher_with(
        StubFeed::new(FeedScript::Empty),
        vec![failing, denied, panicking],
    );
    let transport = RecordingTransport::new();

    dispatcher.dispatch(&transport, command("general", "fail", "")).await;
    dispatcher.dispatch(&transport, command("general", "admin", "")).await;
    dispatcher.dispatch(&transport, command("general", "explode", "")).await;
    dispatcher.dispatch(&transport, command("🛋️ʟᴏᴜɴɢᴇ-1", "hello", "")).await;

    assert_eq!(
        transport.texts(),
        vec![
            UNEXPECTED_ERROR.to_string(),
            MISSING_PERMISSION.to_string(),
            UNEXPECTED_ERROR.to_string(),
            "Hello <@42>! Welcome to the lounge 🛋️".to_string(),
        ]
    );
}

#[tokio::test]
async fn malformed_quotes_get_the_generic_message() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    dispatcher
        .dispatch(&transport, command("general", "poll", "\"Unclosed question A B"))
        .await;

    assert_eq!(transport.texts(), vec![UNEXPECTED_ERROR.to_string()]);
}

#[tokio::test]
async fn stray_quotes_after_parameterless_commands_are_ignored() {
    let dispatcher = dispatcher();

    let transport = RecordingTransport::new();
    dispatcher
        .dispatch(&transport, command("🛋️ʟᴏᴜɴɢᴇ-2", "hello", "\"hey there"))
        .await;
    assert_eq!(transport.texts(), vec!["Hello <@42>! Welcome to the lounge 🛋️".to_string()]);

    let transport = RecordingTransport::new().with_latency(Some(std::time::Duration::from_millis(7)));
    dispatcher.dispatch(&transport, command("general", "ping", "it\"s")).await;
    assert_eq!(transport.texts(), vec!["Pong! 🏓 Latency is 7ms.".to_string()]);
}

#[tokio::test]
async fn delivery_failures_do_not_escape() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new().failing();

    dispatcher.dispatch(&transport, command("general", "help", "")).await;
    dispatcher.dispatch(&transport, command("general", "poll", "Q a b")).await;

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn ready_sets_presence() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();

    let event = Event::Ready {
        bot_name: "internet-times-bot".to_string(),
        guild_count: 1,
    };
    dispatcher.dispatch(&transport, event).await;

    assert_eq!(transport.sent(), vec![Sent::Presence("The Internet Times 📡".to_string())]);
}

fn joining(guild: Guild) -> Event {
    let user = User::new("7", "newbie").with_default_avatar("https://cdn.discordapp.com/embed/avatars/2.png");
    Event::MemberJoin(Member::new(user, guild))
}

#[tokio::test]
async fn member_join_posts_welcome_card() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();
    let guild = Guild::new("1", "The Internet Times")
        .with_member_count(57)
        .with_channel(Channel::new("10", "general"))
        .with_channel(Channel::new("11", "👋ᴡᴇʟᴄᴏᴍᴇ"));

    dispatcher.dispatch(&transport, joining(guild)).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    let Sent::Payload { channel, payload } = &sent[0] else {
        panic!("expected a payload, got {:?}", sent[0]);
    };
    assert_eq!(channel, "👋ᴡᴇʟᴄᴏᴍᴇ");
    assert_eq!(payload.title, "Welcome to The Internet Times!");
    assert!(payload.description.contains("<@7>"));
    assert_eq!(
        payload.thumbnail_url.as_deref(),
        Some("https://cdn.discordapp.com/embed/avatars/2.png")
    );
    assert_eq!(payload.footer.as_deref(), Some("Member #57 | Joined at"));
    assert!(payload.timestamp.is_some());
}

#[tokio::test]
async fn member_join_without_welcome_channel_is_quiet() {
    let dispatcher = dispatcher();
    let transport = RecordingTransport::new();
    let guild = Guild::new("1", "The Internet Times").with_channel(Channel::new("10", "welcome"));

    dispatcher.dispatch(&transport, joining(guild)).await;

    assert!(transport.sent().is_empty());
}
