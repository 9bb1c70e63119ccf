//! Shared fixtures: an in-memory transport and a scripted feed source

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;

use internet_times_bot::application::context::AppContext;
use internet_times_bot::application::errors::{BotError, FetchError};
use internet_times_bot::application::messaging::EventDispatcher;
use internet_times_bot::application::services::register_defaults;
use internet_times_bot::domain::entities::{
    Channel, Command, CommandRegistry, Event, FeedEntry, MessageRef, ResponsePayload, User,
};
use internet_times_bot::domain::traits::{FeedSource, Transport};
use internet_times_bot::infrastructure::config::Config;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Everything the dispatcher asked the transport to do
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Presence(String),
    Text { channel: String, text: String },
    Payload { channel: String, payload: ResponsePayload },
    Reaction { message_id: String, marker: String },
}

pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicUsize,
    latency: Option<Duration>,
    fail_sends: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            latency: Some(Duration::from_millis(42)),
            fail_sends: false,
        }
    }

    pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
        self.latency = latency;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn payloads(&self) -> Vec<ResponsePayload> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Payload { payload, .. } => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn record(&self, channel: &Channel, sent: Sent) -> Result<MessageRef, BotError> {
        if self.fail_sends {
            return Err(BotError::Transport("send refused".to_string()));
        }
        self.sent.lock().unwrap().push(sent);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(MessageRef::new(&channel.id, format!("m{}", id)))
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn set_presence(&self, activity: &str) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(Sent::Presence(activity.to_string()));
        Ok(())
    }

    async fn send_text(&self, channel: &Channel, text: &str) -> Result<MessageRef, BotError> {
        self.record(channel, Sent::Text {
            channel: channel.name.clone(),
            text: text.to_string(),
        })
    }

    async fn send_payload(&self, channel: &Channel, payload: &ResponsePayload) -> Result<MessageRef, BotError> {
        self.record(channel, Sent::Payload {
            channel: channel.name.clone(),
            payload: payload.clone(),
        })
    }

    async fn add_reaction(&self, message: &MessageRef, marker: &str) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(Sent::Reaction {
            message_id: message.message_id.clone(),
            marker: marker.to_string(),
        });
        Ok(())
    }

    async fn latency(&self) -> Option<Duration> {
        self.latency
    }
}

/// Scripted feed outcome
#[derive(Clone)]
pub enum FeedScript {
    Entry(FeedEntry),
    Empty,
    NetworkDown,
    Malformed,
}

pub struct StubFeed {
    script: FeedScript,
    calls: Arc<AtomicUsize>,
}

impl StubFeed {
    pub fn new(script: FeedScript) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl FeedSource for StubFeed {
    async fn fetch_latest(&self, _url: &str) -> Result<FeedEntry, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            FeedScript::Entry(entry) => Ok(entry.clone()),
            FeedScript::Empty => Err(FetchError::Empty),
            FeedScript::NetworkDown => Err(FetchError::Network("connection refused".to_string())),
            FeedScript::Malformed => Err(FetchError::Malformed("unexpected tag".to_string())),
        }
    }
}

pub fn sample_entry() -> FeedEntry {
    FeedEntry {
        title: "Chips get smaller again".to_string(),
        link: "https://www.theverge.com/chips".to_string(),
        author: "Jane Doe".to_string(),
        published_at: "2024-05-01T08:00:00-04:00".to_string(),
    }
}

/// Dispatcher with the built-in commands plus any extras
pub fn dispatcher_with(feed: StubFeed, extra: Vec<Command>) -> EventDispatcher {
    ensure_init();

    let mut registry = CommandRegistry::new();
    register_defaults(&mut registry).unwrap();
    for command in extra {
        registry.register(command).unwrap();
    }

    let app = AppContext::new(registry, Config::default(), Arc::new(feed));
    EventDispatcher::new(Arc::new(app))
}

pub fn dispatcher() -> EventDispatcher {
    dispatcher_with(StubFeed::new(FeedScript::Entry(sample_entry())), Vec::new())
}

pub fn author() -> User {
    User::new("42", "ada").with_nickname("Ada")
}

pub fn command(channel: &str, name: &str, raw_args: &str) -> Event {
    Event::MessageCommand {
        author: author(),
        channel: Channel::new("100", channel),
        command: name.to_string(),
        raw_args: raw_args.to_string(),
    }
}
