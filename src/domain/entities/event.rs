use super::{Channel, Member, User};

/// Classified command failure, routed through [`Event::CommandError`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandErrorKind {
    MissingArgument,
    TooManyArguments,
    MissingPermission,
    UnknownCommand,
    Unexpected(String),
}

/// Inbound platform event, consumed once by the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Ready {
        bot_name: String,
        guild_count: usize,
    },
    MemberJoin(Member),
    MessageCommand {
        author: User,
        channel: Channel,
        command: String,
        raw_args: String,
    },
    CommandError {
        kind: CommandErrorKind,
        channel: Channel,
        command: Option<String>,
    },
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Ready { .. } => "ready",
            Event::MemberJoin(_) => "member_join",
            Event::MessageCommand { .. } => "message_command",
            Event::CommandError { .. } => "command_error",
        }
    }
}
