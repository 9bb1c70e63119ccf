//! Application layer errors

use thiserror::Error;

use crate::domain::entities::CommandErrorKind;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Missing arguments: expected at least {expected}, got {got}")]
    MissingArgument { expected: usize, got: usize },

    #[error("Too many arguments: expected at most {max}, got {got}")]
    TooManyArguments { max: usize, got: usize },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(#[from] TokenizeError),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl CommandError {
    /// Collapse into the closed set of kinds the dispatcher answers
    pub fn kind(&self) -> CommandErrorKind {
        match self {
            CommandError::MissingArgument { .. } => CommandErrorKind::MissingArgument,
            CommandError::TooManyArguments { .. } => CommandErrorKind::TooManyArguments,
            CommandError::PermissionDenied => CommandErrorKind::MissingPermission,
            other => CommandErrorKind::Unexpected(other.to_string()),
        }
    }
}

/// Raw argument tokenization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("Expected closing quote for argument starting at {0}")]
    UnclosedQuote(usize),

    #[error("Unexpected quote mark at {0} in non-quoted string")]
    UnexpectedQuote(usize),

    #[error("Expected space after closing quote at {0}")]
    InvalidEndOfQuote(usize),
}

/// Feed fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Feed has no entries")]
    Empty,

    #[error("Malformed feed: {0}")]
    Malformed(String),
}

/// Poll validation errors; the message is shown to the user as-is
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("You need at least 2 options to create a poll.")]
    TooFewOptions(usize),

    #[error("You can only have a maximum of 10 options.")]
    TooManyOptions(usize),
}

/// Command registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    Duplicate(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
