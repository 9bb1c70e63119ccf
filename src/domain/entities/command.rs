use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::context::CommandContext;
use crate::application::errors::{CommandError, RegistryError};
use crate::domain::entities::Reply;

/// Command handler result
pub type HandlerResult = Result<Reply, CommandError>;

/// Command handler - invoked with the tokenized arguments once arity has been checked
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext<'_>, args: &[String]) -> HandlerResult;
}

/// Adapter for handlers that never await
pub struct FnHandler<F>(F);

#[async_trait]
impl<F> CommandHandler for FnHandler<F>
where
    F: Fn(&CommandContext<'_>, &[String]) -> HandlerResult + Send + Sync,
{
    async fn handle(&self, ctx: &CommandContext<'_>, args: &[String]) -> HandlerResult {
        (self.0)(ctx, args)
    }
}

/// Positional argument bounds for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl Arity {
    /// No positional parameters; trailing text is ignored unparsed
    pub const NONE: Arity = Arity { min: 0, max: Some(0) };

    pub fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self { min, max: Some(max) }
    }

    pub fn takes_arguments(&self) -> bool {
        *self != Self::NONE
    }
}

/// Represents a bot command
pub struct Command {
    pub name: String,
    pub description: Option<String>,
    pub arity: Arity,
    pub handler: Box<dyn CommandHandler>,
}

impl Command {
    pub fn new<H: CommandHandler + 'static>(name: impl Into<String>, handler: H) -> Self {
        Self {
            name: name.into(),
            description: None,
            arity: Arity::NONE,
            handler: Box::new(handler),
        }
    }

    /// Build a command around a plain closure
    pub fn from_fn<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&CommandContext<'_>, &[String]) -> HandlerResult + Send + Sync + 'static,
    {
        Self::new(name, FnHandler(handler))
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Check a token count against the declared arity
    pub fn check_arity(&self, count: usize) -> Result<(), CommandError> {
        if !self.arity.takes_arguments() {
            return Ok(());
        }
        if count < self.arity.min {
            return Err(CommandError::MissingArgument {
                expected: self.arity.min,
                got: count,
            });
        }
        if let Some(max) = self.arity.max {
            if count > max {
                return Err(CommandError::TooManyArguments { max, got: count });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Command registry, filled at startup and read-only afterwards
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if self.commands.contains_key(&command.name) {
            return Err(RegistryError::Duplicate(command.name));
        }
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    /// Exact, case-sensitive lookup
    pub fn resolve(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
