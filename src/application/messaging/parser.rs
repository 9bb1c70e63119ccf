//! Command parser - turns raw message text into command events

use crate::application::errors::TokenizeError;
use crate::domain::entities::{Channel, Event, User};

/// Recognises prefixed commands in message text
pub struct CommandParser {
    command_prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a message; `None` when it is not a command
    pub fn parse(&self, author: User, channel: Channel, text: &str) -> Option<Event> {
        let rest = text.strip_prefix(self.command_prefix.as_str())?;

        // Command name runs up to the first whitespace; the remainder is tokenized later
        let (command, raw_args) = match rest.find(char::is_whitespace) {
            Some(idx) => (&rest[..idx], rest[idx..].trim_start()),
            None => (rest, ""),
        };

        Some(Event::MessageCommand {
            author,
            channel,
            command: command.to_string(),
            raw_args: raw_args.to_string(),
        })
    }
}

/// Split a raw argument string on whitespace, keeping double-quoted substrings whole.
///
/// Inside quotes `\"` and `\\` are escapes. A closing quote must be followed by
/// whitespace or the end of input, and a bare word may not contain a quote.
pub fn tokenize(raw: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut chars = raw.char_indices().peekable();

    loop {
        while chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
            chars.next();
        }
        let Some((start, first)) = chars.next() else {
            break;
        };

        let mut token = String::new();
        if first == '"' {
            let mut closed = false;
            while let Some((pos, c)) = chars.next() {
                match c {
                    '\\' => match chars.peek() {
                        Some(&(_, next)) if next == '"' || next == '\\' => {
                            token.push(next);
                            chars.next();
                        }
                        _ => token.push('\\'),
                    },
                    '"' => {
                        if chars.peek().is_some_and(|&(_, next)| !next.is_whitespace()) {
                            return Err(TokenizeError::InvalidEndOfQuote(pos));
                        }
                        closed = true;
                        break;
                    }
                    _ => token.push(c),
                }
            }
            if !closed {
                return Err(TokenizeError::UnclosedQuote(start));
            }
        } else {
            token.push(first);
            while let Some(&(pos, c)) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                if c == '"' {
                    return Err(TokenizeError::UnexpectedQuote(pos));
                }
                token.push(c);
                chars.next();
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}
