//! Event handling - parsing and dispatching platform events

pub mod dispatcher;
pub mod parser;

pub use dispatcher::EventDispatcher;
pub use parser::{tokenize, CommandParser};
