//! Domain entities - Core business objects

pub mod user;
pub mod guild;
pub mod event;
pub mod payload;
pub mod feed;
pub mod poll;
pub mod reply;
pub mod command;

pub use user::User;
pub use guild::{Channel, Guild, Member};
pub use event::{Event, CommandErrorKind};
pub use payload::{Accent, Field, MessageRef, ResponsePayload};
pub use feed::FeedEntry;
pub use poll::{PollMessage, PollSpec};
pub use reply::Reply;
pub use command::{Arity, Command, CommandHandler, CommandRegistry, HandlerResult};
