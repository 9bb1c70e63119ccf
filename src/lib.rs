//! Community chat bot for The Internet Times guild.
//!
//! Platform events are turned into [`domain::entities::Event`]s and handed to
//! the [`application::messaging::EventDispatcher`], which replies through a
//! [`domain::traits::Transport`].

pub mod domain;
pub mod application;
pub mod infrastructure;
