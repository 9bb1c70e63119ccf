//! Application services - Commands, formatting, polls

pub mod command_service;
pub mod formatter;
pub mod poll_builder;

pub use command_service::register_defaults;
