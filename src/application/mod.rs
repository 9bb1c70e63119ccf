//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Context: State passed to every handler
//! - Services: Built-in commands, formatting, polls
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing and event dispatching

pub mod context;
pub mod errors;
pub mod services;
pub mod messaging;
