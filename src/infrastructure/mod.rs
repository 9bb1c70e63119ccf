//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Feed: Syndication feed client
//! - Adapters: Platform integrations (Discord, console)

pub mod config;
pub mod feed;
pub mod adapters;
