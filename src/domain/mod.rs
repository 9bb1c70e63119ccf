//! Domain layer - Core business objects and the seams to the outside world
//!
//! This layer contains:
//! - Entities: Events, payloads, commands, polls
//! - Traits: Abstractions for infrastructure (Transport, FeedSource)

pub mod entities;
pub mod traits;
