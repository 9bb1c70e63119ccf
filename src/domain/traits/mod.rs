//! Domain traits - Abstractions for infrastructure implementations

pub mod transport;
pub mod feed;

pub use transport::Transport;
pub use feed::FeedSource;
