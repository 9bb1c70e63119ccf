use super::ResponsePayload;
use crate::application::errors::ValidationError;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 10;

/// Reaction markers, index-aligned with poll options
pub const MARKERS: [&str; MAX_OPTIONS] = [
    "1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", "6️⃣", "7️⃣", "8️⃣", "9️⃣", "🔟",
];

/// A validated poll: question plus 2..=10 options in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSpec {
    question: String,
    options: Vec<String>,
}

impl PollSpec {
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Result<Self, ValidationError> {
        if options.len() > MAX_OPTIONS {
            return Err(ValidationError::TooManyOptions(options.len()));
        }
        if options.len() < MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions(options.len()));
        }

        Ok(Self {
            question: question.into(),
            options,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Marker/option pairs in input order
    pub fn choices(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        MARKERS.iter().copied().zip(self.options.iter().map(String::as_str))
    }
}

/// Poll payload plus the reactions to attach after it is delivered
#[derive(Debug, Clone, PartialEq)]
pub struct PollMessage {
    pub payload: ResponsePayload,
    pub markers: Vec<&'static str>,
}
