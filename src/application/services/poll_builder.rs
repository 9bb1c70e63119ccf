//! Poll builder - numbered-choice polls with voting reactions

use crate::application::errors::ValidationError;
use crate::application::services::formatter;
use crate::domain::entities::{PollMessage, PollSpec};

/// Validate a question and its options
pub fn build(question: impl Into<String>, options: Vec<String>) -> Result<PollSpec, ValidationError> {
    PollSpec::new(question, options)
}

/// Render a validated poll together with one marker per option, in order
pub fn message(spec: &PollSpec, created_by: &str) -> PollMessage {
    PollMessage {
        payload: formatter::poll(spec, created_by),
        markers: spec.choices().map(|(marker, _)| marker).collect(),
    }
}
