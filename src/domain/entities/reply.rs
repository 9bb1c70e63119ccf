use super::{PollMessage, ResponsePayload};

/// What a command handler wants delivered back to the invoking channel
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Payload(ResponsePayload),
    Poll(PollMessage),
    Nothing,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

impl From<ResponsePayload> for Reply {
    fn from(payload: ResponsePayload) -> Self {
        Reply::Payload(payload)
    }
}

impl From<PollMessage> for Reply {
    fn from(poll: PollMessage) -> Self {
        Reply::Poll(poll)
    }
}
