use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Reply payload. `chat_open_time` is only serialized on provider success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_open_time: Option<String>,
}

impl ChatReply {
    /// A reply with no timestamp metadata.
    pub fn notice(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            time: String::new(),
            chat_open_time: None,
        }
    }
}
