use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-caller state carried between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub last_message_time: Option<DateTime<Utc>>,
}

impl Session {
    /// Decode a stored session. Anything unreadable is treated as a fresh session.
    pub fn decode(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
