use std::sync::Mutex;

use chrono::{DateTime, Local, Utc};

/// Render an instant as a local 12-hour clock string, e.g. `09:05 AM`.
pub fn clock_string(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%I:%M %p").to_string()
}

/// What a reply should show for the time it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampMark {
    /// The clock string, or empty when it repeats the previous one.
    pub time: String,
    /// First clock string ever observed, or empty when `time` is empty.
    pub chat_open_time: String,
}

#[derive(Debug, Default)]
struct TimestampState {
    last_timestamp: Option<String>,
    chat_open_time: Option<String>,
}

/// Process-wide timestamp de-duplication shared by every session.
#[derive(Debug, Default)]
pub struct TimestampTracker {
    state: Mutex<TimestampState>,
}

impl TimestampTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current_time` and decide whether it should be shown.
    pub fn observe(&self, current_time: &str) -> TimestampMark {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if state.chat_open_time.is_none() {
            state.chat_open_time = Some(current_time.to_string());
        }

        let show = state.last_timestamp.as_deref() != Some(current_time);
        if show {
            state.last_timestamp = Some(current_time.to_string());
        }

        TimestampMark {
            time: if show {
                current_time.to_string()
            } else {
                String::new()
            },
            chat_open_time: match (&state.chat_open_time, show) {
                (Some(open), true) => open.clone(),
                _ => String::new(),
            },
        }
    }

    pub fn chat_open_time(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .chat_open_time
            .clone()
    }
}
