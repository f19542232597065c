//! Message handling for `POST /chat`
//!
//! Validates the message, applies the per-session rate limit, calls the
//! completion provider and attaches de-duplicated timestamps to the reply.
//! Every path produces a `ChatReply`; nothing is propagated to the caller.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::completion::{CompletionProvider, CompletionRequest};
use crate::config::BizbotConfig;
use crate::models::{ChatReply, Session};
use crate::persona;
use crate::timestamps::{clock_string, TimestampTracker};

pub const EMPTY_MESSAGE_REPLY: &str = "Please enter a message.";
pub const THROTTLED_REPLY: &str = "You're sending messages too quickly. Please wait a moment.";
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again later.";

/// Fixed inputs of every completion call plus the rate-limit interval.
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    pub system_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub min_message_interval: Duration,
}

impl HandlerSettings {
    pub fn from_config(config: &BizbotConfig) -> Self {
        let interval_ms = i64::try_from(config.chat.min_message_interval_ms).unwrap_or(i64::MAX);
        Self {
            system_prompt: persona::system_prompt(config.chat.system_prompt.as_deref()).to_string(),
            model: config.completion.model.clone(),
            temperature: config.completion.temperature,
            max_tokens: config.completion.max_tokens,
            min_message_interval: Duration::milliseconds(interval_ms),
        }
    }
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self::from_config(&BizbotConfig::default())
    }
}

/// Source of the instant a reply is produced at.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct MessageHandler {
    provider: Arc<dyn CompletionProvider>,
    settings: HandlerSettings,
    timestamps: TimestampTracker,
    clock: Clock,
}

impl MessageHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: HandlerSettings) -> Self {
        Self {
            provider,
            settings,
            timestamps: TimestampTracker::new(),
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock used for reply timestamps.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    pub fn timestamps(&self) -> &TimestampTracker {
        &self.timestamps
    }

    /// Handle one chat message for `session`, arriving at `now`.
    ///
    /// `now` drives the rate limit; the displayed time is read from the clock
    /// once the provider has answered.
    pub async fn handle(&self, message: &str, session: &mut Session, now: DateTime<Utc>) -> ChatReply {
        let message = message.trim();
        if message.is_empty() {
            return ChatReply::notice(EMPTY_MESSAGE_REPLY);
        }

        if let Some(last) = session.last_message_time {
            if now - last < self.settings.min_message_interval {
                tracing::debug!(since_last_ms = (now - last).num_milliseconds(), "Message throttled");
                return ChatReply::notice(THROTTLED_REPLY);
            }
        }
        session.last_message_time = Some(now);

        let request = CompletionRequest {
            system: self.settings.system_prompt.clone(),
            message: message.to_string(),
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        match self.provider.complete(&request).await {
            Ok(reply) => {
                let mark = self.timestamps.observe(&clock_string((self.clock)()));
                ChatReply {
                    reply,
                    time: mark.time,
                    chat_open_time: Some(mark.chat_open_time),
                }
            }
            Err(e) => {
                tracing::error!(provider = self.provider.name(), error = %e, "Completion failed");
                ChatReply::notice(FALLBACK_REPLY)
            }
        }
    }
}
