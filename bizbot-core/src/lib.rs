pub mod completion;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod persona;
pub mod timestamps;

pub use completion::{CompletionError, CompletionProvider, CompletionRequest, OpenAiCompletionClient};
pub use config::BizbotConfig;
pub use error::BizbotError;
pub use handler::{HandlerSettings, MessageHandler};
pub use models::{ChatReply, ChatRequest, Session};
pub use timestamps::{clock_string, TimestampTracker};
