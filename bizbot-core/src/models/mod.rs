pub mod chat;
pub mod session;

pub use chat::{ChatReply, ChatRequest};
pub use session::Session;
