pub mod prompt;
mod service;

pub use service::{ChatReply, ChatService, ReplySettings};
