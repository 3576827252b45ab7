pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod sentiment;
pub mod server;

pub use error::{Error, Result};
