//! Agent module: the persona prompt and the chat loop.

pub mod chat;
pub mod prompt;

pub use chat::{APOLOGY, AgentDeps, ChatAgent};
