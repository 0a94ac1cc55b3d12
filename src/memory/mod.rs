//! 记忆层：有上限的对话日志

pub mod conversation;

pub use conversation::{ConversationMemory, Message, Role, MAX_CONTEXT_MESSAGES};
