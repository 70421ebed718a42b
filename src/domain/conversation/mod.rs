//! Conversation Context - 会话限界上下文
//!
//! 职责:
//! - 异构消息模型
//! - 仅追加的会话记录
//! - 交互模式

mod message;
mod mode;
mod transcript;

pub use message::{ChatMessage, MessageId, Sender};
pub use mode::ChatMode;
pub use transcript::Transcript;
