//! Domain Layer - 领域层
//!
//! 包含四个限界上下文:
//! - Conversation Context: 会话记录与交互模式
//! - Changes Context: 变更历史
//! - Manuscript Context: 手稿持有
//! - Session Context: 会话聚合与单飞门控

pub mod changes;
pub mod conversation;
pub mod manuscript;
pub mod session;
