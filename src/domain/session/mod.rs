//! Session Context - 会话限界上下文
//!
//! 职责:
//! - 会话聚合：手稿 + 会话记录 + 变更历史 + 交互模式 + in_flight
//! - 单飞门控与重置语义

mod aggregate;
mod errors;

pub use aggregate::{Session, SessionId};
pub use errors::SessionError;
