//! Chat Commands - 会话交互命令

use crate::domain::conversation::{ChatMessage, ChatMode};
use crate::domain::session::SessionId;

/// 自由文本输入命令 - 按当前交互模式路由到对应后端操作
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub session_id: SessionId,
    pub text: String,
}

/// 选择交互模式命令
#[derive(Debug, Clone)]
pub struct SelectModeCommand {
    pub session_id: SessionId,
    pub mode: ChatMode,
}

/// 应用体裁/标签选择命令（允许空选择）
#[derive(Debug, Clone)]
pub struct ApplyGenresCommand {
    pub session_id: SessionId,
    pub items: Vec<String>,
}

/// 应用简介文稿命令
#[derive(Debug, Clone)]
pub struct ApplyAnnotationCommand {
    pub session_id: SessionId,
    pub annotation: String,
}

/// 会话交互响应 - 本次意图新追加的消息与最新状态
#[derive(Debug, Clone)]
pub struct ChatExchangeResponse {
    pub session_id: SessionId,
    pub mode: ChatMode,
    pub messages: Vec<ChatMessage>,
    /// 本次意图是否向变更历史追加了条目（供渲染层做提示用）
    pub change_added: bool,
}
