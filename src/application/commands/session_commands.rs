//! Session Commands - 会话生命周期命令

use crate::domain::conversation::ChatMessage;
use crate::domain::session::SessionId;

/// 装载手稿命令
///
/// 不带 session_id 时创建新会话；带 session_id 时无条件替换该会话的手稿
#[derive(Debug, Clone)]
pub struct LoadManuscriptCommand {
    pub session_id: Option<SessionId>,
    pub file_name: String,
    pub content: String,
}

/// 装载手稿响应
#[derive(Debug, Clone)]
pub struct LoadManuscriptResponse {
    pub session_id: SessionId,
    pub file_name: String,
    pub messages: Vec<ChatMessage>,
}

/// 重置会话命令 - 丢弃全部状态，回到未装载手稿的空会话
#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: SessionId,
}

/// 重置会话响应
#[derive(Debug, Clone)]
pub struct ResetSessionResponse {
    pub session_id: SessionId,
}
