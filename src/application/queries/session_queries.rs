//! Session Queries - 会话读操作

use crate::domain::changes::ChangeId;
use crate::domain::session::SessionId;

/// 会话状态查询
#[derive(Debug, Clone)]
pub struct GetSession {
    pub session_id: SessionId,
}

/// 会话记录查询
#[derive(Debug, Clone)]
pub struct GetTranscript {
    pub session_id: SessionId,
}

/// 变更历史查询
#[derive(Debug, Clone)]
pub struct ListChanges {
    pub session_id: SessionId,
}

/// 变更导出查询
#[derive(Debug, Clone)]
pub struct ExportChange {
    pub session_id: SessionId,
    pub change_id: ChangeId,
}
