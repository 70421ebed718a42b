//! 应用层错误定义
//!
//! 统一的命令/查询错误类型
//!
//! 注意：后端调用失败不会走到这里——会话控制器把它恢复成一条面向用户
//! 的致歉消息写入会话记录（见命令处理器）

use thiserror::Error;

use crate::domain::session::{SessionError, SessionId};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 会话已有调用在途（提交被忽略，状态未被改动）
    #[error("Operation already in flight for session {0}")]
    OperationInFlight(String),

    /// 状态无效
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// 把会话领域错误映射到应用层错误
    pub fn from_session(session_id: &SessionId, err: SessionError) -> Self {
        match err {
            SessionError::Busy => Self::OperationInFlight(session_id.to_string()),
            SessionError::NoManuscript => Self::InvalidState(format!(
                "No manuscript loaded for session {}",
                session_id
            )),
        }
    }
}

impl From<crate::application::ports::SessionStoreError> for ApplicationError {
    fn from(err: crate::application::ports::SessionStoreError) -> Self {
        use crate::application::ports::SessionStoreError;
        match err {
            SessionStoreError::NotFound(id) => Self::NotFound {
                resource_type: "Session",
                id,
            },
            SessionStoreError::AlreadyExists(id) => {
                Self::InternalError(format!("Session already exists: {}", id))
            }
        }
    }
}
