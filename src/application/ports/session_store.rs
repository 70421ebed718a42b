//! Session Store Port - 会话存取抽象
//!
//! 定义会话存取的抽象接口，具体实现在 infrastructure/memory 层。
//! 会话状态只存活在内存里，进程退出即消失

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::domain::session::{Session, SessionId};

/// Session Store 错误
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session already exists: {0}")]
    AlreadyExists(String),
}

/// 会话句柄
///
/// 聚合的复合状态迁移必须原子执行，所以句柄持有整把锁；
/// 锁只在同步代码段内持有，绝不跨越 await 点
#[derive(Debug, Clone)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// 在锁内执行一段状态迁移
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// 当前状态的克隆快照（查询用）
    pub fn snapshot(&self) -> Session {
        self.with(|session| session.clone())
    }
}

/// Session Store Port
pub trait SessionStorePort: Send + Sync {
    /// 放入新会话
    fn insert(&self, session: Session) -> Result<SessionId, SessionStoreError>;

    /// 取会话句柄
    fn get(&self, id: &SessionId) -> Result<SessionHandle, SessionStoreError>;

    /// 会话是否存在
    fn contains(&self, id: &SessionId) -> bool;

    /// 移除会话
    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError>;

    /// 全部会话 ID
    fn list_all(&self) -> Vec<SessionId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_mutations_are_shared() {
        let handle = SessionHandle::new(Session::new());
        let twin = handle.clone();

        handle.with(|session| {
            session.push_message(crate::domain::conversation::ChatMessage::ai_text("привет"))
        });

        assert_eq!(twin.snapshot().transcript().len(), 1);
    }
}
