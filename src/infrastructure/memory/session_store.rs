//! In-Memory Session Store Implementation

use std::sync::Arc;

use dashmap::DashMap;

use crate::application::ports::{SessionHandle, SessionStoreError, SessionStorePort};
use crate::domain::session::{Session, SessionId};

/// 内存会话存储
///
/// 进程内唯一的会话状态来源，没有任何持久化：重启即全部丢失
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, SessionHandle>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorePort for InMemorySessionStore {
    fn insert(&self, session: Session) -> Result<SessionId, SessionStoreError> {
        let session_id = session.id();
        if self.sessions.contains_key(&session_id) {
            return Err(SessionStoreError::AlreadyExists(session_id.to_string()));
        }
        self.sessions.insert(session_id, SessionHandle::new(session));
        tracing::info!(session_id = %session_id, "Session created");
        Ok(session_id)
    }

    fn get(&self, id: &SessionId) -> Result<SessionHandle, SessionStoreError> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| SessionStoreError::NotFound(id.to_string()))
    }

    fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    fn remove(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .remove(id)
            .map(|_| {
                tracing::info!(session_id = %id, "Session removed");
            })
            .ok_or_else(|| SessionStoreError::NotFound(id.to_string()))
    }

    fn list_all(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ChatMessage;

    #[test]
    fn test_session_store_lifecycle() {
        let store = InMemorySessionStore::new();
        let session = Session::new();
        let session_id = session.id();

        // Insert
        assert!(store.insert(session).is_ok());
        assert!(store.contains(&session_id));

        // Get + mutate through handle
        let handle = store.get(&session_id).unwrap();
        handle.with(|s| s.push_message(ChatMessage::ai_text("привет")));

        // Mutation visible through a fresh handle
        let again = store.get(&session_id).unwrap();
        assert_eq!(again.snapshot().transcript().len(), 1);

        // Remove
        assert!(store.remove(&session_id).is_ok());
        assert!(!store.contains(&session_id));
        assert!(store.get(&session_id).is_err());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let store = InMemorySessionStore::new();
        let session = Session::new();
        let twin = session.clone();

        assert!(store.insert(session).is_ok());
        assert!(matches!(
            store.insert(twin),
            Err(SessionStoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_list_all() {
        let store = InMemorySessionStore::new();
        let a = store.insert(Session::new()).unwrap();
        let b = store.insert(Session::new()).unwrap();

        let mut ids = store.list_all();
        ids.sort_by_key(|id| id.to_string());
        let mut expected = vec![a, b];
        expected.sort_by_key(|id| id.to_string());
        assert_eq!(ids, expected);
    }
}
