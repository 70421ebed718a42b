//! Session Command Handlers - 会话生命周期编排

use std::sync::Arc;

use crate::application::commands::session_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::SessionStorePort;
use crate::application::replies;
use crate::domain::conversation::ChatMessage;
use crate::domain::manuscript::{FileName, Manuscript};
use crate::domain::session::Session;

/// LoadManuscript Handler - 装载手稿
///
/// 文本内容在到达这里之前已由摄取层解码为 UTF-8；这里不再做内容校验
pub struct LoadManuscriptHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl LoadManuscriptHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: LoadManuscriptCommand,
    ) -> Result<LoadManuscriptResponse, ApplicationError> {
        let file_name = FileName::new(cmd.file_name).map_err(ApplicationError::validation)?;
        let display_name = file_name.as_str().to_string();
        let manuscript = Manuscript::new(file_name, cmd.content);
        let char_count = manuscript.char_count();

        // 装载成功的副作用：写入一条提及文件名的开场白
        let intro = ChatMessage::ai_text(replies::manuscript_loaded(&display_name));

        let session_id = match cmd.session_id {
            // 替换既有会话的手稿（无条件替换）
            Some(session_id) => {
                let handle = self.sessions.get(&session_id)?;
                handle.with(|session| -> Result<(), ApplicationError> {
                    session
                        .ensure_idle()
                        .map_err(|e| ApplicationError::from_session(&session_id, e))?;
                    session.set_manuscript(manuscript);
                    session.push_message(intro.clone());
                    Ok(())
                })?;
                session_id
            }
            // 创建新会话
            None => {
                let mut session = Session::new();
                session.set_manuscript(manuscript);
                session.push_message(intro.clone());
                self.sessions.insert(session)?
            }
        };

        tracing::info!(
            session_id = %session_id,
            file_name = %display_name,
            chars = char_count,
            "Manuscript loaded"
        );

        Ok(LoadManuscriptResponse {
            session_id,
            file_name: display_name,
            messages: vec![intro],
        })
    }
}

/// ResetSession Handler - 重置会话
///
/// 会话槽位保留（渲染层继续持有同一个 ID），内容整体清空；
/// 代数推进使仍在途的后端结果失效
pub struct ResetSessionHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl ResetSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: ResetSessionCommand,
    ) -> Result<ResetSessionResponse, ApplicationError> {
        let handle = self.sessions.get(&cmd.session_id)?;
        handle.with(|session| session.reset());

        tracing::info!(session_id = %cmd.session_id, "Session reset");

        Ok(ResetSessionResponse {
            session_id: cmd.session_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ChatMode;
    use crate::infrastructure::memory::InMemorySessionStore;

    fn load_command(content: &str) -> LoadManuscriptCommand {
        LoadManuscriptCommand {
            session_id: None,
            file_name: "book.txt".to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_appends_intro_mentioning_file_name() {
        let sessions = InMemorySessionStore::new().arc();
        let handler = LoadManuscriptHandler::new(sessions.clone());

        let response = handler.handle(load_command("Текст книги")).await.unwrap();

        let session = sessions.get(&response.session_id).unwrap().snapshot();
        assert_eq!(session.transcript().len(), 1);
        match &session.transcript().messages()[0] {
            ChatMessage::Text { text, .. } => assert!(text.contains("\"book.txt\"")),
            other => panic!("unexpected message: {:?}", other),
        }
        assert_eq!(session.mode(), ChatMode::Default);
    }

    #[tokio::test]
    async fn test_upload_into_existing_session_replaces_manuscript() {
        let sessions = InMemorySessionStore::new().arc();
        let handler = LoadManuscriptHandler::new(sessions.clone());

        let first = handler.handle(load_command("Первый текст")).await.unwrap();
        let second = handler
            .handle(LoadManuscriptCommand {
                session_id: Some(first.session_id),
                file_name: "другая.txt".to_string(),
                content: "Второй текст".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(first.session_id, second.session_id);

        let session = sessions.get(&first.session_id).unwrap().snapshot();
        let manuscript = session.require_manuscript().unwrap();
        assert_eq!(manuscript.file_name().as_str(), "другая.txt");
        assert_eq!(manuscript.content(), "Второй текст");
        // 两条开场白：一次上传一条
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_rejects_blank_file_name() {
        let sessions = InMemorySessionStore::new().arc();
        let handler = LoadManuscriptHandler::new(sessions);

        let result = handler
            .handle(LoadManuscriptCommand {
                session_id: None,
                file_name: "  ".to_string(),
                content: "Текст".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_reset_leaves_empty_session_in_store() {
        let sessions = InMemorySessionStore::new().arc();
        let load = LoadManuscriptHandler::new(sessions.clone());
        let reset = ResetSessionHandler::new(sessions.clone());

        let session_id = load
            .handle(load_command("Текст книги"))
            .await
            .unwrap()
            .session_id;
        reset
            .handle(ResetSessionCommand { session_id })
            .await
            .unwrap();

        let session = sessions.get(&session_id).unwrap().snapshot();
        assert!(session.manuscript().is_none());
        assert!(session.transcript().is_empty());
        assert!(session.ledger().is_empty());
        assert_eq!(session.mode(), ChatMode::Default);
        assert!(!session.is_in_flight());
    }
}
