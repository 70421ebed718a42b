//! Session Query Handlers - 会话读操作实现

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::SessionStorePort;
use crate::application::queries::{ExportChange, GetSession, GetTranscript, ListChanges};
use crate::application::replies;
use crate::domain::changes::Change;
use crate::domain::conversation::{ChatMessage, ChatMode};
use crate::domain::session::SessionId;

// ============================================================================
// Response DTOs
// ============================================================================

/// 会话状态视图
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session_id: SessionId,
    pub file_name: Option<String>,
    pub mode: ChatMode,
    pub in_flight: bool,
    pub message_count: usize,
    pub change_count: usize,
}

/// 导出文件
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetSession Handler
pub struct GetSessionHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl GetSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: GetSession) -> Result<SessionView, ApplicationError> {
        let handle = self.sessions.get(&query.session_id)?;

        Ok(handle.with(|session| SessionView {
            session_id: session.id(),
            file_name: session
                .manuscript()
                .map(|m| m.file_name().as_str().to_string()),
            mode: session.mode(),
            in_flight: session.is_in_flight(),
            message_count: session.transcript().len(),
            change_count: session.ledger().len(),
        }))
    }
}

/// GetTranscript Handler
pub struct GetTranscriptHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl GetTranscriptHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        query: GetTranscript,
    ) -> Result<Vec<ChatMessage>, ApplicationError> {
        let handle = self.sessions.get(&query.session_id)?;
        Ok(handle.with(|session| session.transcript().messages().to_vec()))
    }
}

/// ListChanges Handler
pub struct ListChangesHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl ListChangesHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: ListChanges) -> Result<Vec<Change>, ApplicationError> {
        let handle = self.sessions.get(&query.session_id)?;
        Ok(handle.with(|session| session.ledger().entries().to_vec()))
    }
}

/// ExportChange Handler
///
/// 文件名取自条目标题，与侧边栏的 .txt 下载一致
pub struct ExportChangeHandler {
    sessions: Arc<dyn SessionStorePort>,
}

impl ExportChangeHandler {
    pub fn new(sessions: Arc<dyn SessionStorePort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: ExportChange) -> Result<ExportFile, ApplicationError> {
        let handle = self.sessions.get(&query.session_id)?;

        handle.with(|session| {
            let change = session
                .ledger()
                .find(&query.change_id)
                .ok_or_else(|| ApplicationError::not_found("Change", query.change_id))?;
            Ok(export_file(change))
        })
    }
}

fn export_file(change: &Change) -> ExportFile {
    match change {
        Change::GenresAndTags { items, .. } => ExportFile {
            file_name: format!("{}.txt", replies::GENRES_EXPORT_TITLE),
            content: items.join("\n"),
        },
        Change::ChapterSummary { title, summary, .. } => ExportFile {
            file_name: format!("{}.txt", title),
            content: summary.clone(),
        },
        Change::Annotation {
            title, annotation, ..
        } => ExportFile {
            file_name: format!("{}.txt", title),
            content: annotation.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_named_by_title() {
        let change = Change::chapter_summary("Встреча с драконом", "Краткое содержание сцены.");
        let file = export_file(&change);

        assert_eq!(file.file_name, "Встреча с драконом.txt");
        assert_eq!(file.content, "Краткое содержание сцены.");
    }

    #[test]
    fn test_export_genres_joined_by_newline() {
        let change =
            Change::genres_and_tags(vec!["фэнтези".to_string(), "драма".to_string()]).unwrap();
        let file = export_file(&change);

        assert_eq!(file.file_name, "Жанры и теги.txt");
        assert_eq!(file.content, "фэнтези\nдрама");
    }

    #[test]
    fn test_export_annotation_content() {
        let change = Change::annotation("Аннотация к книге", "Текст аннотации.");
        let file = export_file(&change);

        assert_eq!(file.file_name, "Аннотация к книге.txt");
        assert_eq!(file.content, "Текст аннотации.");
    }
}
