//! Application State
//!
//! 包含全部 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ApplyAnnotationHandler, ApplyGenresHandler, LoadManuscriptHandler, ResetSessionHandler,
    SelectModeHandler, SendMessageHandler,
    // Query handlers
    ExportChangeHandler, GetSessionHandler, GetTranscriptHandler, ListChangesHandler,
    // Ports
    AssistantPort, SessionStorePort,
};

/// 应用状态
///
/// SessionStore 为内存实现；Assistant 为 HTTP 网关实现
pub struct AppState {
    // ========== Ports ==========
    pub sessions: Arc<dyn SessionStorePort>,
    pub assistant: Arc<dyn AssistantPort>,

    // ========== Command Handlers ==========
    pub load_manuscript_handler: LoadManuscriptHandler,
    pub reset_session_handler: ResetSessionHandler,
    pub send_message_handler: SendMessageHandler,
    pub select_mode_handler: SelectModeHandler,
    pub apply_genres_handler: ApplyGenresHandler,
    pub apply_annotation_handler: ApplyAnnotationHandler,

    // ========== Query Handlers ==========
    pub get_session_handler: GetSessionHandler,
    pub get_transcript_handler: GetTranscriptHandler,
    pub list_changes_handler: ListChangesHandler,
    pub export_change_handler: ExportChangeHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(sessions: Arc<dyn SessionStorePort>, assistant: Arc<dyn AssistantPort>) -> Self {
        Self {
            // Ports
            sessions: sessions.clone(),
            assistant: assistant.clone(),

            // Command handlers
            load_manuscript_handler: LoadManuscriptHandler::new(sessions.clone()),
            reset_session_handler: ResetSessionHandler::new(sessions.clone()),
            send_message_handler: SendMessageHandler::new(sessions.clone(), assistant.clone()),
            select_mode_handler: SelectModeHandler::new(sessions.clone(), assistant.clone()),
            apply_genres_handler: ApplyGenresHandler::new(sessions.clone()),
            apply_annotation_handler: ApplyAnnotationHandler::new(sessions.clone()),

            // Query handlers
            get_session_handler: GetSessionHandler::new(sessions.clone()),
            get_transcript_handler: GetTranscriptHandler::new(sessions.clone()),
            list_changes_handler: ListChangesHandler::new(sessions.clone()),
            export_change_handler: ExportChangeHandler::new(sessions),
        }
    }
}
