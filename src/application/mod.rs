//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Assistant、SessionStore）
//! - commands: CQRS 命令及处理器（会话控制器与模式控制器在这里）
//! - queries: CQRS 查询及处理器
//! - replies: 写入会话记录的固定话术
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod replies;

// Re-exports
pub use commands::{
    // Chat commands
    ApplyAnnotationCommand,
    ApplyGenresCommand,
    ChatExchangeResponse,
    SelectModeCommand,
    SendMessageCommand,
    // Session commands
    LoadManuscriptCommand,
    LoadManuscriptResponse,
    ResetSessionCommand,
    ResetSessionResponse,
    // Handlers
    handlers::{
        ApplyAnnotationHandler, ApplyGenresHandler, LoadManuscriptHandler, ResetSessionHandler,
        SelectModeHandler, SendMessageHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    AnnotationRefinement, AssistantError, AssistantPort, SceneSummary, SessionHandle,
    SessionStoreError, SessionStorePort,
};

pub use queries::{
    ExportChange,
    GetSession,
    GetTranscript,
    ListChanges,
    // Handlers
    handlers::{
        ExportChangeHandler, ExportFile, GetSessionHandler, GetTranscriptHandler,
        ListChangesHandler, SessionView,
    },
};
