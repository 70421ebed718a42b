//! Chat HTTP Handlers
//!
//! 用户意图入口：自由文本、模式选择、应用生成结果、读取会话记录

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    ApplyAnnotationCommand, ApplyGenresCommand, ChatExchangeResponse, GetTranscript,
    SelectModeCommand, SendMessageCommand,
};
use crate::domain::conversation::ChatMode;
use crate::domain::session::SessionId;
use crate::infrastructure::http::dto::{messages_to_dto, ApiResponse, MessageDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Shared exchange DTO
// ============================================================================

/// 一次意图的结果：新追加的消息 + 最新模式 + 是否记了变更
#[derive(Debug, Serialize)]
pub struct ChatExchangeDto {
    pub session_id: String,
    pub mode: ChatMode,
    pub messages: Vec<MessageDto>,
    pub change_added: bool,
}

impl From<ChatExchangeResponse> for ChatExchangeDto {
    fn from(response: ChatExchangeResponse) -> Self {
        Self {
            session_id: response.session_id.to_string(),
            mode: response.mode,
            messages: messages_to_dto(&response.messages),
            change_added: response.change_added,
        }
    }
}

// ============================================================================
// Send Message
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub session_id: SessionId,
    pub text: String,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<ApiResponse<ChatExchangeDto>>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Message text is empty".to_string()));
    }

    let cmd = SendMessageCommand {
        session_id: req.session_id,
        text: req.text,
    };

    let result = state.send_message_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ChatExchangeDto::from(result))))
}

// ============================================================================
// Select Mode
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectModeRequest {
    pub session_id: SessionId,
    pub mode: ChatMode,
}

pub async fn select_mode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectModeRequest>,
) -> Result<Json<ApiResponse<ChatExchangeDto>>, ApiError> {
    let cmd = SelectModeCommand {
        session_id: req.session_id,
        mode: req.mode,
    };

    let result = state.select_mode_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ChatExchangeDto::from(result))))
}

// ============================================================================
// Apply Genres
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApplyGenresRequest {
    pub session_id: SessionId,
    /// 选中的体裁/标签，允许为空
    #[serde(default)]
    pub items: Vec<String>,
}

pub async fn apply_genres(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApplyGenresRequest>,
) -> Result<Json<ApiResponse<ChatExchangeDto>>, ApiError> {
    let cmd = ApplyGenresCommand {
        session_id: req.session_id,
        items: req.items,
    };

    let result = state.apply_genres_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ChatExchangeDto::from(result))))
}

// ============================================================================
// Apply Annotation
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApplyAnnotationRequest {
    pub session_id: SessionId,
    pub annotation: String,
}

pub async fn apply_annotation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApplyAnnotationRequest>,
) -> Result<Json<ApiResponse<ChatExchangeDto>>, ApiError> {
    let cmd = ApplyAnnotationCommand {
        session_id: req.session_id,
        annotation: req.annotation,
    };

    let result = state.apply_annotation_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ChatExchangeDto::from(result))))
}

// ============================================================================
// Transcript
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetTranscriptRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub total: usize,
    pub messages: Vec<MessageDto>,
}

pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetTranscriptRequest>,
) -> Result<Json<ApiResponse<TranscriptResponse>>, ApiError> {
    let query = GetTranscript {
        session_id: req.session_id,
    };

    let messages = state.get_transcript_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(TranscriptResponse {
        session_id: req.session_id.to_string(),
        total: messages.len(),
        messages: messages_to_dto(&messages),
    })))
}
