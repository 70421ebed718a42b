//! Manuscript HTTP Handlers
//!
//! 手稿上传：multipart 摄取、文件类型与 UTF-8 校验。
//! 校验不通过的上传在任何状态变化之前被拒绝，不会留下会话记录

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::LoadManuscriptCommand;
use crate::domain::session::SessionId;
use crate::infrastructure::http::dto::{messages_to_dto, ApiResponse, MessageDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ManuscriptUploadResponse {
    pub session_id: String,
    pub file_name: String,
    pub messages: Vec<MessageDto>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 上传手稿 TXT 文件
///
/// 可选的 session_id 字段：携带时替换该会话的手稿，否则创建新会话
pub async fn upload_manuscript(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ManuscriptUploadResponse>>, ApiError> {
    let mut session_id: Option<SessionId> = None;
    let mut file_name: Option<String> = None;
    let mut content: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "session_id" => {
                let raw = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read session_id: {}", e))
                })?;
                let uuid = raw
                    .parse::<Uuid>()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid session_id: {}", raw)))?;
                session_id = Some(SessionId::from_uuid(uuid));
            }
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());

                // 文件类型校验：仅接受 .txt 或文本类型
                let content_type = field.content_type().unwrap_or("application/octet-stream");
                let is_txt = file_name
                    .as_ref()
                    .map(|f| f.to_lowercase().ends_with(".txt"))
                    .unwrap_or(false);
                let is_text_type = content_type.contains("text");

                if !is_txt && !is_text_type {
                    return Err(ApiError::BadRequest(
                        "Only TXT files are allowed".to_string(),
                    ));
                }

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

                content = Some(String::from_utf8(bytes.to_vec()).map_err(|_| {
                    ApiError::BadRequest("File must be valid UTF-8 text".to_string())
                })?);
            }
            _ => {}
        }
    }

    let content = content.ok_or_else(|| ApiError::BadRequest("File is required".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "manuscript.txt".to_string());

    let command = LoadManuscriptCommand {
        session_id,
        file_name,
        content,
    };

    let result = state.load_manuscript_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ManuscriptUploadResponse {
        session_id: result.session_id.to_string(),
        file_name: result.file_name,
        messages: messages_to_dto(&result.messages),
    })))
}
