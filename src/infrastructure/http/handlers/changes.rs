//! Changes HTTP Handlers
//!
//! 变更历史的读取与 .txt 导出

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{ExportChange, ListChanges};
use crate::domain::changes::ChangeId;
use crate::domain::session::SessionId;
use crate::infrastructure::http::dto::{changes_to_dto, ApiResponse, ChangeDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// List Changes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListChangesRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize)]
pub struct ChangesResponse {
    pub session_id: String,
    pub total: usize,
    pub changes: Vec<ChangeDto>,
}

pub async fn list_changes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListChangesRequest>,
) -> Result<Json<ApiResponse<ChangesResponse>>, ApiError> {
    let query = ListChanges {
        session_id: req.session_id,
    };

    let changes = state.list_changes_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(ChangesResponse {
        session_id: req.session_id.to_string(),
        total: changes.len(),
        changes: changes_to_dto(&changes),
    })))
}

// ============================================================================
// Export Change
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ExportChangeRequest {
    pub session_id: SessionId,
    pub change_id: Uuid,
}

/// 导出一条变更为 .txt 附件
pub async fn export_change(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportChangeRequest>,
) -> Result<Response, ApiError> {
    let query = ExportChange {
        session_id: req.session_id,
        change_id: ChangeId::from_uuid(req.change_id),
    };

    let file = state.export_change_handler.handle(query).await?;

    tracing::info!(
        session_id = %req.session_id,
        file_name = %file.file_name,
        "Change exported"
    );

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/plain; charset=utf-8".to_string(),
            ),
            (header::CONTENT_DISPOSITION, content_disposition(&file.file_name)),
        ],
        file.content,
    )
        .into_response())
}

/// Content-Disposition 值
///
/// 文件名多为西里尔标题，按 RFC 5987 放进 filename*；
/// ASCII 兜底名留给不认识 filename* 的客户端
fn content_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename=\"export.txt\"; filename*=UTF-8''{}",
        percent_encode(file_name)
    )
}

fn percent_encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len() * 3);
    for byte in raw.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'_' | b'~' => {
                encoded.push(*byte as char)
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{:02X}", byte));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode_ascii_untouched() {
        assert_eq!(percent_encode("export-1.txt"), "export-1.txt");
    }

    #[test]
    fn test_percent_encode_cyrillic() {
        assert_eq!(percent_encode("Жанры"), "%D0%96%D0%B0%D0%BD%D1%80%D1%8B");
    }

    #[test]
    fn test_content_disposition_keeps_ascii_fallback() {
        let value = content_disposition("Аннотация к книге.txt");
        assert!(value.starts_with("attachment; filename=\"export.txt\""));
        assert!(value.contains("filename*=UTF-8''"));
        // 值本身必须是纯 ASCII，否则无法放进 HTTP 头
        assert!(value.is_ascii());
    }
}
