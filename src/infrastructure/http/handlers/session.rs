//! Session HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{GetSession, ResetSessionCommand};
use crate::domain::session::SessionId;
use crate::infrastructure::http::dto::{ApiResponse, SessionDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Get Session
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetSessionRequest {
    pub session_id: SessionId,
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetSessionRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let query = GetSession {
        session_id: req.session_id,
    };

    let view = state.get_session_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(SessionDto::from(view))))
}

// ============================================================================
// Reset Session
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ResetSessionRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize)]
pub struct ResetSessionResponseDto {
    pub session_id: String,
}

pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetSessionRequest>,
) -> Result<Json<ApiResponse<ResetSessionResponseDto>>, ApiError> {
    let cmd = ResetSessionCommand {
        session_id: req.session_id,
    };

    let result = state.reset_session_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(ResetSessionResponseDto {
        session_id: result.session_id.to_string(),
    })))
}
