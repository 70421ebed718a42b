//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                   GET   健康检查
//! - /api/manuscript/upload      POST  上传手稿（multipart，.txt / UTF-8）
//! - /api/session/get            POST  查询会话状态（模式、in_flight、计数）
//! - /api/session/reset          POST  重置会话（整体清空，手稿移除）
//! - /api/chat/send              POST  自由文本输入（按当前模式路由）
//! - /api/chat/select_mode       POST  选择交互模式
//! - /api/chat/apply_genres      POST  应用体裁/标签选择（允许空选择）
//! - /api/chat/apply_annotation  POST  应用简介文稿
//! - /api/chat/transcript        POST  读取完整会话记录
//! - /api/changes/list           POST  读取变更历史
//! - /api/changes/export         POST  导出一条变更为 .txt 附件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/manuscript", manuscript_routes())
        .nest("/session", session_routes())
        .nest("/chat", chat_routes())
        .nest("/changes", changes_routes())
}

/// Manuscript 路由
fn manuscript_routes() -> Router<Arc<AppState>> {
    Router::new().route("/upload", post(handlers::upload_manuscript))
}

/// Session 路由
fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get", post(handlers::get_session))
        .route("/reset", post(handlers::reset_session))
}

/// Chat 路由
fn chat_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/send", post(handlers::send_message))
        .route("/select_mode", post(handlers::select_mode))
        .route("/apply_genres", post(handlers::apply_genres))
        .route("/apply_annotation", post(handlers::apply_annotation))
        .route("/transcript", post(handlers::get_transcript))
}

/// Changes 路由
fn changes_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", post(handlers::list_changes))
        .route("/export", post(handlers::export_change))
}
