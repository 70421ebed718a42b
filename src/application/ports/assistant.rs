//! Assistant Port - AI 助手网关抽象
//!
//! 定义核心对 AI 后端的四个能力调用，具体实现在 infrastructure/adapters 层。
//! 核心不关心模型选择、提示词与 JSON Schema 解码——那些是网关实现的事

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 助手网关错误
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 章节/场景定位结果
///
/// 这是一个消歧结果而非裸摘要：找到场景给出标题与摘要，找不到带回
/// 一个反问让用户补充细节
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SceneSummary {
    Found { title: String, summary: String },
    NeedsClarification { question: Option<String> },
}

/// 简介润色请求
///
/// 首次生成不携带；后续迭代显式携带上一版简介与用户反馈。
/// 上一版简介由调用方从会话记录推导——网关实现是无状态的，
/// 不依赖后端的对话记忆
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRefinement {
    pub previous_annotation: Option<String>,
    pub feedback: String,
}

/// Assistant Port
///
/// 四个操作都是异步且可失败的；调用失败由会话控制器就地恢复，
/// 绝不允许让会话崩溃
#[async_trait]
pub trait AssistantPort: Send + Sync {
    /// 基于手稿的自由问答
    async fn analyze(&self, manuscript: &str, question: &str) -> Result<String, AssistantError>;

    /// 生成候选体裁与标签（后端目标 ≥30 条，核心不限制数量）
    async fn generate_genres_and_tags(
        &self,
        manuscript: &str,
    ) -> Result<Vec<String>, AssistantError>;

    /// 按自然语言描述定位章节/场景并生成摘要
    async fn generate_chapter_summary(
        &self,
        manuscript: &str,
        description: &str,
    ) -> Result<SceneSummary, AssistantError>;

    /// 生成或润色图书简介
    async fn generate_annotation(
        &self,
        manuscript: &str,
        refinement: Option<AnnotationRefinement>,
    ) -> Result<String, AssistantError>;
}
