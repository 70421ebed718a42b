//! Gemini Assistant Client - 调用 Google Generative Language API
//!
//! 实现 AssistantPort trait，通过 HTTPS 调用托管模型
//!
//! 外部 API:
//! POST {base}/v1beta/models/{model}:generateContent
//! Request: {"contents":[{"parts":[{"text":"..."}]}], "generationConfig": {...}}  (JSON)
//! Response: {"candidates":[{"content":{"parts":[{"text":"..."}]}}]}
//!
//! 约束输出通过 generationConfig.responseSchema 实现（字符串数组 /
//! 摘要对象两种固定 schema）；不符合 schema 的响应按失败处理，不做
//! 部分恢复

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::application::ports::{
    AnnotationRefinement, AssistantError, AssistantPort, SceneSummary,
};

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API 凭证（仅网关持有，核心不接触）
    pub api_key: String,
    /// API 基础 URL
    pub base_url: String,
    /// 模型名
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// 摘要结果的线格式（后端固定 schema）
#[derive(Debug, Deserialize)]
struct SummaryPayload {
    #[serde(default)]
    found: bool,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default, rename = "clarificationNeeded")]
    clarification_needed: Option<String>,
}

// ============================================================================
// Prompts
// ============================================================================

fn analysis_prompt(manuscript: &str, question: &str) -> String {
    format!(
        "You are an expert literary assistant. Your task is to analyze the provided book content and respond to the user's request. Your answers should be comprehensive, well-structured, and in Russian.\n\n--- BOOK CONTENT START ---\n{}\n--- BOOK CONTENT END ---\n\nUser Request: \"{}\"",
        manuscript, question
    )
}

fn genres_prompt(manuscript: &str) -> String {
    format!(
        "Analyze the following book content and generate a list of at least 30 relevant genres and tags. The list should include both broad genres and specific niche tags. Return the result as a JSON array of strings.\n\n--- BOOK CONTENT START ---\n{}\n--- BOOK CONTENT END ---",
        manuscript
    )
}

fn summary_prompt(manuscript: &str, description: &str) -> String {
    format!(
        "You are a literary analyst AI. Your task is to find a specific scene or chapter in the provided book content based on the user's description and generate a concise summary for it.\n\nAnalyze the book content and the user's request.\n- If you can clearly identify the requested scene, respond with a JSON object where \"found\" is true, \"title\" is a short, descriptive title for the scene (in Russian), and \"summary\" is the generated summary (in Russian).\n- If the user's description is ambiguous or you cannot find a matching scene, respond with a JSON object where \"found\" is false and \"clarificationNeeded\" contains a question (in Russian) to the user asking for more specific details. Do not invent a summary if you are not sure.\n\n--- BOOK CONTENT START ---\n{}\n--- BOOK CONTENT END ---\n\nUser's description of the scene: \"{}\"",
        manuscript, description
    )
}

/// 润色提示词：上一版简介由调用方显式回传，不依赖后端对话记忆
fn annotation_prompt(manuscript: &str, refinement: Option<&AnnotationRefinement>) -> String {
    match refinement {
        Some(refinement) => {
            let previous = refinement
                .previous_annotation
                .as_deref()
                .unwrap_or("(no previous annotation is available)");
            format!(
                "The user provided feedback on a previously generated annotation for the book below. Refine it.\n\n--- BOOK CONTENT START ---\n{}\n--- BOOK CONTENT END ---\n\nPrevious Annotation: \"{}\"\nUser Feedback: \"{}\"\n\nGenerate a new, improved annotation based on this feedback. The response should be only the annotation text in Russian.",
                manuscript, previous, refinement.feedback
            )
        }
        None => format!(
            "You are an expert copywriter for a publishing house. Your task is to write a compelling and intriguing annotation for the provided book content. The annotation should be in Russian, around 100-150 words, and should capture the essence of the story without revealing major spoilers.\n\n--- BOOK CONTENT START ---\n{}\n--- BOOK CONTENT END ---\n\nGenerate the annotation. The response should be only the annotation text.",
            manuscript
        ),
    }
}

// ============================================================================
// Response schemas + decoding
// ============================================================================

fn genres_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" }
    })
}

fn summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "found": { "type": "BOOLEAN" },
            "title": { "type": "STRING", "nullable": true },
            "summary": { "type": "STRING", "nullable": true },
            "clarificationNeeded": { "type": "STRING", "nullable": true }
        }
    })
}

/// 体裁负载解码
///
/// JSON 解析失败按失败处理；合法 JSON 但不是字符串数组按空结果处理，
/// 让挑选流程保持可用
fn decode_genres(raw: &str) -> Result<Vec<String>, AssistantError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| AssistantError::InvalidResponse(format!("Genre payload: {}", e)))?;

    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    let mut genres = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(text) => genres.push(text),
            _ => return Ok(Vec::new()),
        }
    }
    Ok(genres)
}

/// 摘要负载解码
///
/// found 为 true 但缺少标题或摘要时退化为澄清分支，不臆造结果
fn decode_summary(raw: &str) -> Result<SceneSummary, AssistantError> {
    let payload: SummaryPayload = serde_json::from_str(raw.trim())
        .map_err(|e| AssistantError::InvalidResponse(format!("Summary payload: {}", e)))?;

    match payload {
        SummaryPayload {
            found: true,
            title: Some(title),
            summary: Some(summary),
            ..
        } => Ok(SceneSummary::Found { title, summary }),
        SummaryPayload {
            clarification_needed,
            ..
        } => Ok(SceneSummary::NeedsClarification {
            question: clarification_needed,
        }),
    }
}

// ============================================================================
// Client
// ============================================================================

/// Gemini 助手客户端
pub struct GeminiAssistantClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiAssistantClient {
    /// 创建新的 Gemini 客户端
    pub fn new(config: GeminiClientConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// 发送一次生成请求并取回首个候选的文本
    async fn generate(
        &self,
        prompt: String,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String, AssistantError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        };

        tracing::debug!(
            url = %self.generate_url(),
            model = %self.config.model,
            "Sending generate request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else if e.is_connect() {
                    AssistantError::NetworkError(format!("Cannot connect to Gemini API: {}", e))
                } else {
                    AssistantError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistantError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AssistantError::InvalidResponse("Response carries no candidate text".to_string())
            })?;

        tracing::debug!(text_len = text.len(), "Generate request completed");

        Ok(text)
    }
}

#[async_trait]
impl AssistantPort for GeminiAssistantClient {
    async fn analyze(&self, manuscript: &str, question: &str) -> Result<String, AssistantError> {
        self.generate(analysis_prompt(manuscript, question), None)
            .await
    }

    async fn generate_genres_and_tags(
        &self,
        manuscript: &str,
    ) -> Result<Vec<String>, AssistantError> {
        let raw = self
            .generate(
                genres_prompt(manuscript),
                Some(GenerationConfig {
                    response_mime_type: "application/json",
                    response_schema: genres_schema(),
                }),
            )
            .await?;
        decode_genres(&raw)
    }

    async fn generate_chapter_summary(
        &self,
        manuscript: &str,
        description: &str,
    ) -> Result<SceneSummary, AssistantError> {
        let raw = self
            .generate(
                summary_prompt(manuscript, description),
                Some(GenerationConfig {
                    response_mime_type: "application/json",
                    response_schema: summary_schema(),
                }),
            )
            .await?;
        decode_summary(&raw)
    }

    async fn generate_annotation(
        &self,
        manuscript: &str,
        refinement: Option<AnnotationRefinement>,
    ) -> Result<String, AssistantError> {
        self.generate(annotation_prompt(manuscript, refinement.as_ref()), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeminiClientConfig::default();
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = GeminiClientConfig::new("secret")
            .with_model("gemini-pro")
            .with_timeout(30);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_decode_genres_accepts_string_array() {
        let genres = decode_genres(r#"["фэнтези", "драма"]"#).unwrap();
        assert_eq!(genres, vec!["фэнтези", "драма"]);
    }

    #[test]
    fn test_decode_genres_non_array_becomes_empty() {
        assert!(decode_genres(r#"{"items": []}"#).unwrap().is_empty());
        assert!(decode_genres(r#"["фэнтези", 42]"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_genres_invalid_json_is_error() {
        assert!(matches!(
            decode_genres("not json"),
            Err(AssistantError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_decode_summary_found() {
        let raw = r#"{"found": true, "title": "Глава 1", "summary": "Краткое содержание"}"#;
        assert_eq!(
            decode_summary(raw).unwrap(),
            SceneSummary::Found {
                title: "Глава 1".to_string(),
                summary: "Краткое содержание".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_summary_found_without_fields_degrades_to_clarification() {
        let raw = r#"{"found": true, "title": "Глава 1"}"#;
        assert_eq!(
            decode_summary(raw).unwrap(),
            SceneSummary::NeedsClarification { question: None }
        );
    }

    #[test]
    fn test_decode_summary_clarification() {
        let raw = r#"{"found": false, "clarificationNeeded": "Уточните, пожалуйста"}"#;
        assert_eq!(
            decode_summary(raw).unwrap(),
            SceneSummary::NeedsClarification {
                question: Some("Уточните, пожалуйста".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_summary_invalid_json_is_error() {
        assert!(matches!(
            decode_summary("<html>"),
            Err(AssistantError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_refinement_prompt_threads_previous_annotation() {
        let refinement = AnnotationRefinement {
            previous_annotation: Some("Старая аннотация".to_string()),
            feedback: "Сделай короче".to_string(),
        };
        let prompt = annotation_prompt("Текст книги", Some(&refinement));

        assert!(prompt.contains("Старая аннотация"));
        assert!(prompt.contains("Сделай короче"));
    }

    #[test]
    fn test_initial_prompt_has_no_feedback_section() {
        let prompt = annotation_prompt("Текст книги", None);
        assert!(!prompt.contains("User Feedback"));
        assert!(prompt.contains("Текст книги"));
    }
}
