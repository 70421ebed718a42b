//! Data Transfer Objects

use serde::Serialize;

use crate::application::SessionView;
use crate::domain::changes::Change;
use crate::domain::conversation::{ChatMessage, ChatMode, Sender};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Message DTOs
// ============================================================================

/// 会话消息 DTO
///
/// 与领域消息同构的渲染层形状：{id, sender, type, ...}
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageDto {
    Text {
        id: String,
        sender: Sender,
        text: String,
    },
    GenreSlider {
        id: String,
        sender: Sender,
        items: Vec<String>,
    },
    Annotation {
        id: String,
        sender: Sender,
        text: String,
    },
}

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        match message {
            ChatMessage::Text { id, sender, text } => Self::Text {
                id: id.to_string(),
                sender: *sender,
                text: text.clone(),
            },
            ChatMessage::GenreSlider { id, items } => Self::GenreSlider {
                id: id.to_string(),
                sender: message.sender(),
                items: items.clone(),
            },
            ChatMessage::Annotation { id, text } => Self::Annotation {
                id: id.to_string(),
                sender: message.sender(),
                text: text.clone(),
            },
        }
    }
}

pub fn messages_to_dto(messages: &[ChatMessage]) -> Vec<MessageDto> {
    messages.iter().map(MessageDto::from).collect()
}

// ============================================================================
// Change DTOs
// ============================================================================

/// 变更条目负载 DTO
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ChangePayloadDto {
    #[serde(rename = "GENRES_AND_TAGS")]
    GenresAndTags(Vec<String>),
    #[serde(rename = "CHAPTER_SUMMARY")]
    ChapterSummary { title: String, summary: String },
    #[serde(rename = "ANNOTATION")]
    Annotation { title: String, annotation: String },
}

/// 变更条目 DTO：{id, timestamp, type, data}
#[derive(Debug, Serialize)]
pub struct ChangeDto {
    pub id: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub payload: ChangePayloadDto,
}

impl From<&Change> for ChangeDto {
    fn from(change: &Change) -> Self {
        match change {
            Change::GenresAndTags {
                id,
                timestamp,
                items,
            } => Self {
                id: id.to_string(),
                timestamp: timestamp.clone(),
                payload: ChangePayloadDto::GenresAndTags(items.clone()),
            },
            Change::ChapterSummary {
                id,
                timestamp,
                title,
                summary,
            } => Self {
                id: id.to_string(),
                timestamp: timestamp.clone(),
                payload: ChangePayloadDto::ChapterSummary {
                    title: title.clone(),
                    summary: summary.clone(),
                },
            },
            Change::Annotation {
                id,
                timestamp,
                title,
                annotation,
            } => Self {
                id: id.to_string(),
                timestamp: timestamp.clone(),
                payload: ChangePayloadDto::Annotation {
                    title: title.clone(),
                    annotation: annotation.clone(),
                },
            },
        }
    }
}

pub fn changes_to_dto(changes: &[Change]) -> Vec<ChangeDto> {
    changes.iter().map(ChangeDto::from).collect()
}

// ============================================================================
// Session DTOs
// ============================================================================

/// 会话状态 DTO
#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub session_id: String,
    pub file_name: Option<String>,
    pub mode: ChatMode,
    pub in_flight: bool,
    pub message_count: usize,
    pub change_count: usize,
}

impl From<SessionView> for SessionDto {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id.to_string(),
            file_name: view.file_name,
            mode: view.mode,
            in_flight: view.in_flight,
            message_count: view.message_count,
            change_count: view.change_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_dto_carries_sender_for_ai_variants() {
        let message = ChatMessage::genre_slider(vec!["фэнтези".to_string()]);
        let json = serde_json::to_value(MessageDto::from(&message)).unwrap();

        assert_eq!(json["type"], "genre_slider");
        assert_eq!(json["sender"], "ai");
    }

    #[test]
    fn test_change_dto_shape() {
        let change = Change::chapter_summary("Глава", "Резюме");
        let json = serde_json::to_value(ChangeDto::from(&change)).unwrap();

        assert_eq!(json["type"], "CHAPTER_SUMMARY");
        assert_eq!(json["data"]["title"], "Глава");
        assert_eq!(json["data"]["summary"], "Резюме");
        assert!(json["id"].is_string());
        assert!(json["timestamp"].is_string());
    }
}
