//! Conversation Context - 消息模型
//!
//! 会话记录中的异构消息变体（封闭集合，消费方穷尽匹配）

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 消息唯一标识
///
/// 仅供渲染层做稳定标识使用，不参与业务逻辑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 消息发送方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// 会话消息
///
/// 不变量:
/// - GenreSlider 与 Annotation 变体只由 AI 产生
/// - 消息一经写入会话记录即不可修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatMessage {
    /// 普通文本消息
    Text {
        id: MessageId,
        sender: Sender,
        text: String,
    },
    /// 体裁/标签候选列表
    GenreSlider { id: MessageId, items: Vec<String> },
    /// 图书简介文稿
    Annotation { id: MessageId, text: String },
}

impl ChatMessage {
    /// 用户文本消息
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::Text {
            id: MessageId::new(),
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// AI 文本消息
    pub fn ai_text(text: impl Into<String>) -> Self {
        Self::Text {
            id: MessageId::new(),
            sender: Sender::Ai,
            text: text.into(),
        }
    }

    /// 体裁候选消息
    pub fn genre_slider(items: Vec<String>) -> Self {
        Self::GenreSlider {
            id: MessageId::new(),
            items,
        }
    }

    /// 简介文稿消息
    pub fn annotation(text: impl Into<String>) -> Self {
        Self::Annotation {
            id: MessageId::new(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> MessageId {
        match self {
            Self::Text { id, .. } | Self::GenreSlider { id, .. } | Self::Annotation { id, .. } => {
                *id
            }
        }
    }

    pub fn sender(&self) -> Sender {
        match self {
            Self::Text { sender, .. } => *sender,
            Self::GenreSlider { .. } | Self::Annotation { .. } => Sender::Ai,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_senders() {
        assert_eq!(ChatMessage::user_text("вопрос").sender(), Sender::User);
        assert_eq!(ChatMessage::ai_text("ответ").sender(), Sender::Ai);
        assert_eq!(
            ChatMessage::genre_slider(vec!["фэнтези".to_string()]).sender(),
            Sender::Ai
        );
        assert_eq!(ChatMessage::annotation("текст").sender(), Sender::Ai);
    }

    #[test]
    fn test_serde_tagging() {
        let message = ChatMessage::genre_slider(vec!["драма".to_string()]);
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["type"], "genre_slider");
        assert_eq!(json["items"][0], "драма");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = ChatMessage::ai_text("a");
        let b = ChatMessage::ai_text("b");
        assert_ne!(a.id(), b.id());
    }
}
