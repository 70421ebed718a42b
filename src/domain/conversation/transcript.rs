//! Conversation Context - 会话记录
//!
//! 仅追加的有序消息序列：除会话重置时的整体清空外没有其他修改途径，
//! 插入顺序即时间顺序，也就是用户看到的对话本身

use serde::{Deserialize, Serialize};

use super::message::ChatMessage;

/// 会话记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加消息（唯一的局部修改操作）
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// 整体清空（仅在会话重置时调用）
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// 最近一条简介文稿的文本
    ///
    /// 润色调用需要把上一版简介显式回传给后端
    pub fn last_annotation_text(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|message| match message {
            ChatMessage::Annotation { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user_text("первый"));
        transcript.push(ChatMessage::ai_text("второй"));

        let texts: Vec<_> = transcript
            .messages()
            .iter()
            .map(|m| match m {
                ChatMessage::Text { text, .. } => text.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts, vec!["первый", "второй"]);
    }

    #[test]
    fn test_clear_empties_transcript() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::ai_text("сообщение"));
        transcript.clear();

        assert!(transcript.is_empty());
    }

    #[test]
    fn test_last_annotation_text_picks_latest() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.last_annotation_text(), None);

        transcript.push(ChatMessage::annotation("первая версия"));
        transcript.push(ChatMessage::user_text("сделай короче"));
        transcript.push(ChatMessage::annotation("вторая версия"));

        assert_eq!(transcript.last_annotation_text(), Some("вторая версия"));
    }
}
