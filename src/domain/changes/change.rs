//! Changes Context - 变更条目
//!
//! 用户显式应用生成结果后记入历史的条目，类型标签 + 人类可读时间戳 +
//! 按类型区分的负载

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// 变更条目唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeId(Uuid);

impl ChangeId {
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

impl Default for ChangeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ChangeError {
    #[error("体裁与标签选择不能为空")]
    EmptySelection,
}

/// 变更条目
///
/// 不变量:
/// - 只在用户显式应用生成结果后创建，失败或进行中的生成不会产生条目
/// - 体裁变更的选择集非空
/// - 条目创建后不再被编辑
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Change {
    /// 选定的体裁与标签集合
    #[serde(rename = "GENRES_AND_TAGS")]
    GenresAndTags {
        id: ChangeId,
        timestamp: String,
        items: Vec<String>,
    },
    /// 章节/场景摘要
    #[serde(rename = "CHAPTER_SUMMARY")]
    ChapterSummary {
        id: ChangeId,
        timestamp: String,
        title: String,
        summary: String,
    },
    /// 图书简介
    #[serde(rename = "ANNOTATION")]
    Annotation {
        id: ChangeId,
        timestamp: String,
        title: String,
        annotation: String,
    },
}

impl Change {
    /// 体裁与标签变更，拒绝空选择
    pub fn genres_and_tags(items: Vec<String>) -> Result<Self, ChangeError> {
        if items.is_empty() {
            return Err(ChangeError::EmptySelection);
        }
        Ok(Self::GenresAndTags {
            id: ChangeId::new(),
            timestamp: now_stamp(),
            items,
        })
    }

    /// 章节摘要变更
    pub fn chapter_summary(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self::ChapterSummary {
            id: ChangeId::new(),
            timestamp: now_stamp(),
            title: title.into(),
            summary: summary.into(),
        }
    }

    /// 简介变更
    pub fn annotation(title: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self::Annotation {
            id: ChangeId::new(),
            timestamp: now_stamp(),
            title: title.into(),
            annotation: annotation.into(),
        }
    }

    pub fn id(&self) -> ChangeId {
        match self {
            Self::GenresAndTags { id, .. }
            | Self::ChapterSummary { id, .. }
            | Self::Annotation { id, .. } => *id,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            Self::GenresAndTags { timestamp, .. }
            | Self::ChapterSummary { timestamp, .. }
            | Self::Annotation { timestamp, .. } => timestamp,
        }
    }
}

/// 人类可读时间戳（本地时间 HH:MM）
fn now_stamp() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_genre_selection_rejected() {
        assert!(matches!(
            Change::genres_and_tags(Vec::new()),
            Err(ChangeError::EmptySelection)
        ));
    }

    #[test]
    fn test_genre_change_keeps_items() {
        let change = Change::genres_and_tags(vec!["фэнтези".to_string()]).unwrap();
        match &change {
            Change::GenresAndTags { items, .. } => assert_eq!(items, &["фэнтези"]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_timestamp_is_hh_mm() {
        let change = Change::chapter_summary("Глава 1", "Краткое содержание");
        let stamp = change.timestamp();

        assert_eq!(stamp.len(), 5);
        assert_eq!(stamp.as_bytes()[2], b':');
    }

    #[test]
    fn test_serde_type_tag() {
        let change = Change::annotation("Аннотация к книге", "Текст аннотации");
        let json = serde_json::to_value(&change).unwrap();

        assert_eq!(json["type"], "ANNOTATION");
        assert_eq!(json["title"], "Аннотация к книге");
    }
}
